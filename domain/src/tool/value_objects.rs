//! Tool domain value objects: execution results and errors

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::entities::{ParamValue, ParsedFunctionCall};

/// Error that occurred while executing a tool.
///
/// | Code | Meaning |
/// |------|---------|
/// | `INVALID_ARGUMENT` | Missing or mistyped parameters |
/// | `NOT_FOUND` | Unknown tool code, or missing record |
/// | `EXECUTION_FAILED` | Runtime failure (HTTP error, panic) |
/// | `CONFIGURATION` | Required backend is missing or inactive |
/// | `SKIPPED` | Call was not run (repeated keyword extraction) |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub const INVALID_ARGUMENT: &'static str = "INVALID_ARGUMENT";
    pub const NOT_FOUND: &'static str = "NOT_FOUND";
    pub const EXECUTION_FAILED: &'static str = "EXECUTION_FAILED";
    pub const CONFIGURATION: &'static str = "CONFIGURATION";
    pub const SKIPPED: &'static str = "SKIPPED";

    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn tool_not_found(code: impl Into<String>) -> Self {
        Self::new(
            Self::NOT_FOUND,
            format!("Tool '{}' not found", code.into()),
        )
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Self::INVALID_ARGUMENT, message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new(Self::EXECUTION_FAILED, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(Self::CONFIGURATION, message)
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self::new(Self::SKIPPED, message)
    }

    pub fn is_configuration(&self) -> bool {
        self.code == Self::CONFIGURATION
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Outcome of one attempted call. Exactly one per parsed call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolExecutionResult {
    pub tool: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Parameters the tool was actually invoked with
    pub parameters: HashMap<String, ParamValue>,
}

impl ToolExecutionResult {
    pub fn success(call: &ParsedFunctionCall, result: Value) -> Self {
        Self {
            tool: call.tool.clone(),
            success: true,
            result: Some(result),
            error: None,
            parameters: call.parameters.clone(),
        }
    }

    pub fn failure(call: &ParsedFunctionCall, error: ToolError) -> Self {
        Self {
            tool: call.tool.clone(),
            success: false,
            result: None,
            error: Some(error),
            parameters: call.parameters.clone(),
        }
    }

    /// Payload of a successful result
    pub fn payload(&self) -> Option<&Value> {
        if self.success { self.result.as_ref() } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_error_display() {
        let error = ToolError::tool_not_found("weather").with_details("not registered");
        assert_eq!(
            error.to_string(),
            "[NOT_FOUND] Tool 'weather' not found (not registered)"
        );
    }

    #[test]
    fn test_result_echoes_parameters() {
        let call = ParsedFunctionCall::new("stock_check").with_param("product_id", 5);
        let ok = ToolExecutionResult::success(&call, json!({"quantity": 5}));
        assert!(ok.success);
        assert_eq!(ok.payload(), Some(&json!({"quantity": 5})));
        assert_eq!(ok.parameters.get("product_id"), Some(&ParamValue::Int(5)));

        let failed = ToolExecutionResult::failure(&call, ToolError::execution_failed("boom"));
        assert!(!failed.success);
        assert!(failed.payload().is_none());
        assert_eq!(failed.error.as_ref().map(|e| e.code.as_str()), Some("EXECUTION_FAILED"));
    }
}
