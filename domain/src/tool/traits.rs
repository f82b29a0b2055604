//! Tool domain traits
//!
//! [`Tool`] is the async execution seam implemented by infrastructure
//! adapters. [`ToolValidator`] is pure and runs before every execution.

use async_trait::async_trait;
use serde_json::Value;

use super::entities::{ParamType, ParamValue, ParsedFunctionCall, ToolDefinition};
use super::value_objects::ToolError;

/// An executable tool bound to its definition
#[async_trait]
pub trait Tool: Send + Sync {
    fn definition(&self) -> &ToolDefinition;

    fn code(&self) -> &str {
        &self.definition().code
    }

    /// Run the tool with already validated parameters
    async fn execute(&self, call: &ParsedFunctionCall) -> Result<Value, ToolError>;
}

/// Validator for parsed calls
pub trait ToolValidator {
    /// Check a call against its definition, returning the normalized call
    fn validate(
        &self,
        call: &ParsedFunctionCall,
        definition: &ToolDefinition,
    ) -> Result<ParsedFunctionCall, String>;
}

/// Checks required parameters, declared types and allowed values.
///
/// Integers and booleans given for a `string` parameter are turned back into
/// text, since the parser reads `"123"` as an integer. Allowed values match
/// after trimming, ignoring ASCII case. Undeclared parameters pass through
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(
        &self,
        call: &ParsedFunctionCall,
        definition: &ToolDefinition,
    ) -> Result<ParsedFunctionCall, String> {
        let mut errors = Vec::new();
        let mut normalized = call.clone();

        for param in &definition.parameters {
            let Some(value) = call.parameters.get(&param.name) else {
                if param.required {
                    errors.push(format!("Missing required parameter: {}", param.name));
                }
                continue;
            };

            let coerced = match (param.param_type, value) {
                (ParamType::String, ParamValue::Str(_)) => None,
                (ParamType::String, other) => Some(ParamValue::Str(other.to_string())),
                (ParamType::Integer, ParamValue::Int(_)) => None,
                (ParamType::Boolean, ParamValue::Bool(_)) => None,
                (ParamType::Integer, _) => {
                    errors.push(format!("Parameter {} must be integer", param.name));
                    None
                }
                (ParamType::Boolean, _) => {
                    errors.push(format!("Parameter {} must be boolean", param.name));
                    None
                }
            };
            if !param.allowed_values.is_empty() {
                let text = coerced.as_ref().unwrap_or(value).to_string();
                let text = text.trim();
                if !param
                    .allowed_values
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(text))
                {
                    errors.push(format!(
                        "Parameter {} must be one of: {}",
                        param.name,
                        param.allowed_values.join(", ")
                    ));
                }
            }
            if let Some(value) = coerced {
                normalized.parameters.insert(param.name.clone(), value);
            }
        }

        if errors.is_empty() {
            Ok(normalized)
        } else {
            Err(format!(
                "Parameter validation failed: {}",
                errors.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{ToolCategory, ToolParameter};

    fn definition() -> ToolDefinition {
        ToolDefinition::new("product_search", "Search", "Search products", ToolCategory::Product)
            .with_parameter(ToolParameter::new("query", "Search query", true))
            .with_parameter(
                ToolParameter::new("limit", "Max results", false).with_type(ParamType::Integer),
            )
            .with_parameter(
                ToolParameter::new("available_only", "Only in stock", false)
                    .with_type(ParamType::Boolean),
            )
    }

    #[test]
    fn test_validator_missing_required() {
        let call = ParsedFunctionCall::new("product_search");
        let result = DefaultToolValidator.validate(&call, &definition());
        assert_eq!(
            result.unwrap_err(),
            "Parameter validation failed: Missing required parameter: query"
        );
    }

    #[test]
    fn test_validator_wrong_types() {
        let call = ParsedFunctionCall::new("product_search")
            .with_param("query", "lac")
            .with_param("limit", "many")
            .with_param("available_only", 1);
        let err = DefaultToolValidator.validate(&call, &definition()).unwrap_err();
        assert!(err.contains("Parameter limit must be integer"));
        assert!(err.contains("Parameter available_only must be boolean"));
    }

    #[test]
    fn test_validator_coerces_numbers_for_string_params() {
        let call = ParsedFunctionCall::new("product_search").with_param("query", 123);
        let validated = DefaultToolValidator.validate(&call, &definition()).unwrap();
        assert_eq!(validated.get("query"), Some(&ParamValue::Str("123".into())));
    }

    #[test]
    fn test_validator_enforces_allowed_values() {
        let definition = ToolDefinition::new("company_info", "Company", "Company data", ToolCategory::General)
            .with_parameter(
                ToolParameter::new("info_type", "Kind", false)
                    .with_allowed_values(["basic", "contact", "all"]),
            );

        let call = ParsedFunctionCall::new("company_info").with_param("info_type", " ALL ");
        assert!(DefaultToolValidator.validate(&call, &definition).is_ok());

        let call = ParsedFunctionCall::new("company_info").with_param("info_type", "salary");
        assert_eq!(
            DefaultToolValidator.validate(&call, &definition).unwrap_err(),
            "Parameter validation failed: Parameter info_type must be one of: basic, contact, all"
        );
    }

    #[test]
    fn test_validator_keeps_undeclared_params() {
        let call = ParsedFunctionCall::new("product_search")
            .with_param("query", "parchet")
            .with_param("lang", "ro_RO");
        let validated = DefaultToolValidator.validate(&call, &definition()).unwrap();
        assert_eq!(validated.get_str("lang").as_deref(), Some("ro_RO"));
    }
}
