//! Result of one `ask` round-trip

use serde::{Deserialize, Serialize};

use crate::core::channel::Channel;
use crate::core::language::Language;
use crate::tool::entities::ParsedFunctionCall;
use crate::tool::value_objects::ToolExecutionResult;

/// Which path produced the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPath {
    FunctionCalling,
    Direct,
}

/// How the reply language was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Supplied by the caller
    Provided,
    /// Isolated model round-trip
    AiIsolated,
    /// Detection failed, forced to `en_US`
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationOutcome {
    pub answer: String,
    pub language: Language,
    pub language_detection_method: DetectionMethod,
    pub provider: String,
    pub provider_code: String,
    pub tools_available: usize,
    pub channel: Channel,
    pub prompt_used: String,
    pub workflow: WorkflowPath,
    /// True only when calls were parsed and executed
    pub function_calling_used: bool,
    pub function_calls_made: usize,
    pub function_calls: Vec<ParsedFunctionCall>,
    pub function_results: Vec<ToolExecutionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_raw_response: Option<String>,
}

impl OrchestrationOutcome {
    pub fn failed_calls(&self) -> usize {
        self.function_results.iter().filter(|r| !r.success).count()
    }
}
