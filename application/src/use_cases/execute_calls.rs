//! Function call execution.
//!
//! Runs a batch of parsed calls against the registry, one at a time:
//!
//! 1. The first `keyword_extraction` call runs before everything else.
//!    Later extraction calls are not run and get a `SKIPPED` result.
//! 2. The remaining calls run in textual order. Multi-search calls that
//!    lack `extracted_keywords` receive the serialized extraction payload.
//!
//! Every call yields exactly one result. Unknown tools, validation errors,
//! tool errors and panics are recorded as failed results and never abort
//! the batch.

use agentic_domain::tool::codes::{self, EXTRACTED_KEYWORDS_PARAM, LANG_PARAM};
use agentic_domain::{
    DefaultToolValidator, Language, ParamValue, ParsedFunctionCall, ToolError,
    ToolExecutionResult, ToolRegistry, ToolValidator,
};
use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct FunctionCallExecutor {
    registry: Arc<ToolRegistry>,
    validator: DefaultToolValidator,
}

impl FunctionCallExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            validator: DefaultToolValidator,
        }
    }

    pub async fn execute(
        &self,
        calls: &[ParsedFunctionCall],
        lang: Language,
    ) -> Vec<ToolExecutionResult> {
        let mut results = Vec::with_capacity(calls.len());
        let extraction_index = calls
            .iter()
            .position(|c| c.tool == codes::KEYWORD_EXTRACTION);

        let mut extraction_payload: Option<String> = None;
        if let Some(index) = extraction_index {
            let result = self.execute_one(&calls[index], lang).await;
            if let Some(payload) = result.payload() {
                extraction_payload = serde_json::to_string(payload).ok();
            }
            results.push(result);
        }

        for (index, call) in calls.iter().enumerate() {
            if Some(index) == extraction_index {
                continue;
            }
            if call.tool == codes::KEYWORD_EXTRACTION {
                debug!(tool = %call.tool, "Skipping repeated keyword extraction call");
                results.push(ToolExecutionResult::failure(
                    call,
                    ToolError::skipped("Only the first keyword_extraction call is executed"),
                ));
                continue;
            }

            let mut call = call.clone();
            if codes::is_multisearch(&call.tool)
                && !call.has(EXTRACTED_KEYWORDS_PARAM)
                && let Some(payload) = &extraction_payload
            {
                debug!(tool = %call.tool, "Injecting extraction result");
                call.parameters.insert(
                    EXTRACTED_KEYWORDS_PARAM.to_string(),
                    ParamValue::Str(payload.clone()),
                );
            }
            results.push(self.execute_one(&call, lang).await);
        }

        let failed = results.iter().filter(|r| !r.success).count();
        info!(
            calls = calls.len(),
            failed, "Function calls executed"
        );
        results
    }

    async fn execute_one(&self, call: &ParsedFunctionCall, lang: Language) -> ToolExecutionResult {
        let mut call = call.clone();
        if !call.has(LANG_PARAM) {
            call.parameters
                .insert(LANG_PARAM.to_string(), ParamValue::Str(lang.code().to_string()));
        }

        let tool = match self.registry.get(&call.tool) {
            Ok(tool) => tool,
            Err(_) => {
                warn!(tool = %call.tool, "Tool not found");
                return ToolExecutionResult::failure(&call, ToolError::tool_not_found(&call.tool));
            }
        };

        let call = match self.validator.validate(&call, tool.definition()) {
            Ok(validated) => validated,
            Err(message) => {
                warn!(tool = %call.tool, error = %message, "Invalid tool parameters");
                return ToolExecutionResult::failure(&call, ToolError::invalid_argument(message));
            }
        };

        debug!(tool = %call.tool, "Executing tool");
        let outcome: Result<Result<Value, ToolError>, Box<dyn Any + Send>> =
            AssertUnwindSafe(tool.execute(&call)).catch_unwind().await;

        match outcome {
            Ok(Ok(payload)) => ToolExecutionResult::success(&call, payload),
            Ok(Err(error)) => {
                warn!(tool = %call.tool, error = %error, "Tool execution failed");
                ToolExecutionResult::failure(&call, error)
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                warn!(tool = %call.tool, error = %message, "Tool panicked");
                ToolExecutionResult::failure(&call, ToolError::execution_failed(message))
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool panicked".to_string()
    }
}
