//! Ask use case.
//!
//! The single entry point surfaced to the hosting application. One call
//! handles one user message, strictly sequentially:
//!
//! 1. Resolve the reply language (caller-supplied or detected)
//! 2. Resolve the provider and scope the tools to the channel
//! 3. Decide between the function-calling and the direct path
//! 4. Function calling: complete, parse, execute, integrate
//! 5. Direct: complete with the channel's system prompt
//!
//! Only a missing provider is an error. Everything else degrades to text.

use crate::ports::llm_provider::{
    CompletionPurpose, CompletionRequest, LlmProvider, ProviderCatalog, ProviderError,
};
use crate::use_cases::execute_calls::FunctionCallExecutor;
use agentic_domain::core::text::ellipsize;
use agentic_domain::{
    Channel, ChatTurn, DetectionMethod, FunctionCallParser, Language, OrchestrationDecider,
    OrchestrationOutcome, PromptTemplate, ResponseIntegrator, ToolRegistry, WorkflowPath,
    prompt::FUNCTION_CALLING_MAIN,
};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by [`ConversationOrchestrator::ask`]
#[derive(Error, Debug)]
pub enum AskError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ProviderError),
}

/// Input for [`ConversationOrchestrator::ask`]
#[derive(Debug, Clone)]
pub struct AskInput {
    pub message: String,
    pub channel: Channel,
    pub history: Vec<ChatTurn>,
    /// Provider code; the default provider when `None`
    pub provider_code: Option<String>,
    /// Locale code; detected when `None`
    pub lang: Option<String>,
}

impl AskInput {
    pub fn new(message: impl Into<String>, channel: Channel) -> Self {
        Self {
            message: message.into(),
            channel,
            history: Vec::new(),
            provider_code: None,
            lang: None,
        }
    }

    pub fn with_history(mut self, history: Vec<ChatTurn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_provider(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

/// Coordinates one request end to end
pub struct ConversationOrchestrator {
    providers: Arc<dyn ProviderCatalog>,
    registry: Arc<ToolRegistry>,
    decider: OrchestrationDecider,
    parser: FunctionCallParser,
    integrator: ResponseIntegrator,
}

impl ConversationOrchestrator {
    pub fn new(providers: Arc<dyn ProviderCatalog>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            providers,
            registry,
            decider: OrchestrationDecider::default(),
            parser: FunctionCallParser::new(),
            integrator: ResponseIntegrator::new(),
        }
    }

    /// Replace the intent keyword table
    pub fn with_decider(mut self, decider: OrchestrationDecider) -> Self {
        self.decider = decider;
        self
    }

    pub async fn ask(&self, input: AskInput) -> Result<OrchestrationOutcome, AskError> {
        info!(
            channel = %input.channel,
            "Handling message: {}",
            ellipsize(&input.message, 100)
        );

        let (language, method) = self.resolve_language(&input).await;
        debug!(lang = %language, method = ?method, "Language resolved");

        let provider = self.providers.resolve(input.provider_code.as_deref())?;
        let tools = Arc::new(self.registry.restricted_to(input.channel));
        let tool_codes = tools.codes();
        info!(
            provider = provider.code(),
            tools = tool_codes.len(),
            "Provider and tools selected"
        );

        let outcome = OrchestrationOutcome {
            answer: String::new(),
            language,
            language_detection_method: method,
            provider: provider.name().to_string(),
            provider_code: provider.code().to_string(),
            tools_available: tool_codes.len(),
            channel: input.channel,
            prompt_used: String::new(),
            workflow: WorkflowPath::Direct,
            function_calling_used: false,
            function_calls_made: 0,
            function_calls: Vec::new(),
            function_results: Vec::new(),
            ai_raw_response: None,
        };

        let use_tools = self
            .decider
            .should_use_function_calling(&input.message, &tool_codes);
        info!(function_calling = use_tools, "Workflow decided");

        let outcome = if use_tools {
            self.function_calling_path(&input, provider.as_ref(), tools, outcome)
                .await
        } else {
            self.direct_path(&input, provider.as_ref(), &tools, outcome).await
        };
        Ok(outcome)
    }

    /// Caller language wins; otherwise an isolated round-trip through the
    /// default provider. Any failure means `en_US`.
    async fn resolve_language(&self, input: &AskInput) -> (Language, DetectionMethod) {
        if let Some(code) = &input.lang {
            let language = Language::parse_or_default(code);
            if language.code() != code.trim() {
                warn!(requested = %code, "Unsupported language, using en_US");
            }
            return (language, DetectionMethod::Provided);
        }

        let provider = match self.providers.default_provider() {
            Ok(provider) => provider,
            Err(e) => {
                warn!(error = %e, "No provider for language detection");
                return (Language::EnUs, DetectionMethod::Fallback);
            }
        };

        let prompt = PromptTemplate::language_detection(&input.message);
        match AssertUnwindSafe(provider.complete_isolated(&prompt))
            .catch_unwind()
            .await
        {
            Ok(response) => (
                Language::parse_detection_response(&response),
                DetectionMethod::AiIsolated,
            ),
            Err(_) => {
                warn!("Language detection panicked, using en_US");
                (Language::EnUs, DetectionMethod::Fallback)
            }
        }
    }

    async fn function_calling_path(
        &self,
        input: &AskInput,
        provider: &dyn LlmProvider,
        tools: Arc<ToolRegistry>,
        mut outcome: OrchestrationOutcome,
    ) -> OrchestrationOutcome {
        let lang = outcome.language;
        let descriptions = PromptTemplate::tool_descriptions(&tools.for_channel(input.channel));
        let prompt =
            PromptTemplate::function_calling_main(&input.message, &descriptions, lang, input.channel);
        debug!("Function calling prompt:\n{}", prompt);

        let request = CompletionRequest::new(
            prompt,
            input.message.clone(),
            lang,
            CompletionPurpose::FunctionCalling,
        )
        .with_history(input.history.clone())
        .with_tools(tools.codes());
        let raw = provider.complete(&request).await;
        debug!("Model response:\n{}", raw);

        let report = self.parser.parse_with_report(&raw);
        for skip in &report.skipped {
            warn!(reason = %skip.reason, raw = %ellipsize(&skip.raw, 120), "Skipped malformed function call");
        }

        outcome.workflow = WorkflowPath::FunctionCalling;
        outcome.prompt_used = FUNCTION_CALLING_MAIN.to_string();

        if report.calls.is_empty() {
            info!("No function calls in response, answering with raw text");
            outcome.answer = raw.clone();
            outcome.ai_raw_response = Some(raw);
            return outcome;
        }

        info!(calls = report.calls.len(), "Parsed function calls");
        let executor = FunctionCallExecutor::new(tools);
        let results = executor.execute(&report.calls, lang).await;
        outcome.answer = self.integrator.integrate(&input.message, &results, lang);
        outcome.function_calling_used = true;
        outcome.function_calls_made = report.calls.len();
        outcome.function_calls = report.calls;
        outcome.function_results = results;
        outcome.ai_raw_response = Some(raw);
        outcome
    }

    async fn direct_path(
        &self,
        input: &AskInput,
        provider: &dyn LlmProvider,
        tools: &ToolRegistry,
        mut outcome: OrchestrationOutcome,
    ) -> OrchestrationOutcome {
        let lang = outcome.language;
        let descriptions = PromptTemplate::tool_descriptions(&tools.for_channel(input.channel));
        let (prompt_code, prompt) =
            PromptTemplate::channel_system(input.channel, &input.message, &descriptions, lang);
        debug!("Direct prompt:\n{}", prompt);

        let request =
            CompletionRequest::new(prompt, input.message.clone(), lang, CompletionPurpose::Direct)
                .with_history(input.history.clone())
                .with_tools(tools.codes());
        outcome.answer = provider.complete(&request).await;
        outcome.prompt_used = prompt_code.to_string();
        outcome.workflow = WorkflowPath::Direct;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentic_domain::{ParsedFunctionCall, Tool, ToolCategory, ToolDefinition, ToolError};
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted provider: isolated replies and completion replies are
    /// popped from queues, and every request is recorded.
    struct ScriptedProvider {
        code: String,
        isolated: Mutex<VecDeque<String>>,
        completions: Mutex<VecDeque<String>>,
        requests: Mutex<Vec<CompletionRequest>>,
        isolated_prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn new(code: &str, isolated: &[&str], completions: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                code: code.to_string(),
                isolated: Mutex::new(isolated.iter().map(|s| s.to_string()).collect()),
                completions: Mutex::new(completions.iter().map(|s| s.to_string()).collect()),
                requests: Mutex::new(Vec::new()),
                isolated_prompts: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn isolated_calls(&self) -> usize {
            self.isolated_prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn code(&self) -> &str {
            &self.code
        }

        fn name(&self) -> &str {
            "Scripted"
        }

        async fn complete(&self, request: &CompletionRequest) -> String {
            self.requests.lock().unwrap().push(request.clone());
            self.completions
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_default()
        }

        async fn complete_isolated(&self, prompt: &str) -> String {
            self.isolated_prompts.lock().unwrap().push(prompt.to_string());
            let next = self.isolated.lock().unwrap().pop_front();
            match next {
                Some(reply) if reply == "PANIC" => panic!("detector crashed"),
                Some(reply) => reply,
                None => "en_US".to_string(),
            }
        }
    }

    struct Catalog {
        default: Option<Arc<ScriptedProvider>>,
        others: Vec<Arc<ScriptedProvider>>,
    }

    impl ProviderCatalog for Catalog {
        fn resolve(&self, code: Option<&str>) -> Result<Arc<dyn LlmProvider>, ProviderError> {
            match code {
                None => self
                    .default
                    .clone()
                    .map(|p| p as Arc<dyn LlmProvider>)
                    .ok_or_else(|| ProviderError::NotFound("default".to_string())),
                Some(code) => self
                    .others
                    .iter()
                    .chain(self.default.iter())
                    .find(|p| p.code == code)
                    .map(|p| Arc::clone(p) as Arc<dyn LlmProvider>)
                    .ok_or_else(|| ProviderError::NotFound(code.to_string())),
            }
        }
    }

    struct FixedTool {
        definition: ToolDefinition,
        reply: Value,
    }

    #[async_trait]
    impl Tool for FixedTool {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        async fn execute(&self, _call: &ParsedFunctionCall) -> Result<Value, ToolError> {
            Ok(self.reply.clone())
        }
    }

    fn registry() -> Arc<ToolRegistry> {
        let mut registry = ToolRegistry::new();
        let tools = [
            ("product_search", ToolCategory::Product, json!({"products": [{"name": "Lac Mat", "price": 50, "available": true}]})),
            ("company_info", ToolCategory::General, json!({"company_name": "Acme"})),
            (
                "stock_check",
                ToolCategory::Inventory,
                json!({"product_name": "Widget", "quantity": 5, "status": "In Stock"}),
            ),
        ];
        for (code, category, reply) in tools {
            registry
                .register(Arc::new(FixedTool {
                    definition: ToolDefinition::new(code, code, "test", category),
                    reply,
                }))
                .unwrap();
        }
        Arc::new(registry)
    }

    fn orchestrator(provider: Arc<ScriptedProvider>) -> ConversationOrchestrator {
        let catalog = Catalog {
            default: Some(provider),
            others: Vec::new(),
        };
        ConversationOrchestrator::new(Arc::new(catalog), registry())
    }

    #[tokio::test]
    async fn test_function_calling_path_end_to_end() {
        let provider = ScriptedProvider::new(
            "ollama",
            &["ro_RO"],
            &[r#"FUNCTION_CALL[product_search](query="lac parchet")"#],
        );
        let outcome = orchestrator(provider.clone())
            .ask(AskInput::new("Ce lac recomanzi pentru parchet?", Channel::Livechat))
            .await
            .unwrap();

        assert_eq!(outcome.language, Language::RoRo);
        assert_eq!(outcome.language_detection_method, DetectionMethod::AiIsolated);
        assert_eq!(outcome.workflow, WorkflowPath::FunctionCalling);
        assert!(outcome.function_calling_used);
        assert_eq!(outcome.function_calls_made, 1);
        assert_eq!(outcome.prompt_used, "function_calling_main");
        assert!(outcome.answer.starts_with("Am găsit acest produs: Lac Mat"));
        assert_eq!(outcome.tools_available, 2);

        let request = &provider.requests()[0];
        assert_eq!(request.purpose, CompletionPurpose::FunctionCalling);
        assert!(request.prompt.contains("- product_search: product_search - test"));
        assert!(!request.prompt.contains("stock_check:"));
    }

    #[tokio::test]
    async fn test_unsupported_language_falls_back_to_english() {
        let provider = ScriptedProvider::new("ollama", &[], &["Hello!"]);
        let outcome = orchestrator(provider.clone())
            .ask(AskInput::new("What time is it?", Channel::Internal).with_lang("fr_FR"))
            .await
            .unwrap();

        assert_eq!(outcome.language, Language::EnUs);
        assert_eq!(outcome.language_detection_method, DetectionMethod::Provided);
        assert_eq!(provider.isolated_calls(), 0);
    }

    #[tokio::test]
    async fn test_direct_path_uses_channel_prompt() {
        let provider = ScriptedProvider::new("ollama", &["hu_HU"], &["Szia!"]);
        let outcome = orchestrator(provider.clone())
            .ask(AskInput::new("Jó napot!", Channel::Internal))
            .await
            .unwrap();

        assert_eq!(outcome.workflow, WorkflowPath::Direct);
        assert_eq!(outcome.answer, "Szia!");
        assert_eq!(outcome.prompt_used, "internal_unrestricted_system");
        assert!(!outcome.function_calling_used);
        assert!(outcome.ai_raw_response.is_none());
        assert_eq!(outcome.tools_available, 3);

        let request = &provider.requests()[0];
        assert_eq!(request.purpose, CompletionPurpose::Direct);
        assert!(request.prompt.contains("Team member request: Jó napot!"));
    }

    #[tokio::test]
    async fn test_no_calls_in_response_returns_raw_text() {
        let provider = ScriptedProvider::new("ollama", &["en_US"], &["We sell paint and lacquer."]);
        let outcome = orchestrator(provider)
            .ask(AskInput::new("Do you have paint?", Channel::Livechat))
            .await
            .unwrap();

        assert_eq!(outcome.workflow, WorkflowPath::FunctionCalling);
        assert!(!outcome.function_calling_used);
        assert_eq!(outcome.answer, "We sell paint and lacquer.");
        assert_eq!(outcome.ai_raw_response.as_deref(), Some("We sell paint and lacquer."));
    }

    #[tokio::test]
    async fn test_detection_panic_falls_back_to_english() {
        let provider = ScriptedProvider::new("ollama", &["PANIC"], &["ok"]);
        let outcome = orchestrator(provider)
            .ask(AskInput::new("Ce mai faci?", Channel::Livechat))
            .await
            .unwrap();

        assert_eq!(outcome.language, Language::EnUs);
        assert_eq!(outcome.language_detection_method, DetectionMethod::Fallback);
    }

    #[tokio::test]
    async fn test_detection_uses_default_provider_not_requested_one() {
        let default = ScriptedProvider::new("ollama", &["hu_HU"], &[]);
        let requested = ScriptedProvider::new("claude", &["ro_RO"], &["Helló"]);
        let catalog = Catalog {
            default: Some(default.clone()),
            others: vec![requested.clone()],
        };
        let orchestrator = ConversationOrchestrator::new(Arc::new(catalog), registry());

        let outcome = orchestrator
            .ask(AskInput::new("Helló", Channel::Internal).with_provider("claude"))
            .await
            .unwrap();

        assert_eq!(outcome.language, Language::HuHu);
        assert_eq!(outcome.provider_code, "claude");
        assert_eq!(default.isolated_calls(), 1);
        assert_eq!(requested.isolated_calls(), 0);
        assert_eq!(requested.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_provider_is_configuration_error() {
        let catalog = Catalog {
            default: None,
            others: Vec::new(),
        };
        let orchestrator = ConversationOrchestrator::new(Arc::new(catalog), registry());
        let result = orchestrator
            .ask(AskInput::new("hello", Channel::Livechat).with_lang("en_US"))
            .await;

        assert!(matches!(
            result,
            Err(AskError::Configuration(ProviderError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_internal_channel_can_reach_stock_tool() {
        let provider = ScriptedProvider::new(
            "ollama",
            &["en_US"],
            &["FUNCTION_CALL[stock_check](product_name=\"Widget\") FUNCTION_CALL[nope]()"],
        );
        let outcome = orchestrator(provider)
            .ask(AskInput::new("Do you have Widget in stock?", Channel::Internal))
            .await
            .unwrap();

        assert_eq!(outcome.function_calls_made, 2);
        assert_eq!(outcome.failed_calls(), 1);
        assert_eq!(outcome.answer, "Stock for Widget: 5 units. Status: In Stock.");
    }
}
