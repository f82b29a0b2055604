//! LLM provider port
//!
//! Defines the interface for talking to a language model backend.
//! Implementations (adapters) live in the infrastructure layer.

use agentic_domain::{ChatTurn, Language};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while resolving a provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("No active provider found: {0}")]
    NotFound(String),

    #[error("Unknown provider kind: {0}")]
    UnknownKind(String),

    #[error("Provider configuration error: {0}")]
    Configuration(String),
}

/// What a completion is for; adapters shape the message list from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionPurpose {
    /// The prompt already embeds tools and the user request
    FunctionCalling,
    /// The prompt is a system prompt; the user message is sent on its own
    Direct,
}

/// A completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub user_message: String,
    pub history: Vec<ChatTurn>,
    /// Codes of the tools visible to the model
    pub tools: Vec<String>,
    pub language: Language,
    pub purpose: CompletionPurpose,
}

impl CompletionRequest {
    pub fn new(
        prompt: impl Into<String>,
        user_message: impl Into<String>,
        language: Language,
        purpose: CompletionPurpose,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            user_message: user_message.into(),
            history: Vec::new(),
            tools: Vec::new(),
            language,
            purpose,
        }
    }

    pub fn with_history(mut self, history: Vec<ChatTurn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_tools(mut self, tools: Vec<String>) -> Self {
        self.tools = tools;
        self
    }
}

/// A language model backend.
///
/// Completions never fail: transport and HTTP problems come back as
/// descriptive text, so the caller always has something to show.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn code(&self) -> &str;

    fn name(&self) -> &str;

    async fn complete(&self, request: &CompletionRequest) -> String;

    /// Single user message, no system prompt, low temperature.
    /// Used for language detection and keyword extraction.
    async fn complete_isolated(&self, prompt: &str) -> String;
}

/// Resolves configured providers
pub trait ProviderCatalog: Send + Sync {
    /// Active provider with the given code, or the default one when `None`
    fn resolve(&self, code: Option<&str>) -> Result<Arc<dyn LlmProvider>, ProviderError>;

    fn default_provider(&self) -> Result<Arc<dyn LlmProvider>, ProviderError> {
        self.resolve(None)
    }
}
