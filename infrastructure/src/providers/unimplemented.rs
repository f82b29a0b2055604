//! Placeholder adapters for vendors without an HTTP client yet

use super::ProviderKind;
use crate::config::FileProviderConfig;
use agentic_application::{CompletionRequest, LlmProvider};
use async_trait::async_trait;
use tracing::debug;

pub struct UnimplementedProvider {
    kind: ProviderKind,
    code: String,
    name: String,
    model: String,
}

impl UnimplementedProvider {
    pub fn new(kind: ProviderKind, config: &FileProviderConfig) -> Self {
        Self {
            kind,
            code: config.code.clone(),
            name: config.display_name().to_string(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl LlmProvider for UnimplementedProvider {
    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, _request: &CompletionRequest) -> String {
        debug!(provider = %self.code, "Completion requested from unimplemented vendor");
        format!("[{} {}] Provider not implemented yet.", self.kind.vendor(), self.model)
    }

    async fn complete_isolated(&self, _prompt: &str) -> String {
        "en_US".to_string()
    }
}
