//! LLM provider adapters
//!
//! One type per vendor behind the [`LlmProvider`] port, selected by
//! [`ProviderKind`]. Only Ollama talks to a real backend; the other
//! vendors answer with a fixed "not implemented" text.

pub mod catalog;
pub mod ollama;
pub mod unimplemented;

pub use catalog::ConfiguredProviderCatalog;
pub use ollama::OllamaProvider;
pub use unimplemented::UnimplementedProvider;

use crate::config::{FileProviderConfig, FileProviderKind};
use agentic_application::{LlmProvider, ProviderError};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Ollama,
    OpenAi,
    Claude,
    Gemini,
}

impl ProviderKind {
    /// Map a configured kind; `custom` has no adapter
    pub fn from_config(kind: FileProviderKind) -> Result<Self, ProviderError> {
        match kind {
            FileProviderKind::Ollama => Ok(ProviderKind::Ollama),
            FileProviderKind::Openai => Ok(ProviderKind::OpenAi),
            FileProviderKind::Claude => Ok(ProviderKind::Claude),
            FileProviderKind::Gemini => Ok(ProviderKind::Gemini),
            FileProviderKind::Custom => Err(ProviderError::UnknownKind(kind.as_str().to_string())),
        }
    }

    pub fn vendor(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => "Ollama",
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Claude => "Claude",
            ProviderKind::Gemini => "Gemini",
        }
    }
}

/// Build the adapter for one configured provider
pub fn create_provider(
    config: &FileProviderConfig,
    client: reqwest::Client,
) -> Result<Arc<dyn LlmProvider>, ProviderError> {
    let provider: Arc<dyn LlmProvider> = match ProviderKind::from_config(config.kind)? {
        ProviderKind::Ollama => Arc::new(OllamaProvider::new(config.clone(), client)),
        kind => Arc::new(UnimplementedProvider::new(kind, config)),
    };
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(kind: FileProviderKind) -> FileProviderConfig {
        FileProviderConfig {
            code: "main".to_string(),
            model: "m1".to_string(),
            kind,
            ..Default::default()
        }
    }

    #[test]
    fn test_factory_builds_every_vendor() {
        for kind in [
            FileProviderKind::Ollama,
            FileProviderKind::Openai,
            FileProviderKind::Claude,
            FileProviderKind::Gemini,
        ] {
            let provider = create_provider(&config(kind), reqwest::Client::new()).unwrap();
            assert_eq!(provider.code(), "main");
        }
    }

    #[test]
    fn test_factory_rejects_custom() {
        let result = create_provider(&config(FileProviderKind::Custom), reqwest::Client::new());
        assert!(matches!(result, Err(ProviderError::UnknownKind(kind)) if kind == "custom"));
    }
}
