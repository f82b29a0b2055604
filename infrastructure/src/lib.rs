//! Infrastructure layer for agentic-livechat
//!
//! Adapters for the ports defined in the application layer: TOML/env
//! configuration loading, LLM provider adapters, the document search client
//! and the concrete tools.

pub mod config;
pub mod providers;
pub mod search;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileCompanyConfig, FileConfig,
    FileProviderConfig, FileProviderKind, FileSearchConfig,
};
pub use providers::{
    ConfiguredProviderCatalog, OllamaProvider, ProviderKind, UnimplementedProvider,
    create_provider,
};
pub use search::MeilisearchClient;
pub use tools::{SearchContext, build_default_registry, build_registry, default_tools};
