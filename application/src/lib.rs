//! Application layer for agentic-livechat
//!
//! This crate contains the use cases and the ports they drive.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    llm_provider::{
        CompletionPurpose, CompletionRequest, LlmProvider, ProviderCatalog, ProviderError,
    },
    search_backend::{SearchBackend, SearchError},
};
pub use use_cases::ask::{AskError, AskInput, ConversationOrchestrator};
pub use use_cases::execute_calls::FunctionCallExecutor;
