//! Search backend port

use agentic_domain::{SearchRequest, SearchResponse};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search request failed with HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Search transport error: {0}")]
    Transport(String),

    #[error("Invalid search response: {0}")]
    Decode(String),

    #[error("No active search configuration")]
    NotConfigured,
}

/// Document search over a named index
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, index: &str, request: &SearchRequest)
    -> Result<SearchResponse, SearchError>;
}
