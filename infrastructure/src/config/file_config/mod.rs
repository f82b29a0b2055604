//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is `#[serde(default)]`, so a partial file is valid.

mod agent;
mod company;
mod providers;
mod search;

pub use agent::FileAgentConfig;
pub use company::FileCompanyConfig;
pub use providers::{FileProviderConfig, FileProviderKind};
pub use search::FileSearchConfig;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("provider code cannot be empty")]
    EmptyProviderCode,

    #[error("provider '{0}' has no model")]
    EmptyModelName(String),

    #[error("provider code '{0}' is configured more than once")]
    DuplicateProviderCode(String),

    #[error("{0}: timeout_seconds cannot be 0")]
    InvalidTimeout(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model backends (`[[providers]]`)
    pub providers: Vec<FileProviderConfig>,
    /// Search endpoint; tools backed by search need it
    pub search: Option<FileSearchConfig>,
    /// Company details answered by `company_info`
    pub company: FileCompanyConfig,
    /// Request defaults
    pub agent: FileAgentConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let mut seen = HashSet::new();
        for provider in &self.providers {
            let code = provider.code.trim();
            if code.is_empty() {
                return Err(ConfigValidationError::EmptyProviderCode);
            }
            if provider.model.trim().is_empty() {
                return Err(ConfigValidationError::EmptyModelName(code.to_string()));
            }
            if provider.timeout_seconds == 0 {
                return Err(ConfigValidationError::InvalidTimeout(format!(
                    "providers.{}",
                    code
                )));
            }
            if !seen.insert(code) {
                return Err(ConfigValidationError::DuplicateProviderCode(
                    code.to_string(),
                ));
            }
        }

        if let Some(search) = &self.search
            && search.timeout_seconds == 0
        {
            return Err(ConfigValidationError::InvalidTimeout("search".to_string()));
        }

        Ok(())
    }

    /// The active search section, if any
    pub fn active_search(&self) -> Option<&FileSearchConfig> {
        self.search.as_ref().filter(|s| s.is_active)
    }
}
