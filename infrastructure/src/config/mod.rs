//! Configuration file loading for agentic-livechat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. `AGENTIC_*` environment variables
//! 3. Project root: `./agentic.toml` or `./.agentic.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/agentic-livechat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentConfig, FileCompanyConfig, FileConfig, FileProviderConfig,
    FileProviderKind, FileSearchConfig,
};
pub use loader::ConfigLoader;
