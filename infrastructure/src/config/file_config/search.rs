//! Search endpoint configuration from TOML (`[search]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// Base URL, e.g. `http://localhost:7700`
    pub endpoint_url: String,
    /// Sent as a bearer token when set
    pub api_key: Option<String>,
    pub products_index: String,
    pub timeout_seconds: u64,
    pub is_active: bool,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            endpoint_url: "http://localhost:7700".to_string(),
            api_key: None,
            products_index: "products".to_string(),
            timeout_seconds: 15,
            is_active: true,
        }
    }
}
