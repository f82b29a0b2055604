//! Request defaults from TOML (`[agent]` section)

use agentic_domain::Channel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Channel used when the caller does not name one
    pub default_channel: String,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            default_channel: Channel::Livechat.as_str().to_string(),
        }
    }
}

impl FileAgentConfig {
    pub fn channel(&self) -> Channel {
        Channel::parse(&self.default_channel)
    }
}
