//! Provider configuration from TOML (`[[providers]]` entries)

use serde::{Deserialize, Serialize};

/// Backend family a provider talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileProviderKind {
    #[default]
    Ollama,
    Openai,
    Claude,
    Gemini,
    Custom,
}

impl FileProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileProviderKind::Ollama => "ollama",
            FileProviderKind::Openai => "openai",
            FileProviderKind::Claude => "claude",
            FileProviderKind::Gemini => "gemini",
            FileProviderKind::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Unique code used to select the provider
    pub code: String,
    /// Display name (falls back to the code)
    pub name: String,
    pub kind: FileProviderKind,
    pub endpoint_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub is_default: bool,
    pub is_active: bool,
    /// Lower sorts first
    pub sequence: i32,
    pub timeout_seconds: u64,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Token cap for isolated calls (language detection, keyword extraction)
    pub isolated_max_tokens: u32,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            kind: FileProviderKind::default(),
            endpoint_url: "http://localhost:11434/api/chat".to_string(),
            model: String::new(),
            api_key: None,
            is_default: false,
            is_active: true,
            sequence: 10,
            timeout_seconds: 30,
            temperature: 0.7,
            max_tokens: 1000,
            isolated_max_tokens: 256,
        }
    }
}

impl FileProviderConfig {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.code
        } else {
            &self.name
        }
    }
}
