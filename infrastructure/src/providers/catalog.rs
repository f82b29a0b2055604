//! Provider selection over the configured `[[providers]]` list

use super::create_provider;
use crate::config::FileProviderConfig;
use agentic_application::{LlmProvider, ProviderCatalog, ProviderError};
use std::sync::Arc;
use tracing::debug;

/// Active providers, ordered by `sequence`.
///
/// Adapters are built on resolution, so a misconfigured vendor only fails
/// the requests that actually select it.
pub struct ConfiguredProviderCatalog {
    providers: Vec<FileProviderConfig>,
    client: reqwest::Client,
}

impl ConfiguredProviderCatalog {
    pub fn new(configs: &[FileProviderConfig], client: reqwest::Client) -> Self {
        let mut providers: Vec<FileProviderConfig> =
            configs.iter().filter(|p| p.is_active).cloned().collect();
        providers.sort_by_key(|p| p.sequence);
        Self { providers, client }
    }

    /// First `is_default` provider, else the first one
    pub fn default_config(&self) -> Option<&FileProviderConfig> {
        self.providers
            .iter()
            .find(|p| p.is_default)
            .or_else(|| self.providers.first())
    }

    pub fn configs(&self) -> &[FileProviderConfig] {
        &self.providers
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl ProviderCatalog for ConfiguredProviderCatalog {
    fn resolve(&self, code: Option<&str>) -> Result<Arc<dyn LlmProvider>, ProviderError> {
        let config = match code {
            Some(code) => self
                .providers
                .iter()
                .find(|p| p.code == code)
                .ok_or_else(|| ProviderError::NotFound(code.to_string()))?,
            None => self
                .default_config()
                .ok_or_else(|| ProviderError::NotFound("default".to_string()))?,
        };
        debug!(provider = %config.code, kind = config.kind.as_str(), "Resolved provider");
        create_provider(config, self.client.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileProviderKind;

    fn provider(code: &str, sequence: i32) -> FileProviderConfig {
        FileProviderConfig {
            code: code.to_string(),
            model: "m".to_string(),
            sequence,
            ..Default::default()
        }
    }

    fn catalog(configs: Vec<FileProviderConfig>) -> ConfiguredProviderCatalog {
        ConfiguredProviderCatalog::new(&configs, reqwest::Client::new())
    }

    #[test]
    fn test_default_flag_wins_over_sequence() {
        let mut flagged = provider("flagged", 20);
        flagged.is_default = true;
        let catalog = catalog(vec![provider("first", 1), flagged]);

        assert_eq!(catalog.default_provider().unwrap().code(), "flagged");
    }

    #[test]
    fn test_lowest_sequence_is_default_without_flag() {
        let catalog = catalog(vec![provider("late", 30), provider("early", 5)]);
        assert_eq!(catalog.default_provider().unwrap().code(), "early");
    }

    #[test]
    fn test_inactive_providers_are_invisible() {
        let mut inactive = provider("off", 1);
        inactive.is_active = false;
        inactive.is_default = true;
        let catalog = catalog(vec![inactive, provider("on", 2)]);

        assert_eq!(catalog.default_provider().unwrap().code(), "on");
        assert_eq!(
            catalog.resolve(Some("off")).err(),
            Some(ProviderError::NotFound("off".to_string()))
        );
    }

    #[test]
    fn test_no_provider_is_configuration_error() {
        let catalog = catalog(Vec::new());
        assert!(catalog.is_empty());
        assert_eq!(
            catalog.default_provider().err(),
            Some(ProviderError::NotFound("default".to_string()))
        );
    }

    #[test]
    fn test_custom_kind_fails_on_resolution() {
        let mut custom = provider("custom", 1);
        custom.kind = FileProviderKind::Custom;
        let catalog = catalog(vec![custom]);

        assert!(matches!(
            catalog.resolve(Some("custom")),
            Err(ProviderError::UnknownKind(_))
        ));
    }
}
