//! Concrete tools and registry assembly
//!
//! Every tool except `keyword_extraction` and `company_info` reads the
//! product index through a [`SearchContext`]. `keyword_extraction` asks the
//! default provider; `company_info` answers from the `[company]` section.

pub mod category_multisearch;
pub mod common;
pub mod company_info;
pub mod keyword_extraction;
pub mod product_category;
pub mod product_multisearch;
pub mod product_search;
pub mod stock_check;

pub use category_multisearch::CategoryMultisearchTool;
pub use common::SearchContext;
pub use company_info::CompanyInfoTool;
pub use keyword_extraction::KeywordExtractionTool;
pub use product_category::ProductCategoryTool;
pub use product_multisearch::ProductMultisearchTool;
pub use product_search::ProductSearchTool;
pub use stock_check::StockCheckTool;

use crate::config::{FileCompanyConfig, FileConfig};
use crate::search::MeilisearchClient;
use agentic_application::ProviderCatalog;
use agentic_domain::{RegistryError, Tool, ToolError, ToolRegistry};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Register `tools` in order.
///
/// A repeated code replaces the earlier tool in place and is logged.
pub fn build_registry(
    tools: impl IntoIterator<Item = Arc<dyn Tool>>,
) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    for tool in tools {
        let code = tool.code().to_string();
        match registry.register(tool) {
            Ok(Some(_)) => warn!(tool = %code, "Duplicate tool registration, keeping the last one"),
            Ok(None) => debug!(tool = %code, "Registered tool"),
            Err(RegistryError::MissingCode) => {
                return Err(ToolError::configuration("Tool must have a non-empty code"));
            }
            Err(e) => return Err(ToolError::configuration(e.to_string())),
        }
    }
    Ok(registry)
}

/// The built-in tool set over one search context
pub fn default_tools(
    search: SearchContext,
    providers: Arc<dyn ProviderCatalog>,
    company: FileCompanyConfig,
) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(KeywordExtractionTool::new(providers)),
        Arc::new(ProductMultisearchTool::new(search.clone())),
        Arc::new(CategoryMultisearchTool::new(search.clone())),
        Arc::new(ProductSearchTool::product_search(search.clone())),
        Arc::new(ProductSearchTool::meili_product_search(search.clone())),
        Arc::new(ProductCategoryTool::new(search.clone())),
        Arc::new(StockCheckTool::new(search)),
        Arc::new(CompanyInfoTool::new(company)),
    ]
}

/// Registry for the loaded configuration.
///
/// Fails with a configuration error when no active `[search]` section exists.
pub fn build_default_registry(
    config: &FileConfig,
    providers: Arc<dyn ProviderCatalog>,
    client: reqwest::Client,
) -> Result<ToolRegistry, ToolError> {
    let search_config = config
        .active_search()
        .ok_or_else(|| ToolError::configuration("No active search configuration"))?;

    let backend = MeilisearchClient::new(search_config, client);
    let search = SearchContext::new(Arc::new(backend), search_config.products_index.clone());
    let registry = build_registry(default_tools(search, providers, config.company.clone()))?;

    info!(
        tools = registry.len(),
        endpoint = %search_config.endpoint_url,
        index = %search_config.products_index,
        "Tool registry ready"
    );
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileSearchConfig;
    use agentic_application::{LlmProvider, ProviderError};
    use agentic_domain::{Channel, ParsedFunctionCall, ToolCategory, ToolDefinition};
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct NoProviders;

    impl ProviderCatalog for NoProviders {
        fn resolve(&self, code: Option<&str>) -> Result<Arc<dyn LlmProvider>, ProviderError> {
            Err(ProviderError::NotFound(code.unwrap_or("default").to_string()))
        }
    }

    struct Named {
        definition: ToolDefinition,
        reply: &'static str,
    }

    impl Named {
        fn new(code: &str, reply: &'static str) -> Arc<dyn Tool> {
            Arc::new(Self {
                definition: ToolDefinition::new(code, code, "test tool", ToolCategory::General),
                reply,
            })
        }
    }

    #[async_trait]
    impl Tool for Named {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        async fn execute(&self, _call: &ParsedFunctionCall) -> Result<Value, ToolError> {
            Ok(json!(self.reply))
        }
    }

    fn config_with_search() -> FileConfig {
        FileConfig {
            search: Some(FileSearchConfig::default()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_registry_has_every_tool() {
        let registry =
            build_default_registry(&config_with_search(), Arc::new(NoProviders), reqwest::Client::new())
                .unwrap();
        assert_eq!(registry.len(), 8);

        let internal: Vec<&str> = registry
            .for_channel(Channel::Internal)
            .iter()
            .map(|d| d.code.as_str())
            .collect();
        assert_eq!(
            &internal[..3],
            &["keyword_extraction", "product_multisearch", "category_multisearch"]
        );
        assert_eq!(internal.last(), Some(&"company_info"));

        let livechat: Vec<&str> = registry
            .for_channel(Channel::Livechat)
            .iter()
            .map(|d| d.code.as_str())
            .collect();
        assert_eq!(
            livechat,
            vec![
                "product_multisearch",
                "category_multisearch",
                "product_search",
                "product_category",
                "keyword_extraction",
                "company_info",
            ]
        );
    }

    #[test]
    fn test_missing_search_is_configuration_error() {
        let err = build_default_registry(&FileConfig::default(), Arc::new(NoProviders), reqwest::Client::new())
            .unwrap_err();
        assert!(err.is_configuration());

        let mut config = config_with_search();
        if let Some(search) = config.search.as_mut() {
            search.is_active = false;
        }
        assert!(build_default_registry(&config, Arc::new(NoProviders), reqwest::Client::new()).is_err());
    }

    #[tokio::test]
    async fn test_duplicate_code_keeps_last_in_first_position() {
        let registry = build_registry([
            Named::new("company_info", "first"),
            Named::new("stock_check", "stock"),
            Named::new("company_info", "second"),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.codes(), vec!["company_info", "stock_check"]);
        let tool = registry.get("company_info").unwrap();
        let reply = tool.execute(&ParsedFunctionCall::new("company_info")).await.unwrap();
        assert_eq!(reply, json!("second"));
    }

    #[test]
    fn test_empty_code_is_rejected() {
        let err = build_registry([Named::new("  ", "x")]).err().unwrap();
        assert!(err.is_configuration());
    }
}
