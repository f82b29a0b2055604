//! Tool registry
//!
//! Built once at startup and shared behind an `Arc`. Request handling only
//! reads from it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::entities::ToolDefinition;
use super::traits::Tool;
use crate::core::channel::Channel;
use crate::core::error::RegistryError;

/// Registry of tools keyed by code, preserving registration order
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// Re-registering a code replaces the earlier tool in place and returns it.
    pub fn register(
        &mut self,
        tool: Arc<dyn Tool>,
    ) -> Result<Option<Arc<dyn Tool>>, RegistryError> {
        let code = tool.code().trim().to_string();
        if code.is_empty() {
            return Err(RegistryError::MissingCode);
        }

        match self.index.get(&code) {
            Some(&position) => {
                let previous = std::mem::replace(&mut self.tools[position], tool);
                Ok(Some(previous))
            }
            None => {
                self.index.insert(code, self.tools.len());
                self.tools.push(tool);
                Ok(None)
            }
        }
    }

    pub fn get(&self, code: &str) -> Result<Arc<dyn Tool>, RegistryError> {
        self.index
            .get(code)
            .map(|&position| Arc::clone(&self.tools[position]))
            .ok_or_else(|| RegistryError::NotFound(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// All tools in registration order
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.iter()
    }

    /// All definitions in registration order
    pub fn definitions(&self) -> Vec<&ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    pub fn codes(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.code().to_string()).collect()
    }

    /// Codes of every tool with a keyword occurring in the message. No ranking.
    pub fn find_by_keyword(&self, message: &str) -> Vec<String> {
        self.tools
            .iter()
            .filter(|t| t.definition().matches_intent(message))
            .map(|t| t.code().to_string())
            .collect()
    }

    /// Definitions visible on a channel.
    ///
    /// Grouped by the channel's category order, each group by priority
    /// descending. Unrestricted channels get everything by priority.
    pub fn for_channel(&self, channel: Channel) -> Vec<&ToolDefinition> {
        match channel.allowed_categories() {
            Some(categories) => categories
                .iter()
                .flat_map(|category| {
                    sorted_by_priority(
                        self.definitions()
                            .into_iter()
                            .filter(|d| d.category == *category)
                            .collect(),
                    )
                })
                .collect(),
            None => sorted_by_priority(self.definitions()),
        }
    }

    /// A registry holding only the tools visible on a channel, in listing order
    pub fn restricted_to(&self, channel: Channel) -> ToolRegistry {
        let mut scoped = ToolRegistry::new();
        for def in self.for_channel(channel) {
            if let Ok(tool) = self.get(&def.code) {
                scoped.index.insert(def.code.clone(), scoped.tools.len());
                scoped.tools.push(tool);
            }
        }
        scoped
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

fn sorted_by_priority(mut defs: Vec<&ToolDefinition>) -> Vec<&ToolDefinition> {
    defs.sort_by(|a, b| b.priority.cmp(&a.priority));
    defs
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.codes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{ParsedFunctionCall, ToolCategory};
    use crate::tool::value_objects::ToolError;
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct StaticTool {
        definition: ToolDefinition,
        reply: Value,
    }

    impl StaticTool {
        fn arc(code: &str, category: ToolCategory, priority: i32) -> Arc<dyn Tool> {
            Self::with_reply(code, category, priority, json!({"code": code}))
        }

        fn with_reply(code: &str, category: ToolCategory, priority: i32, reply: Value) -> Arc<dyn Tool> {
            Arc::new(Self {
                definition: ToolDefinition::new(code, code, "test tool", category)
                    .with_priority(priority)
                    .with_keywords([code.split('_').next().unwrap_or(code)]),
                reply,
            })
        }
    }

    #[async_trait]
    impl Tool for StaticTool {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        async fn execute(&self, _call: &ParsedFunctionCall) -> Result<Value, ToolError> {
            Ok(self.reply.clone())
        }
    }

    fn sample() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(StaticTool::arc("company_info", ToolCategory::General, 50)).unwrap();
        registry.register(StaticTool::arc("stock_check", ToolCategory::Inventory, 60)).unwrap();
        registry.register(StaticTool::arc("product_search", ToolCategory::Product, 80)).unwrap();
        registry.register(StaticTool::arc("keyword_extraction", ToolCategory::General, 100)).unwrap();
        registry.register(StaticTool::arc("product_multisearch", ToolCategory::Product, 90)).unwrap();
        registry
    }

    #[test]
    fn test_register_rejects_empty_code() {
        let mut registry = ToolRegistry::new();
        let result = registry.register(StaticTool::arc("  ", ToolCategory::General, 1));
        assert_eq!(result.err(), Some(RegistryError::MissingCode));
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let registry = sample();
        let err = registry.get("weather").err().unwrap();
        assert_eq!(err, RegistryError::NotFound("weather".to_string()));
    }

    #[test]
    fn test_all_keeps_registration_order() {
        assert_eq!(
            sample().codes(),
            vec![
                "company_info",
                "stock_check",
                "product_search",
                "keyword_extraction",
                "product_multisearch"
            ]
        );
    }

    #[tokio::test]
    async fn test_duplicate_registration_last_wins_in_place() {
        let mut registry = sample();
        let replacement = StaticTool::with_reply(
            "stock_check",
            ToolCategory::Inventory,
            60,
            json!({"replaced": true}),
        );
        let previous = registry.register(replacement).unwrap();
        assert!(previous.is_some());
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.codes()[1], "stock_check");

        let tool = registry.get("stock_check").unwrap();
        let output = tool.execute(&ParsedFunctionCall::new("stock_check")).await.unwrap();
        assert_eq!(output, json!({"replaced": true}));
    }

    #[test]
    fn test_find_by_keyword() {
        let registry = sample();
        let found = registry.find_by_keyword("Do you have PRODUCT X in STOCK?");
        assert_eq!(found, vec!["stock_check", "product_search", "product_multisearch"]);
        assert!(registry.find_by_keyword("hello").is_empty());
    }

    #[test]
    fn test_livechat_listing_is_product_then_general() {
        let registry = sample();
        let codes: Vec<&str> = registry
            .for_channel(Channel::Livechat)
            .iter()
            .map(|d| d.code.as_str())
            .collect();
        assert_eq!(
            codes,
            vec!["product_multisearch", "product_search", "keyword_extraction", "company_info"]
        );
    }

    #[test]
    fn test_internal_listing_is_everything_by_priority() {
        let registry = sample();
        let codes: Vec<&str> = registry
            .for_channel(Channel::Internal)
            .iter()
            .map(|d| d.code.as_str())
            .collect();
        assert_eq!(
            codes,
            vec![
                "keyword_extraction",
                "product_multisearch",
                "product_search",
                "stock_check",
                "company_info"
            ]
        );
    }

    #[test]
    fn test_restricted_registry_hides_other_categories() {
        let scoped = sample().restricted_to(Channel::Livechat);
        assert_eq!(scoped.len(), 4);
        assert!(!scoped.contains("stock_check"));
        assert!(scoped.get("product_search").is_ok());
    }
}
