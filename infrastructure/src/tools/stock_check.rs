//! stock_check tool: availability of a single product

use super::common::{SearchContext, call_language, hit, lang_parameter};
use agentic_domain::tool::codes::STOCK_CHECK;
use agentic_domain::{
    ParamType, ParsedFunctionCall, SearchRequest, TextKey, Tool, ToolCategory, ToolDefinition,
    ToolError, ToolParameter, localized,
};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::info;

pub fn stock_check_definition() -> ToolDefinition {
    ToolDefinition::new(
        STOCK_CHECK,
        "Stock Check",
        "Check product availability and quantity on hand",
        ToolCategory::Inventory,
    )
    .with_parameter(
        ToolParameter::new("product_id", "Product ID", false).with_type(ParamType::Integer),
    )
    .with_parameter(ToolParameter::new("product_name", "Product name", false))
    .with_parameter(lang_parameter())
    .with_keywords([
        "stoc", "stock", "készlet", "disponibil", "available", "elérhető", "raktar", "raktár",
        "inventory",
    ])
    .with_usage_context("Use when the user asks whether a product is available or how many are left.")
    .with_priority(60)
    .with_timeout(10)
}

pub struct StockCheckTool {
    definition: ToolDefinition,
    search: SearchContext,
}

impl StockCheckTool {
    pub fn new(search: SearchContext) -> Self {
        Self {
            definition: stock_check_definition(),
            search,
        }
    }
}

#[async_trait]
impl Tool for StockCheckTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, call: &ParsedFunctionCall) -> Result<Value, ToolError> {
        let lang = call_language(call);
        let suffix = lang.suffix();

        let (request, query) = match (call.get_i64("product_id"), call.get_str("product_name")) {
            (Some(id), _) => (
                SearchRequest::new("").with_filter(format!("id = {}", id)),
                id.to_string(),
            ),
            (None, Some(name)) => (SearchRequest::new(name.trim()), name.trim().to_string()),
            (None, None) => {
                return Err(ToolError::invalid_argument(
                    "Either product_id or product_name is required",
                ));
            }
        };
        info!(query = %query, lang = %lang, "Checking stock");

        let response = self.search.search(&request.with_limit(1)).await?;
        let Some(product) = response.hits.first() else {
            return Ok(json!({
                "error": localized(TextKey::ProductNotFound, lang),
                "query": query,
                "language": lang.code(),
            }));
        };

        let quantity = match product.get("qty_available") {
            Some(Value::Null) | None => {
                if hit::flag(product, "available") {
                    1.0
                } else {
                    0.0
                }
            }
            Some(_) => hit::number(product, "qty_available"),
        };
        let status = if quantity > 0.0 {
            TextKey::InStock
        } else {
            TextKey::OutOfStock
        };
        let unit = hit::text(product, "uom_name");

        Ok(json!({
            "product_id": hit::id(product),
            "product_name": hit::localized(product, "name", suffix, "Unknown Product"),
            "quantity": quantity,
            "status": localized(status, lang),
            "unit": if unit.trim().is_empty() { "Units".to_string() } else { unit },
            "language": lang.code(),
        }))
    }
}
