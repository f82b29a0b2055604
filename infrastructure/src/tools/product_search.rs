//! Free-text product search (`product_search` and `meili_product_search`)

use super::common::{SearchContext, call_language, call_limit, hit, lang_parameter, limit_parameter};
use agentic_domain::core::text::ellipsize;
use agentic_domain::search::filter_literal;
use agentic_domain::tool::codes::{MEILI_PRODUCT_SEARCH, PRODUCT_SEARCH};
use agentic_domain::{
    Language, ParamType, ParsedFunctionCall, SearchRequest, Tool, ToolCategory, ToolDefinition,
    ToolError, ToolParameter,
};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{info, warn};

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 50;
const DESCRIPTION_CHARS: usize = 200;

const SEARCH_KEYWORDS: [&str; 12] = [
    "produs", "product", "termék", "cauta", "search", "keres", "pret", "price", "ár", "brand",
    "marca", "márka",
];

fn search_parameters(definition: ToolDefinition) -> ToolDefinition {
    definition
        .with_parameter(ToolParameter::new("query", "Search terms", true))
        .with_parameter(lang_parameter())
        .with_parameter(ToolParameter::new("category_filter", "Category name to filter by", false))
        .with_parameter(ToolParameter::new("brand_filter", "Brand name to filter by", false))
        .with_parameter(
            ToolParameter::new("available_only", "Only return products in stock", false)
                .with_type(ParamType::Boolean),
        )
        .with_parameter(limit_parameter("Maximum results (default: 10, max: 50)"))
        .with_parameter(ToolParameter::new("price_range", "Price range as min-max, e.g. 50-200", false))
        .with_keywords(SEARCH_KEYWORDS)
        .with_priority(80)
        .with_timeout(15)
}

pub fn product_search_definition() -> ToolDefinition {
    search_parameters(ToolDefinition::new(
        PRODUCT_SEARCH,
        "Product Search",
        "Search products by name, code, brand or description with optional filters",
        ToolCategory::Product,
    ))
    .with_usage_context("Use when the user names a specific product, brand or product code.")
}

pub fn meili_product_search_definition() -> ToolDefinition {
    search_parameters(ToolDefinition::new(
        MEILI_PRODUCT_SEARCH,
        "Enhanced Multilingual Product Search",
        "Typo-tolerant multilingual product search with ranking scores",
        ToolCategory::Search,
    ))
    .with_usage_context("Use for fuzzy or misspelled product names in any supported language.")
}

/// Filter expression built from the optional call parameters
fn build_filter(call: &ParsedFunctionCall) -> Option<String> {
    let mut parts = Vec::new();

    if call.get_bool("available_only").unwrap_or(false) {
        parts.push("available = true".to_string());
    }
    if let Some(brand) = call.get_str("brand_filter").filter(|b| !b.trim().is_empty()) {
        parts.push(format!("brand = {}", filter_literal(brand.trim())));
    }
    if let Some(range) = call.get_str("price_range").filter(|r| !r.trim().is_empty()) {
        match parse_price_range(&range) {
            Some((min, max)) => parts.push(format!("price >= {} AND price <= {}", min, max)),
            None => warn!(price_range = %range, "Ignoring invalid price range"),
        }
    }
    if let Some(category) = call.get_str("category_filter").filter(|c| !c.trim().is_empty()) {
        let literal = filter_literal(category.trim());
        let alternatives: Vec<String> = Language::ALL
            .iter()
            .map(|l| format!("categories_combined_{} CONTAINS {}", l.suffix(), literal))
            .collect();
        parts.push(format!("({})", alternatives.join(" OR ")));
    }

    (!parts.is_empty()).then(|| parts.join(" AND "))
}

fn parse_price_range(range: &str) -> Option<(f64, f64)> {
    let (min, max) = range.split_once('-')?;
    let min: f64 = min.trim().parse().ok()?;
    let max: f64 = max.trim().parse().ok()?;
    (min <= max).then_some((min, max))
}

fn product_entry(item: &Value, lang: Language) -> Value {
    let suffix = lang.suffix();
    json!({
        "id": hit::id(item),
        "name": hit::localized(item, "name", suffix, "Unknown Product"),
        "default_code": hit::text(item, "default_code"),
        "price": hit::number(item, "price"),
        "currency": "RON",
        "available": hit::flag(item, "available"),
        "brand": hit::text(item, "brand"),
        "category": hit::localized(item, "category_name", suffix, "Uncategorized"),
        "description": ellipsize(&hit::localized(item, "description", suffix, ""), DESCRIPTION_CHARS),
        "ranking_score": hit::number(item, "_rankingScore"),
        "language": lang.code(),
    })
}

/// Backs both free-text search tools; only the definition differs
pub struct ProductSearchTool {
    definition: ToolDefinition,
    search: SearchContext,
}

impl ProductSearchTool {
    pub fn product_search(search: SearchContext) -> Self {
        Self {
            definition: product_search_definition(),
            search,
        }
    }

    pub fn meili_product_search(search: SearchContext) -> Self {
        Self {
            definition: meili_product_search_definition(),
            search,
        }
    }
}

#[async_trait]
impl Tool for ProductSearchTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, call: &ParsedFunctionCall) -> Result<Value, ToolError> {
        let query = call.require_str("query")?;
        let lang = call_language(call);
        let suffix = lang.suffix();
        let limit = call_limit(call, DEFAULT_LIMIT, MAX_LIMIT);
        let filter = build_filter(call);

        info!(tool = %self.definition.code, query = %query, lang = %lang, filter = ?filter, "Searching products");

        let mut request = SearchRequest::new(query.trim())
            .with_limit(limit)
            .with_ranking_score()
            .searching_on([
                "default_code".to_string(),
                format!("name_{}", suffix),
                "name_en".to_string(),
                "brand".to_string(),
                format!("description_{}", suffix),
                format!("categories_combined_{}", suffix),
            ]);
        if let Some(filter) = &filter {
            request = request.with_filter(filter.clone());
        }

        let response = self.search.search(&request).await?;
        let products: Vec<Value> = response.hits.iter().map(|item| product_entry(item, lang)).collect();

        Ok(json!({
            "products": products,
            "total_found": response.total(),
            "search_time_ms": response.processing_time_ms.unwrap_or(0),
            "search_quality": "enhanced_meilisearch",
            "language_used": lang.code(),
            "query_analyzed": query.trim(),
            "filters_applied": filter,
            "multilingual_search": true,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::common::test_support::search_context;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_filter_combines_all_options() {
        let call = ParsedFunctionCall::new("product_search")
            .with_param("query", "lac")
            .with_param("available_only", true)
            .with_param("brand_filter", "Bona")
            .with_param("price_range", "50-200")
            .with_param("category_filter", "Lacuri");
        assert_eq!(
            build_filter(&call).unwrap(),
            "available = true AND brand = 'Bona' AND price >= 50 AND price <= 200 AND \
             (categories_combined_en CONTAINS 'Lacuri' OR categories_combined_ro CONTAINS 'Lacuri' \
             OR categories_combined_hu CONTAINS 'Lacuri')"
        );
    }

    #[test]
    fn test_invalid_price_range_is_skipped() {
        let call = ParsedFunctionCall::new("product_search").with_param("price_range", "cheap");
        assert_eq!(build_filter(&call), None);
        assert_eq!(parse_price_range("300-100"), None);
        assert_eq!(parse_price_range(" 10.5 - 20 "), Some((10.5, 20.0)));
    }

    #[test]
    fn test_definitions_share_parameters() {
        let plain = product_search_definition();
        let meili = meili_product_search_definition();
        assert_eq!(plain.parameters.len(), meili.parameters.len());
        assert_eq!(meili.category, ToolCategory::Search);
        assert_eq!(plain.priority, 80);
    }

    #[tokio::test]
    async fn test_search_maps_hits() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/indexes/products/search"))
            .and(body_partial_json(json!({
                "q": "bona traffic",
                "limit": 5,
                "filter": "available = true",
                "showRankingScore": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": [{
                    "id": 42,
                    "name_hu": "Bona Traffic HD",
                    "default_code": "BT-HD",
                    "price": "420.5",
                    "available": true,
                    "brand": "Bona",
                    "category_name_en": "Lacquers",
                    "description_hu": "x".repeat(250),
                    "_rankingScore": 0.93
                }],
                "estimatedTotalHits": 7,
                "processingTimeMs": 4
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = ProductSearchTool::meili_product_search(search_context(&server));
        let call = ParsedFunctionCall::new("meili_product_search")
            .with_param("query", " bona traffic ")
            .with_param("lang", "hu_HU")
            .with_param("available_only", true)
            .with_param("limit", 5);

        let payload = tool.execute(&call).await.unwrap();
        let product = &payload["products"][0];
        assert_eq!(product["name"], "Bona Traffic HD");
        assert_eq!(product["price"], 420.5);
        assert_eq!(product["category"], "Lacquers");
        assert_eq!(product["language"], "hu_HU");
        assert!(product["description"].as_str().unwrap().chars().count() <= DESCRIPTION_CHARS + 3);
        assert_eq!(payload["total_found"], 7);
        assert_eq!(payload["search_time_ms"], 4);
        assert_eq!(payload["query_analyzed"], "bona traffic");
        assert_eq!(payload["filters_applied"], "available = true");
    }

    #[tokio::test]
    async fn test_missing_query_is_invalid() {
        let server = MockServer::start().await;
        let tool = ProductSearchTool::product_search(search_context(&server));
        let err = tool.execute(&ParsedFunctionCall::new("product_search")).await.unwrap_err();
        assert_eq!(err.code, ToolError::INVALID_ARGUMENT);
    }
}
