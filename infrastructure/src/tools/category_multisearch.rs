//! category_multisearch tool: find product categories from extracted keywords

use super::common::{SearchContext, call_language, call_limit, hit, lang_parameter, limit_parameter};
use agentic_domain::tool::codes::{CATEGORY_MULTISEARCH, EXTRACTED_KEYWORDS_PARAM};
use agentic_domain::{
    ExtractionKeywords, Language, ParsedFunctionCall, SearchRequest, Tool, ToolCategory,
    ToolDefinition, ToolError, ToolParameter,
};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

const DEFAULT_LIMIT: usize = 15;
const MAX_LIMIT: usize = 50;
const MAX_TERMS: usize = 8;
const SINGLE_QUERIES: usize = 5;
const PATHS_PER_HIT: usize = 3;
const KEYWORDS_SHOWN: usize = 10;

pub fn category_multisearch_definition() -> ToolDefinition {
    ToolDefinition::new(
        CATEGORY_MULTISEARCH,
        "Multi-Keyword Category Search (JSON-Powered)",
        "Find relevant product categories using AI-extracted structured keywords",
        ToolCategory::Product,
    )
    .with_parameter(ToolParameter::new(
        EXTRACTED_KEYWORDS_PARAM,
        "JSON string with extracted keywords from keyword_extraction tool",
        true,
    ))
    .with_parameter(lang_parameter())
    .with_parameter(limit_parameter("Maximum categories (default: 15)"))
    .with_keywords([
        "categorie", "categorii", "category", "categories", "kategória", "kategóriák", "tip",
        "type", "típus", "sectiune", "section",
    ])
    .with_usage_context(
        "Use this tool AFTER keyword_extraction when user asks about product categories or types. \
         Pass the JSON output from keyword_extraction directly to this tool.",
    )
    .with_priority(88)
    .with_timeout(15)
}

/// Single terms first, then pairs drawn from the leading terms
fn build_queries(keywords: &ExtractionKeywords) -> Vec<String> {
    let terms: Vec<&String> = keywords
        .objects
        .iter()
        .chain(&keywords.rooms)
        .chain(&keywords.context)
        .chain(keywords.properties.iter().take(2))
        .take(MAX_TERMS)
        .collect();

    let mut queries: Vec<String> = terms.iter().take(SINGLE_QUERIES).map(|t| t.to_string()).collect();
    for i in 0..terms.len().min(3) {
        for j in (i + 1)..terms.len().min(4) {
            queries.push(format!("{} {}", terms[i], terms[j]));
        }
    }
    queries
}

#[derive(Debug)]
struct CategoryMatch {
    path: String,
    matched: Vec<String>,
    product_count: u64,
}

/// Insertion-ordered category paths and the queries that reached them
#[derive(Debug, Default)]
struct CategoryCollector {
    found: Vec<CategoryMatch>,
}

impl CategoryCollector {
    fn add(&mut self, path: String, query: &str) {
        match self.found.iter_mut().find(|c| c.path == path) {
            Some(existing) => {
                if !existing.matched.iter().any(|q| q == query) {
                    existing.matched.push(query.to_string());
                }
            }
            None => self.found.push(CategoryMatch {
                path,
                matched: vec![query.to_string()],
                product_count: 0,
            }),
        }
    }
}

pub struct CategoryMultisearchTool {
    definition: ToolDefinition,
    search: SearchContext,
}

impl CategoryMultisearchTool {
    pub fn new(search: SearchContext) -> Self {
        Self {
            definition: category_multisearch_definition(),
            search,
        }
    }

    fn request(query: &str, limit: usize, suffix: &str) -> SearchRequest {
        let mut attributes = vec![format!("categories_combined_{}", suffix)];
        for other in Language::ALL.iter().map(Language::suffix) {
            let name = format!("categories_combined_{}", other);
            if !attributes.contains(&name) {
                attributes.push(name);
            }
        }
        SearchRequest::new(query)
            .with_limit(limit * 2)
            .searching_on(attributes)
            .retrieving([
                format!("categories_combined_{}", suffix),
                format!("categories_{}", suffix),
                "categories_en".to_string(),
                "id".to_string(),
                "template_id".to_string(),
            ])
    }
}

#[async_trait]
impl Tool for CategoryMultisearchTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, call: &ParsedFunctionCall) -> Result<Value, ToolError> {
        let raw = call.require_str(EXTRACTED_KEYWORDS_PARAM)?;
        let keywords = ExtractionKeywords::from_json_str(&raw).map_err(ToolError::invalid_argument)?;
        let lang = call_language(call);
        let suffix = lang.suffix();
        let limit = call_limit(call, DEFAULT_LIMIT, MAX_LIMIT);

        let queries = build_queries(&keywords);
        info!(lang = %lang, queries = queries.len(), "Multi-keyword category search");

        let mut collector = CategoryCollector::default();
        for query in &queries {
            match self.search.search(&Self::request(query, limit, suffix)).await {
                Ok(response) => {
                    for item in &response.hits {
                        for path in hit::category_paths(item, suffix).into_iter().take(PATHS_PER_HIT) {
                            collector.add(path, query);
                        }
                    }
                }
                Err(e) => warn!(query = %query, error = %e, "Category query failed"),
            }
        }

        let mut categories: Vec<CategoryMatch> = collector.found.into_iter().take(limit).collect();
        for category in categories.iter_mut() {
            category.product_count = self.search.count_in_category(&category.path, suffix).await;
            debug!(category = %category.path, count = category.product_count, "Counted products");
        }
        categories.sort_by(|a, b| {
            (b.matched.len(), b.product_count).cmp(&(a.matched.len(), a.product_count))
        });

        let entries: Vec<Value> = categories
            .iter()
            .map(|c| {
                json!({
                    "name": c.path.rsplit('/').next().map(str::trim).unwrap_or(&c.path),
                    "hierarchy_path": c.path,
                    "product_count": c.product_count,
                    "language": lang.code(),
                    "matched_keywords": c.matched,
                })
            })
            .collect();

        Ok(json!({
            "total_found": entries.len(),
            "categories": entries,
            "search_method": "ai_category_multisearch",
            "keywords_used": keywords.flatten(KEYWORDS_SHOWN),
            "extraction_summary": {
                "intent": keywords.intent,
                "total_keywords": keywords.total(),
                "categories": keywords.filled_buckets(),
            },
            "language_used": lang.code(),
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
    fn test_queries_are_singles_then_pairs() {
        let keywords = ExtractionKeywords::from_json_str(
            r#"{"objects": ["lac", "parchet"], "rooms": ["baie"], "properties": ["mat", "lucios", "rapid"]}"#,
        )
        .unwrap();
        assert_eq!(
            build_queries(&keywords),
            vec![
                "lac", "parchet", "baie", "mat", "lucios",
                "lac parchet", "lac baie", "lac mat",
                "parchet baie", "parchet mat",
                "baie mat",
            ]
        );
    }

    #[test]
    fn test_no_terms_means_no_queries() {
        let keywords = ExtractionKeywords::from_json_str(r#"{"actions": ["buy"]}"#).unwrap();
        assert!(build_queries(&keywords).is_empty());
    }

    #[tokio::test]
    async fn test_categories_ranked_by_matches_then_count() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/indexes/products/search"))
            .and(body_partial_json(json!({"q": "lac"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": [
                    {"id": 1, "categories_ro": ["Finisaje / Lacuri", "Finisaje / Grunduri"]},
                    {"id": 2, "categories_ro": ["Finisaje / Lacuri"]}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"q": "parchet"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": [{"id": 3, "categories_ro": ["Finisaje / Lacuri", "Pardoseli / Parchet"]}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"q": "lac parchet"})))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"q": "", "limit": 1})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": [{"id": 9}], "estimatedTotalHits": 12
            })))
            .mount(&server)
            .await;

        let tool = CategoryMultisearchTool::new(search_context(&server));
        let call = ParsedFunctionCall::new("category_multisearch")
            .with_param("extracted_keywords", r#"{"objects": ["lac", "parchet"]}"#)
            .with_param("lang", "ro_RO");

        let payload = tool.execute(&call).await.unwrap();
        let categories = payload["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0]["hierarchy_path"], "Finisaje / Lacuri");
        assert_eq!(categories[0]["name"], "Lacuri");
        assert_eq!(categories[0]["matched_keywords"], json!(["lac", "parchet"]));
        assert_eq!(categories[0]["product_count"], 12);
        assert_eq!(payload["search_method"], "ai_category_multisearch");
        assert_eq!(payload["language_used"], "ro_RO");
    }
}
