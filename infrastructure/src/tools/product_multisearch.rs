//! product_multisearch tool: staged product search driven by extracted keywords
//!
//! 1. Primary query: top 3 objects and top 2 properties
//! 2. Up to 2 secondary queries (`primary + room`) while results are short
//! 3. Hits de-duplicated by `id` and tagged with the keywords they contain

use super::common::{SearchContext, call_language, call_limit, hit, lang_parameter, limit_parameter};
use agentic_domain::tool::codes::{EXTRACTED_KEYWORDS_PARAM, PRODUCT_MULTISEARCH};
use agentic_domain::{
    ExtractionKeywords, Language, ParsedFunctionCall, SearchRequest, Tool, ToolCategory,
    ToolDefinition, ToolError, ToolParameter,
};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{info, warn};

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 50;
const MAX_SECONDARY: usize = 2;
const KEYWORDS_SHOWN: usize = 10;

pub fn product_multisearch_definition() -> ToolDefinition {
    ToolDefinition::new(
        PRODUCT_MULTISEARCH,
        "Multi-Keyword Product Search (JSON-Powered)",
        "Advanced product search using AI-extracted structured keywords for maximum precision",
        ToolCategory::Product,
    )
    .with_parameter(ToolParameter::new(
        EXTRACTED_KEYWORDS_PARAM,
        "JSON string with extracted keywords from keyword_extraction tool",
        true,
    ))
    .with_parameter(lang_parameter())
    .with_parameter(limit_parameter("Maximum results (default: 10)"))
    .with_keywords([
        "produs", "produse", "product", "products", "termék", "termékek", "cauta", "search",
        "gaseste", "find", "keres", "recommendation", "recomanzi",
    ])
    .with_usage_context(
        "Use this tool AFTER keyword_extraction when user needs product search. \
         Pass the JSON output from keyword_extraction directly to this tool.",
    )
    .with_priority(90)
    .with_timeout(15)
}

/// Queries derived from the keyword buckets
#[derive(Debug, Clone, PartialEq)]
struct SearchPlan {
    primary: String,
    secondary: Vec<String>,
}

impl SearchPlan {
    fn from_keywords(keywords: &ExtractionKeywords) -> Self {
        let terms: Vec<&str> = keywords
            .objects
            .iter()
            .take(3)
            .chain(keywords.properties.iter().take(2))
            .map(String::as_str)
            .collect();
        let joined = terms.join(" ");

        let secondary = keywords
            .rooms
            .iter()
            .take(MAX_SECONDARY)
            .map(|room| format!("{} {}", joined, room).trim().to_string())
            .collect();

        Self {
            primary: if joined.is_empty() {
                "products".to_string()
            } else {
                joined
            },
            secondary,
        }
    }
}

pub struct ProductMultisearchTool {
    definition: ToolDefinition,
    search: SearchContext,
}

impl ProductMultisearchTool {
    pub fn new(search: SearchContext) -> Self {
        Self {
            definition: product_multisearch_definition(),
            search,
        }
    }

    fn request(query: &str, limit: usize, suffix: &str) -> SearchRequest {
        SearchRequest::new(query)
            .with_limit(limit)
            .retrieving(["*"])
            .with_ranking_score()
            .searching_on([
                "default_code".to_string(),
                format!("name_{}", suffix),
                "brand".to_string(),
                format!("description_{}", suffix),
                format!("categories_combined_{}", suffix),
            ])
    }

    async fn run_plan(&self, plan: &SearchPlan, limit: usize, suffix: &str) -> Result<Vec<Value>, ToolError> {
        let mut hits = self
            .search
            .search(&Self::request(&plan.primary, limit, suffix))
            .await?
            .hits;
        info!(query = %plan.primary, hits = hits.len(), "Primary search");

        for query in &plan.secondary {
            if hits.len() >= limit {
                break;
            }
            let remaining = limit - hits.len();
            match self.search.search(&Self::request(query, remaining, suffix)).await {
                Ok(response) => {
                    let before = hits.len();
                    for candidate in response.hits {
                        // Hits without an id are never merged
                        let duplicate = candidate
                            .get("id")
                            .filter(|id| !id.is_null())
                            .is_some_and(|id| hits.iter().any(|h| h.get("id") == Some(id)));
                        if !duplicate {
                            hits.push(candidate);
                        }
                    }
                    info!(query = %query, added = hits.len() - before, "Secondary search");
                }
                Err(e) => warn!(query = %query, error = %e, "Secondary search failed"),
            }
        }

        hits.truncate(limit);
        Ok(hits)
    }
}

fn product_entry(item: &Value, keywords: &ExtractionKeywords, lang: Language) -> Value {
    let suffix = lang.suffix();
    let haystack = [
        hit::text(item, &format!("name_{}", suffix)),
        hit::text(item, &format!("description_{}", suffix)),
        hit::text(item, "brand"),
        hit::text(item, &format!("categories_combined_{}", suffix)),
    ]
    .join(" ")
    .to_lowercase();

    json!({
        "id": hit::id(item),
        "name": hit::localized(item, "name", suffix, "Unknown"),
        "price": hit::number(item, "price"),
        "currency": "RON",
        "brand": hit::text(item, "brand"),
        "available": hit::flag(item, "available"),
        "ranking_score": hit::number(item, "_rankingScore"),
        "language": lang.code(),
        "keyword_matches": keywords.matches_in(&haystack),
    })
}

#[async_trait]
impl Tool for ProductMultisearchTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, call: &ParsedFunctionCall) -> Result<Value, ToolError> {
        let raw = call.require_str(EXTRACTED_KEYWORDS_PARAM)?;
        let keywords = ExtractionKeywords::from_json_str(&raw).map_err(ToolError::invalid_argument)?;
        let lang = call_language(call);
        let limit = call_limit(call, DEFAULT_LIMIT, MAX_LIMIT);

        let plan = SearchPlan::from_keywords(&keywords);
        info!(lang = %lang, primary = %plan.primary, secondary = plan.secondary.len(), "Multi-keyword product search");

        let hits = self.run_plan(&plan, limit, lang.suffix()).await?;
        let products: Vec<Value> = hits
            .iter()
            .map(|item| product_entry(item, &keywords, lang))
            .collect();

        Ok(json!({
            "total_found": products.len(),
            "products": products,
            "search_method": "ai_multisearch",
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
