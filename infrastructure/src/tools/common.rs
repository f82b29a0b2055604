//! Helpers shared by the search-backed tools

use agentic_application::SearchBackend;
use agentic_domain::search::filter_literal;
use agentic_domain::tool::codes::LANG_PARAM;
use agentic_domain::{Language, ParamType, ParsedFunctionCall, SearchRequest, SearchResponse, ToolError, ToolParameter};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Index-bound handle on the search backend
#[derive(Clone)]
pub struct SearchContext {
    backend: Arc<dyn SearchBackend>,
    index: String,
}

impl SearchContext {
    pub fn new(backend: Arc<dyn SearchBackend>, index: impl Into<String>) -> Self {
        Self {
            backend,
            index: index.into(),
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ToolError> {
        self.backend
            .search(&self.index, request)
            .await
            .map_err(|e| ToolError::execution_failed(format!("Search failed: {}", e)))
    }

    /// Products whose category path contains `path`; failures count as zero
    pub async fn count_in_category(&self, path: &str, suffix: &str) -> u64 {
        let request = SearchRequest::new("")
            .with_limit(1)
            .with_filter(category_filter(path, &[suffix, "en"]))
            .retrieving(["id"]);
        match self.search(&request).await {
            Ok(response) => response.total(),
            Err(e) => {
                debug!(category = %path, error = %e, "Category count failed");
                0
            }
        }
    }
}

/// Language of the call, `en_US` when missing or unsupported
pub fn call_language(call: &ParsedFunctionCall) -> Language {
    call.get_str(LANG_PARAM)
        .map(|code| Language::parse_or_default(&code))
        .unwrap_or_default()
}

/// `limit` parameter clamped to `1..=max`
pub fn call_limit(call: &ParsedFunctionCall, default: usize, max: usize) -> usize {
    call.get_i64("limit")
        .map(|n| n.clamp(1, max as i64) as usize)
        .unwrap_or(default)
}

pub fn lang_parameter() -> ToolParameter {
    ToolParameter::new("lang", "Language code (en_US, ro_RO, hu_HU)", false)
}

pub fn limit_parameter(description: &str) -> ToolParameter {
    ToolParameter::new("limit", description, false).with_type(ParamType::Integer)
}

/// `categories_combined_<suffix> CONTAINS '<value>'` joined with `OR`
pub fn category_filter(value: &str, suffixes: &[&str]) -> String {
    let literal = filter_literal(value);
    let mut seen: Vec<&str> = Vec::new();
    for suffix in suffixes {
        if !seen.contains(suffix) {
            seen.push(suffix);
        }
    }
    seen.iter()
        .map(|suffix| format!("categories_combined_{} CONTAINS {}", suffix, literal))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Read helpers over raw search hits
pub mod hit {
    use serde_json::Value;

    pub fn text(hit: &Value, key: &str) -> String {
        match hit.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// `<field>_<suffix>`, then `<field>_en`, then `fallback`
    pub fn localized(hit: &Value, field: &str, suffix: &str, fallback: &str) -> String {
        [format!("{}_{}", field, suffix), format!("{}_en", field)]
            .iter()
            .map(|key| text(hit, key))
            .find(|value| !value.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn number(hit: &Value, key: &str) -> f64 {
        match hit.get(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn flag(hit: &Value, key: &str) -> bool {
        match hit.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            _ => false,
        }
    }

    pub fn id(hit: &Value) -> Value {
        hit.get("id").cloned().unwrap_or(Value::from(0))
    }

    /// String list under `key`; a bare string counts as one entry
    pub fn strings(hit: &Value, key: &str) -> Vec<String> {
        match hit.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str())
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
                .collect(),
            Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    /// Category paths in the given language, English when empty
    pub fn category_paths(hit: &Value, suffix: &str) -> Vec<String> {
        let paths = strings(hit, &format!("categories_{}", suffix));
        if paths.is_empty() {
            strings(hit, "categories_en")
        } else {
            paths
        }
    }
}

/// The other two index suffixes, in fixed order
pub fn other_suffixes(lang: Language) -> Vec<&'static str> {
    Language::ALL
        .iter()
        .map(Language::suffix)
        .filter(|s| *s != lang.suffix())
        .collect()
}

pub fn empty_to_null(value: &str) -> Value {
    if value.trim().is_empty() {
        Value::Null
    } else {
        Value::String(value.to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_filter_deduplicates_suffixes() {
        assert_eq!(
            category_filter("Lacuri", &["en", "en"]),
            "categories_combined_en CONTAINS 'Lacuri'"
        );
        assert_eq!(
            category_filter("Lac's", &["ro", "en"]),
            "categories_combined_ro CONTAINS 'Lac\\'s' OR categories_combined_en CONTAINS 'Lac\\'s'"
        );
    }

    #[test]
    fn test_call_limit_is_clamped() {
        let call = ParsedFunctionCall::new("x").with_param("limit", 500);
        assert_eq!(call_limit(&call, 10, 50), 50);
        let call = ParsedFunctionCall::new("x").with_param("limit", 0);
        assert_eq!(call_limit(&call, 10, 50), 1);
        assert_eq!(call_limit(&ParsedFunctionCall::new("x"), 10, 50), 10);
    }

    #[test]
    fn test_call_language_defaults_to_english() {
        let call = ParsedFunctionCall::new("x").with_param("lang", "fr_FR");
        assert_eq!(call_language(&call), Language::EnUs);
        let call = ParsedFunctionCall::new("x").with_param("lang", "hu_HU");
        assert_eq!(call_language(&call), Language::HuHu);
    }

    #[test]
    fn test_localized_hit_fields() {
        let hit = json!({"name_ro": "", "name_en": "Parquet Lacquer", "categories_en": ["A / B"]});
        assert_eq!(hit::localized(&hit, "name", "ro", "Unknown"), "Parquet Lacquer");
        assert_eq!(hit::localized(&hit, "brand", "ro", "Unknown"), "Unknown");
        assert_eq!(hit::category_paths(&hit, "hu"), vec!["A / B"]);
    }

    #[test]
    fn test_other_suffixes() {
        assert_eq!(other_suffixes(Language::RoRo), vec!["en", "hu"]);
    }
}
