//! Document search wire types.
//!
//! Body and reply of `POST /indexes/{index}/search`. Only the fields the
//! tools use are modelled.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_search_on: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_retrieve: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_ranking_score: Option<bool>,
}

impl SearchRequest {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Empty filters are dropped
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        let filter = filter.into();
        self.filter = (!filter.trim().is_empty()).then_some(filter);
        self
    }

    pub fn searching_on<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes_to_search_on = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    pub fn retrieving<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes_to_retrieve = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_ranking_score(mut self) -> Self {
        self.show_ranking_score = Some(true);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<Value>,
    #[serde(default)]
    pub estimated_total_hits: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,
}

impl SearchResponse {
    /// Estimated total, or the number of returned hits when absent
    pub fn total(&self) -> u64 {
        self.estimated_total_hits.unwrap_or(self.hits.len() as u64)
    }
}

/// Quote a value for a filter expression
pub fn filter_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_camel_case_and_skips_unset() {
        let request = SearchRequest::new("lac")
            .with_limit(5)
            .searching_on(["name_ro^3"])
            .with_ranking_score()
            .with_filter("  ");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"q": "lac", "limit": 5, "attributesToSearchOn": ["name_ro^3"], "showRankingScore": true})
        );
    }

    #[test]
    fn test_response_defaults() {
        let response: SearchResponse = serde_json::from_value(json!({"hits": [{"id": 1}]})).unwrap();
        assert_eq!(response.total(), 1);
        let response: SearchResponse =
            serde_json::from_value(json!({"hits": [], "estimatedTotalHits": 40, "processingTimeMs": 3})).unwrap();
        assert_eq!(response.total(), 40);
        assert_eq!(response.processing_time_ms, Some(3));
    }

    #[test]
    fn test_filter_literal_escapes_quotes() {
        assert_eq!(filter_literal("Kleiberit"), "'Kleiberit'");
        assert_eq!(filter_literal("O'Neil"), "'O\\'Neil'");
    }
}
