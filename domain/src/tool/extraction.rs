//! Structured keyword extraction model.
//!
//! The `keyword_extraction` tool asks the model to sort the user's words
//! into fixed buckets. Its payload is later serialized into the
//! `extracted_keywords` parameter of the multi-search tools, which read it
//! back through [`ExtractionKeywords::from_value`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::language::Language;

pub const DEFAULT_INTENT: &str = "product_search";

/// Bucket names in the order they are flattened
pub const BUCKETS: [&str; 5] = ["objects", "properties", "rooms", "actions", "context"];

/// The keyword buckets plus an intent label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionKeywords {
    pub objects: Vec<String>,
    pub properties: Vec<String>,
    pub rooms: Vec<String>,
    pub actions: Vec<String>,
    pub context: Vec<String>,
    pub intent: String,
}

impl Default for ExtractionKeywords {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            properties: Vec::new(),
            rooms: Vec::new(),
            actions: Vec::new(),
            context: Vec::new(),
            intent: DEFAULT_INTENT.to_string(),
        }
    }
}

impl ExtractionKeywords {
    /// Lenient read of a JSON object.
    ///
    /// Missing buckets become empty, a scalar bucket becomes a one-item list
    /// when truthy, and a missing intent becomes `product_search`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let bucket = |name: &str| normalize_bucket(object.get(name));
        let intent = match object.get("intent") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Null) | None => DEFAULT_INTENT.to_string(),
            Some(Value::String(_)) => DEFAULT_INTENT.to_string(),
            Some(other) => other.to_string(),
        };

        Some(Self {
            objects: bucket("objects"),
            properties: bucket("properties"),
            rooms: bucket("rooms"),
            actions: bucket("actions"),
            context: bucket("context"),
            intent,
        })
    }

    /// Parse free model text: the JSON between the first `{` and the last `}`
    pub fn parse_response(response: &str) -> Result<Self, String> {
        let text = response.trim();
        let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
            return Err("no JSON object in extraction response".to_string());
        };
        if end <= start {
            return Err("no JSON object in extraction response".to_string());
        }
        let value: Value = serde_json::from_str(&text[start..=end])
            .map_err(|e| format!("invalid extraction JSON: {}", e))?;
        Self::from_value(&value).ok_or_else(|| "extraction JSON is not an object".to_string())
    }

    /// Parse the serialized form passed between tools
    pub fn from_json_str(raw: &str) -> Result<Self, String> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| format!("invalid extracted_keywords: {}", e))?;
        Self::from_value(&value)
            .ok_or_else(|| "extracted_keywords must be a JSON object".to_string())
    }

    fn buckets(&self) -> [(&'static str, &Vec<String>); 5] {
        [
            ("objects", &self.objects),
            ("properties", &self.properties),
            ("rooms", &self.rooms),
            ("actions", &self.actions),
            ("context", &self.context),
        ]
    }

    /// Number of keywords across all buckets
    pub fn total(&self) -> usize {
        self.buckets().iter().map(|(_, words)| words.len()).sum()
    }

    /// Every keyword, bucket by bucket, capped at `limit`
    pub fn flatten(&self, limit: usize) -> Vec<String> {
        self.buckets()
            .iter()
            .flat_map(|(_, words)| words.iter().cloned())
            .take(limit)
            .collect()
    }

    /// Names of the buckets holding at least one keyword
    pub fn filled_buckets(&self) -> Vec<&'static str> {
        self.buckets()
            .iter()
            .filter(|(_, words)| !words.is_empty())
            .map(|(name, _)| *name)
            .collect()
    }

    /// Keywords found in a lower-cased haystack
    pub fn matches_in(&self, haystack_lower: &str) -> Vec<String> {
        self.buckets()
            .iter()
            .flat_map(|(_, words)| words.iter())
            .filter(|word| !word.is_empty() && haystack_lower.contains(&word.to_lowercase()))
            .cloned()
            .collect()
    }
}

fn normalize_bucket(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) if s.trim().is_empty() => Vec::new(),
        Some(Value::String(s)) => vec![s.trim().to_string()],
        Some(Value::Bool(false)) => Vec::new(),
        Some(other) => vec![other.to_string()],
    }
}

/// Payload returned by the `keyword_extraction` tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(flatten)]
    pub keywords: ExtractionKeywords,
    pub extraction_success: bool,
    pub language_detected: Language,
    pub total_keywords: usize,
    pub original_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    pub fn success(keywords: ExtractionKeywords, message: &str, lang: Language) -> Self {
        Self {
            total_keywords: keywords.total(),
            keywords,
            extraction_success: true,
            language_detected: lang,
            original_message: message.to_string(),
            error: None,
        }
    }

    /// Degraded result: the whole message becomes a single search object
    pub fn fallback(message: &str, lang: Language, error: impl Into<String>) -> Self {
        let keywords = ExtractionKeywords {
            objects: vec![message.to_lowercase()],
            actions: vec!["search".to_string()],
            ..ExtractionKeywords::default()
        };
        Self {
            keywords,
            extraction_success: false,
            language_detected: lang,
            total_keywords: 1,
            original_message: message.to_string(),
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_response_with_surrounding_text() {
        let response = r#"Sure! Here you go:
{"objects": ["pardoseala", "lac"], "properties": ["reziste", "apa"], "rooms": ["bucatarie"],
 "actions": ["recomanzi"], "context": ["proiect", "acasa"], "intent": "recommendation"}
Hope this helps."#;
        let keywords = ExtractionKeywords::parse_response(response).unwrap();
        assert_eq!(keywords.objects, vec!["pardoseala", "lac"]);
        assert_eq!(keywords.rooms, vec!["bucatarie"]);
        assert_eq!(keywords.intent, "recommendation");
        assert_eq!(keywords.total(), 8);
    }

    #[test]
    fn test_missing_and_scalar_buckets_are_normalized() {
        let keywords =
            ExtractionKeywords::from_value(&json!({"objects": "vopsea", "rooms": "", "context": null}))
                .unwrap();
        assert_eq!(keywords.objects, vec!["vopsea"]);
        assert!(keywords.rooms.is_empty());
        assert!(keywords.properties.is_empty());
        assert_eq!(keywords.intent, DEFAULT_INTENT);
    }

    #[test]
    fn test_parse_response_without_json_fails() {
        assert!(ExtractionKeywords::parse_response("I cannot help").is_err());
        assert!(ExtractionKeywords::parse_response("} nope {").is_err());
    }

    #[test]
    fn test_flatten_and_matches() {
        let keywords = ExtractionKeywords {
            objects: vec!["lac".into(), "parchet".into()],
            properties: vec!["mat".into()],
            ..Default::default()
        };
        assert_eq!(keywords.flatten(2), vec!["lac", "parchet"]);
        assert_eq!(keywords.filled_buckets(), vec!["objects", "properties"]);
        assert_eq!(
            keywords.matches_in("lac pentru parchet lucios"),
            vec!["lac", "parchet"]
        );
    }

    #[test]
    fn test_fallback_result_shape() {
        let result = ExtractionResult::fallback("Vopsea ALBA", Language::RoRo, "timeout");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["objects"], json!(["vopsea alba"]));
        assert_eq!(value["actions"], json!(["search"]));
        assert_eq!(value["extraction_success"], false);
        assert_eq!(value["total_keywords"], 1);
        assert_eq!(value["language_detected"], "ro_RO");
        assert_eq!(value["error"], "timeout");
    }

    #[test]
    fn test_success_round_trips_through_from_value() {
        let keywords = ExtractionKeywords {
            objects: vec!["festék".into()],
            ..Default::default()
        };
        let value = serde_json::to_value(ExtractionResult::success(
            keywords.clone(),
            "festék kell",
            Language::HuHu,
        ))
        .unwrap();
        assert_eq!(value["total_keywords"], 1);
        assert_eq!(ExtractionKeywords::from_value(&value), Some(keywords));
    }
}
