//! Lenient read-side views of tool payloads.
//!
//! Tools return free-form JSON. The integrator only needs a handful of
//! fields, so every view defaults missing or mistyped fields instead of
//! rejecting the whole payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        Value::Null | Value::Bool(false) => None,
        other => Some(other.to_string()),
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

fn lenient_strings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: for<'a> Deserialize<'a>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn read<T: for<'a> Deserialize<'a> + Default>(value: &Value) -> T {
    serde_json::from_value(value.clone()).unwrap_or_default()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductItem {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub currency: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub available: bool,
}

impl ProductItem {
    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or("RON")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExtractionSummary {
    #[serde(deserialize_with = "lenient_opt_string")]
    pub intent: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductPayload {
    #[serde(deserialize_with = "lenient_vec")]
    pub products: Vec<ProductItem>,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_found: f64,
    #[serde(deserialize_with = "lenient_strings")]
    pub keywords_used: Vec<String>,
    pub extraction_summary: Option<ExtractionSummary>,
}

impl ProductPayload {
    pub fn from_value(value: &Value) -> Self {
        read(value)
    }

    pub fn intent(&self) -> Option<&str> {
        self.extraction_summary
            .as_ref()
            .and_then(|s| s.intent.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryItem {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub product_count: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryPayload {
    #[serde(deserialize_with = "lenient_vec")]
    pub categories: Vec<CategoryItem>,
}

impl CategoryPayload {
    pub fn from_value(value: &Value) -> Self {
        read(value)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StockPayload {
    #[serde(deserialize_with = "lenient_opt_string")]
    pub error: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub product_name: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub quantity: f64,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub status: Option<String>,
}

impl StockPayload {
    pub fn from_value(value: &Value) -> Self {
        read(value)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompanyPayload {
    #[serde(deserialize_with = "lenient_opt_string")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub website: Option<String>,
}

impl CompanyPayload {
    pub fn from_value(value: &Value) -> Self {
        read(value)
    }
}

/// Extraction fields the closing summary line needs
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExtractionPayload {
    #[serde(deserialize_with = "lenient_bool")]
    pub extraction_success: bool,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_keywords: f64,
}

impl ExtractionPayload {
    pub fn from_value(value: &Value) -> Self {
        read(value)
    }
}
