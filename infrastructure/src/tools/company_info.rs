//! company_info tool: answers from the `[company]` section

use super::common::{call_language, empty_to_null, lang_parameter};
use crate::config::FileCompanyConfig;
use agentic_domain::tool::codes::COMPANY_INFO;
use agentic_domain::{
    ParsedFunctionCall, Tool, ToolCategory, ToolDefinition, ToolError, ToolParameter,
};
use async_trait::async_trait;
use serde_json::{Map, Value, json};

const INFO_TYPES: [&str; 4] = ["basic", "contact", "address", "all"];

pub fn company_info_definition() -> ToolDefinition {
    ToolDefinition::new(
        COMPANY_INFO,
        "Company Information",
        "Company name, contact details and address",
        ToolCategory::General,
    )
    .with_parameter(
        ToolParameter::new("info_type", "basic, contact, address or all (default: basic)", false)
            .with_allowed_values(INFO_TYPES),
    )
    .with_parameter(lang_parameter())
    .with_keywords([
        "companie", "company", "cég", "firma", "contact", "kapcsolat", "adresa", "address", "cím",
        "telefon", "phone", "email",
    ])
    .with_usage_context("Use when the user asks who you are, how to reach the company or where it is.")
    .with_priority(50)
    .with_timeout(5)
}

pub struct CompanyInfoTool {
    definition: ToolDefinition,
    company: FileCompanyConfig,
}

impl CompanyInfoTool {
    pub fn new(company: FileCompanyConfig) -> Self {
        Self {
            definition: company_info_definition(),
            company,
        }
    }
}

#[async_trait]
impl Tool for CompanyInfoTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, call: &ParsedFunctionCall) -> Result<Value, ToolError> {
        let lang = call_language(call);
        let info_type = call
            .get_str("info_type")
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_else(|| "basic".to_string());
        if !INFO_TYPES.contains(&info_type.as_str()) {
            return Err(ToolError::invalid_argument(format!(
                "Unknown info_type: {}",
                info_type
            )));
        }
        let all = info_type == "all";
        let c = &self.company;

        let mut info = Map::new();
        info.insert("company_name".into(), empty_to_null(&c.name));
        info.insert("language".into(), json!(lang.code()));
        if all || info_type == "basic" {
            info.insert("currency".into(), empty_to_null(&c.currency));
            info.insert("country".into(), empty_to_null(&c.country));
        }
        if all || info_type == "contact" {
            info.insert("email".into(), empty_to_null(&c.email));
            info.insert("phone".into(), empty_to_null(&c.phone));
            info.insert("website".into(), empty_to_null(&c.website));
        }
        if all || info_type == "address" {
            info.insert("street".into(), empty_to_null(&c.street));
            info.insert("city".into(), empty_to_null(&c.city));
            info.insert("zip".into(), empty_to_null(&c.zip));
            info.insert("country".into(), empty_to_null(&c.country));
        }

        Ok(Value::Object(info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> CompanyInfoTool {
        CompanyInfoTool::new(FileCompanyConfig {
            name: "Parchet Expert SRL".to_string(),
            email: "office@example.ro".to_string(),
            city: "Cluj-Napoca".to_string(),
            country: "Romania".to_string(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_basic_is_default() {
        let payload = tool().execute(&ParsedFunctionCall::new("company_info")).await.unwrap();
        assert_eq!(payload["company_name"], "Parchet Expert SRL");
        assert_eq!(payload["currency"], "RON");
        assert!(payload.get("email").is_none());
        assert_eq!(payload["language"], "en_US");
    }

    #[tokio::test]
    async fn test_contact_blanks_become_null() {
        let call = ParsedFunctionCall::new("company_info").with_param("info_type", "contact");
        let payload = tool().execute(&call).await.unwrap();
        assert_eq!(payload["email"], "office@example.ro");
        assert_eq!(payload["phone"], Value::Null);
        assert!(payload.get("currency").is_none());
    }

    #[tokio::test]
    async fn test_all_includes_address() {
        let call = ParsedFunctionCall::new("company_info").with_param("info_type", "ALL");
        let payload = tool().execute(&call).await.unwrap();
        assert_eq!(payload["city"], "Cluj-Napoca");
        assert_eq!(payload["website"], Value::Null);
        assert_eq!(payload["country"], "Romania");
    }

    #[tokio::test]
    async fn test_unknown_info_type_is_invalid() {
        let call = ParsedFunctionCall::new("company_info").with_param("info_type", "salary");
        let err = tool().execute(&call).await.unwrap_err();
        assert_eq!(err.code, ToolError::INVALID_ARGUMENT);
    }
}
