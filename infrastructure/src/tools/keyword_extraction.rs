//! keyword_extraction tool: sort the user's words into keyword buckets

use super::common::{call_language, lang_parameter};
use agentic_application::ProviderCatalog;
use agentic_domain::tool::codes::KEYWORD_EXTRACTION;
use agentic_domain::{
    ExtractionKeywords, ExtractionResult, Language, ParsedFunctionCall, PromptTemplate, Tool,
    ToolCategory, ToolDefinition, ToolError, ToolParameter,
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

pub fn keyword_extraction_definition() -> ToolDefinition {
    ToolDefinition::new(
        KEYWORD_EXTRACTION,
        "AI Keyword Extraction (Structured)",
        "Extract structured keywords from user messages using AI intelligence",
        ToolCategory::General,
    )
    .with_parameter(ToolParameter::new(
        "user_message",
        "The user's message to analyze for keyword extraction",
        true,
    ))
    .with_parameter(lang_parameter())
    .with_keywords([
        "extract", "analyze", "keywords", "intent", "understand", "extrage", "analizeaza",
        "cuvinte", "intentie", "intelege", "elemez", "kulcsszavak", "szándék", "megért",
    ])
    .with_usage_context(
        "Always use this tool FIRST when user asks about products, recommendations, or any search-related queries. \
         This tool extracts structured keywords to improve search precision.",
    )
    .with_priority(100)
}

/// Runs the extraction prompt through the default provider.
///
/// Never fails on model trouble: an unreachable provider or unreadable
/// answer degrades to [`ExtractionResult::fallback`].
pub struct KeywordExtractionTool {
    definition: ToolDefinition,
    providers: Arc<dyn ProviderCatalog>,
}

impl KeywordExtractionTool {
    pub fn new(providers: Arc<dyn ProviderCatalog>) -> Self {
        Self {
            definition: keyword_extraction_definition(),
            providers,
        }
    }

    async fn extract(&self, message: &str, lang: Language) -> Result<ExtractionKeywords, String> {
        let provider = self.providers.default_provider().map_err(|e| e.to_string())?;
        let prompt = PromptTemplate::keyword_extraction_structured(message, lang);
        let response = provider.complete_isolated(&prompt).await;
        info!(provider = provider.code(), "Extraction response: {}", response);
        ExtractionKeywords::parse_response(&response)
    }
}

#[async_trait]
impl Tool for KeywordExtractionTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, call: &ParsedFunctionCall) -> Result<Value, ToolError> {
        let message = call.require_str("user_message")?;
        let lang = call_language(call);
        info!(lang = %lang, "Extracting keywords");

        let result = match self.extract(&message, lang).await {
            Ok(keywords) => {
                let result = ExtractionResult::success(keywords, &message, lang);
                info!(total = result.total_keywords, "Keywords extracted");
                result
            }
            Err(e) => {
                warn!(error = %e, "Keyword extraction failed, using fallback");
                ExtractionResult::fallback(&message, lang, format!("Keyword extraction failed: {}", e))
            }
        };

        serde_json::to_value(result).map_err(|e| ToolError::execution_failed(e.to_string()))
    }
}
