//! Prompt templates for the conversation flow

use crate::core::channel::Channel;
use crate::core::language::Language;
use crate::tool::entities::ToolDefinition;

/// Template codes reported in `OrchestrationOutcome::prompt_used`
pub const FUNCTION_CALLING_MAIN: &str = "function_calling_main";
pub const LIVECHAT_BUSINESS_SYSTEM: &str = "livechat_business_system";
pub const INTERNAL_UNRESTRICTED_SYSTEM: &str = "internal_unrestricted_system";

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Isolated detection prompt; the answer is read with
    /// [`Language::parse_detection_response`]
    pub fn language_detection(user_message: &str) -> String {
        format!(
            r#"LANGUAGE_DETECTION_TASK

Analyze this text and return ONLY the language code - nothing else:

TEXT: "{}"

RESPONSE_FORMAT: Return exactly one of these codes:
- ro_RO (if Romanian)
- hu_HU (if Hungarian)
- en_US (if English or any other language)

CRITICAL: Return ONLY the language code, no greetings, no explanations, no additional text.

LANGUAGE_CODE:"#,
            user_message
        )
    }

    /// Tool listing, one [`ToolDefinition::prompt_line`] per tool
    pub fn tool_descriptions(tools: &[&ToolDefinition]) -> String {
        tools
            .iter()
            .map(|t| t.prompt_line())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Prompt of the function-calling path
    pub fn function_calling_main(
        user_message: &str,
        available_tools: &str,
        lang: Language,
        channel: Channel,
    ) -> String {
        let code = lang.code();
        let name = lang.name();
        format!(
            r#"You are an intelligent AI assistant with function calling capabilities.

LANGUAGE: Respond in {name} ({code})
CHANNEL: {channel}

AVAILABLE TOOLS:
{available_tools}

FUNCTION CALLING INSTRUCTIONS:

1. ANALYZE USER REQUEST:
   - What is the user asking for?
   - Which tools can help answer their question?
   - Do I need to call tools or can I answer directly?

2. WHEN TO CALL FUNCTIONS:
   - User asks about products -> call keyword_extraction first, then product_multisearch
   - User asks about categories -> call keyword_extraction first, then category_multisearch
   - User asks about stock/inventory -> use stock_check
   - User asks about company info -> use company_info
   - Multiple tools may be needed for complex requests

3. HOW TO CALL FUNCTIONS:
   Format: FUNCTION_CALL[tool_name](parameter1="value1", parameter2="value2")

   Examples:
   - FUNCTION_CALL[keyword_extraction](user_message="{user_message}", lang="{code}")
   - FUNCTION_CALL[product_multisearch](lang="{code}", limit=5)
   - FUNCTION_CALL[product_search](query="zowohome", lang="{code}")
   - FUNCTION_CALL[stock_check](product_name="Dell XPS", lang="{code}")
   - FUNCTION_CALL[company_info](info_type="contact", lang="{code}")

4. AFTER CALLING FUNCTIONS:
   - Wait for tool results
   - Integrate results into natural response in {name}
   - Be helpful and conversational

USER REQUEST: {user_message}

Analyze the request and either respond directly or make appropriate function calls to gather information first."#
        )
    }

    /// Direct-path system prompt for public visitors
    pub fn livechat_business_system(user_message: &str, business_tools: &str, lang: Language) -> String {
        let code = lang.code();
        let name = lang.name();
        format!(
            r#"You are a business assistant for our company's website livechat.

LANGUAGE: Respond in {name} ({code})

IMPORTANT RESTRICTIONS:
- Only help with business-related questions (products, services, company info)
- Available business tools: {business_tools}
- If asked about non-business topics, politely redirect to business matters
- Be professional, helpful, and concise
- Maintain conversation in {name}

Customer message: {user_message}

Provide helpful business-focused assistance in {name} or politely redirect off-topic questions."#
        )
    }

    /// Direct-path system prompt for staff
    pub fn internal_unrestricted_system(user_message: &str, all_tools: &str, lang: Language) -> String {
        let code = lang.code();
        let name = lang.name();
        format!(
            r#"You are an advanced AI assistant for internal team members.

LANGUAGE: Communicate in {name} ({code})

FULL ACCESS MODE:
- Use any available tools: {all_tools}
- Help with any task (business, technical, administrative)
- Provide detailed, comprehensive responses
- All tools support multilingual operation
- Maintain conversation in {name}

Team member request: {user_message}

Provide thorough assistance in {name} using all available capabilities."#
        )
    }

    /// Direct-path system prompt for the given channel, with its template code
    pub fn channel_system(
        channel: Channel,
        user_message: &str,
        tools: &str,
        lang: Language,
    ) -> (&'static str, String) {
        match channel {
            Channel::Livechat => (
                LIVECHAT_BUSINESS_SYSTEM,
                Self::livechat_business_system(user_message, tools, lang),
            ),
            Channel::Internal => (
                INTERNAL_UNRESTRICTED_SYSTEM,
                Self::internal_unrestricted_system(user_message, tools, lang),
            ),
        }
    }

    /// Isolated extraction prompt; answered with a JSON object
    pub fn keyword_extraction_structured(user_message: &str, lang: Language) -> String {
        format!(
            r#"KEYWORD_EXTRACTION_TASK

Analyze this user message and extract structured keywords for product search:

USER_MESSAGE: "{}"
LANGUAGE: {}

Extract keywords into these categories:

1. OBJECTS: Physical items, products, materials (pardoseala, lac, vopsea, parchet, etc.)
2. PROPERTIES: Characteristics, features, qualities (reziste, mat, lucios, transparent, etc.)
3. ROOMS: Spaces, locations, areas (bucatarie, baie, living, dormitor, etc.)
4. ACTIONS: What user wants to do (recomanzi, cumpara, gaseste, compara, etc.)
5. CONTEXT: Project type, usage context (proiect, renovare, constructie, etc.)
6. INTENT: Primary goal (product_search, recommendation, comparison, information)

RESPONSE FORMAT - Return ONLY valid JSON:
{{
  "objects": ["keyword1", "keyword2"],
  "properties": ["keyword3", "keyword4"],
  "rooms": ["keyword5"],
  "actions": ["keyword6"],
  "context": ["keyword7"],
  "intent": "primary_intent"
}}

RULES:
- Extract meaningful keywords only (ignore stop words)
- Keep original language of keywords
- Include synonyms/related terms when relevant
- Focus on commerce/construction/paint domain
- Return empty arrays for missing categories
- Intent should be one of: product_search, recommendation, comparison, information, stock_check

JSON_RESPONSE:"#,
            user_message,
            lang.code()
        )
    }

    /// System message prepended by providers on the direct path
    pub fn provider_system(tool_codes: &[String], lang: Language) -> String {
        format!(
            "You are a helpful AI assistant. Available tools: {}. Language: {}. Be concise and helpful. Respond in the user's language.",
            tool_codes.join(", "),
            lang.code()
        )
    }
}
