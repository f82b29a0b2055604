//! Ollama chat adapter (`POST /api/chat`, non-streaming)

use crate::config::FileProviderConfig;
use agentic_application::{CompletionPurpose, CompletionRequest, LlmProvider};
use agentic_domain::PromptTemplate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

const NO_CONTENT: &str = "Sorry, I couldn't generate a response.";
const ISOLATED_TEMPERATURE: f64 = 0.1;
const ISOLATED_TIMEOUT: Duration = Duration::from_secs(15);
const ISOLATED_FALLBACK: &str = "en_US";

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

impl ChatMessage {
    fn new(role: &'static str, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f64,
    num_predict: u32,
}

#[derive(Debug, Serialize)]
struct ChatPayload<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

enum ChatFailure {
    Http(u16),
    Connect(String),
    Decode(String),
}

pub struct OllamaProvider {
    config: FileProviderConfig,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(config: FileProviderConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn messages(&self, request: &CompletionRequest) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(request.history.len() + 3);
        let history = request
            .history
            .iter()
            .map(|turn| ChatMessage::new(turn.role.as_str(), turn.content.clone()));

        match request.purpose {
            CompletionPurpose::FunctionCalling => {
                // The prompt already carries the tools and the user request
                messages.extend(history);
                messages.push(ChatMessage::new("user", request.prompt.clone()));
            }
            CompletionPurpose::Direct => {
                messages.push(ChatMessage::new(
                    "system",
                    PromptTemplate::provider_system(&request.tools, request.language),
                ));
                messages.push(ChatMessage::new("system", request.prompt.clone()));
                messages.extend(history);
                messages.push(ChatMessage::new("user", request.user_message.clone()));
            }
        }
        messages
    }

    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        options: ChatOptions,
        timeout: Duration,
        default_content: &str,
    ) -> Result<String, ChatFailure> {
        let payload = ChatPayload {
            model: &self.config.model,
            messages,
            stream: false,
            options,
        };

        let mut builder = self
            .client
            .post(&self.config.endpoint_url)
            .timeout(timeout)
            .json(&payload);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ChatFailure::Connect(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(provider = %self.config.code, status = status.as_u16(), body = %body, "Ollama API error");
            return Err(ChatFailure::Http(status.as_u16()));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ChatFailure::Decode(e.to_string()))?;
        Ok(body
            .message
            .and_then(|m| m.content)
            .unwrap_or_else(|| default_content.to_string()))
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn code(&self) -> &str {
        &self.config.code
    }

    fn name(&self) -> &str {
        self.config.display_name()
    }

    async fn complete(&self, request: &CompletionRequest) -> String {
        info!(
            provider = %self.config.code,
            purpose = ?request.purpose,
            max_tokens = self.config.max_tokens,
            temperature = self.config.temperature,
            "Requesting completion"
        );
        let options = ChatOptions {
            temperature: self.config.temperature,
            num_predict: self.config.max_tokens,
        };
        let timeout = Duration::from_secs(self.config.timeout_seconds);

        match self
            .chat(self.messages(request), options, timeout, NO_CONTENT)
            .await
        {
            Ok(content) => {
                debug!(provider = %self.config.code, "Completion received: {}", content);
                content
            }
            Err(ChatFailure::Http(status)) => {
                format!("Error connecting to AI model (HTTP {})", status)
            }
            Err(ChatFailure::Connect(e)) => {
                error!(provider = %self.config.code, error = %e, "Ollama connection error");
                format!(
                    "Error: Cannot connect to Ollama server at {}",
                    self.config.endpoint_url
                )
            }
            Err(ChatFailure::Decode(e)) => {
                error!(provider = %self.config.code, error = %e, "Invalid Ollama response");
                format!("AI Error: {}", e)
            }
        }
    }

    async fn complete_isolated(&self, prompt: &str) -> String {
        debug!(provider = %self.config.code, "Isolated completion");
        let options = ChatOptions {
            temperature: ISOLATED_TEMPERATURE,
            num_predict: self.config.isolated_max_tokens,
        };
        let messages = vec![ChatMessage::new("user", prompt)];

        match self
            .chat(messages, options, ISOLATED_TIMEOUT, ISOLATED_FALLBACK)
            .await
        {
            Ok(content) => content,
            Err(_) => {
                error!(provider = %self.config.code, "Isolated completion failed");
                ISOLATED_FALLBACK.to_string()
            }
        }
    }
}
