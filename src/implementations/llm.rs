use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::errors::{GenError, GenResult};
use crate::traits::ChatBackend;

/// Chat-completions request and response types
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: usize,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatResponseChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completions endpoint
///
/// Requests run in JSON mode (`response_format: json_object`) so the model
/// answers with a single JSON object and nothing else.
pub struct OpenAiClient {
    http_client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    max_tokens: usize,
}

impl std::fmt::Debug for OpenAiClient {
    // Manual impl so the credential never leaks into debug output
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl OpenAiClient {
    /// Build a client from the resolved configuration
    ///
    /// The credential is resolved here, before any request machinery exists:
    /// a missing key fails without a single network call being attempted.
    pub fn from_config(config: &GeneratorConfig) -> GenResult<Self> {
        let api_key = config.resolve_api_key()?;

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| GenError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint(),
            model: config.model(),
            api_key,
            temperature: config.temperature(),
            max_tokens: config.max_tokens(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatBackend for OpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> GenResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        info!("Sending completion request to {}", self.endpoint);
        debug!("Model: {}", self.model);
        debug!("Prompt length: {} characters", user.len());

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let error_msg = format!("Request to generation service failed: {}", e);
                warn!("{}", error_msg);
                if e.is_timeout() {
                    warn!("Request timed out");
                }
                if e.is_connect() {
                    warn!("Connection error - check network connectivity");
                }
                GenError::Network(error_msg)
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            warn!("Credential rejected: HTTP {} - {}", status, message);
            return Err(GenError::Auth(message));
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            warn!("API error: HTTP {} - {}", status, message);
            return Err(GenError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse completion envelope: {}", e);
            GenError::MalformedResponse(format!("Invalid completion envelope: {}", e))
        })?;

        let content = parsed
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                warn!("Completion contained no choices");
                GenError::MalformedResponse("Completion contained no content".to_string())
            })?;

        debug!("Completion length: {} characters", content.len());
        Ok(strip_code_fences(&content))
    }
}

/// Remove a wrapping Markdown code fence from a completion, if present.
/// Models occasionally fence their JSON even in JSON mode.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };

    // Drop the language tag on the opening fence line
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => {
            // Single-line fence: a leading alphanumeric token is a language
            // tag, not content
            let rest = rest.trim_start();
            match rest.split_once(char::is_whitespace) {
                Some((tag, remainder)) if tag.chars().all(|c| c.is_ascii_alphanumeric()) => {
                    remainder
                }
                _ => rest,
            }
        }
    };

    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim().to_string()
}
