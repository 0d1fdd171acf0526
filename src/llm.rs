use crate::error::{Error, Result};
use crate::http::HttpClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Anthropic,
    OpenAi,
    OpenRouter,
}

impl Provider {
    fn default_url(self) -> &'static str {
        match self {
            Self::Anthropic => ANTHROPIC_URL,
            Self::OpenAi => OPENAI_URL,
            Self::OpenRouter => OPENROUTER_URL,
        }
    }
}

/// Completion client for the providers the analyzer supports.
///
/// The API key is read from the environment variable named in config, never
/// from the config file itself. `base_url` exists so tests can point the
/// client at a mock server.
pub struct LlmClient {
    provider: Provider,
    model: String,
    max_tokens: u32,
    api_key: String,
    base_url: String,
    http: HttpClient,
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicBlock>,
}

#[derive(Deserialize)]
struct AnthropicBlock {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl LlmClient {
    pub fn new(
        provider: Provider,
        model: String,
        max_tokens: u32,
        api_key: String,
        base_url: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        Ok(Self {
            base_url: base_url.unwrap_or_else(|| provider.default_url().to_string()),
            provider,
            model,
            max_tokens,
            api_key,
            http: HttpClient::with_timeout("creator-trends/0.1.0", timeout_secs)?,
        })
    }

    /// Build a client from config, with the API key read from the
    /// environment variable the config names.
    pub fn from_config(config: &crate::config::LlmConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            Error::config(format!("missing API key env var {}", config.api_key_env))
        })?;
        Self::new(
            config.provider,
            config.model.clone(),
            config.max_tokens,
            api_key,
            config.base_url.clone(),
            config.timeout_secs,
        )
    }

    pub async fn complete(&self, system: &str, user_message: &str) -> Result<String> {
        debug!(provider = ?self.provider, model = %self.model, "sending completion request");

        let response_text = match self.provider {
            Provider::Anthropic => {
                let request = AnthropicRequest {
                    model: &self.model,
                    max_tokens: self.max_tokens,
                    system,
                    messages: vec![ChatMessage {
                        role: "user",
                        content: user_message,
                    }],
                };
                let body = serde_json::to_string(&request)
                    .map_err(|e| Error::parse(format!("serialize request: {e}")))?;
                self.http
                    .post_json_raw(
                        &self.base_url,
                        &body,
                        &[
                            ("x-api-key", &self.api_key),
                            ("anthropic-version", "2023-06-01"),
                        ],
                    )
                    .await
            }
            Provider::OpenAi | Provider::OpenRouter => {
                let request = ChatRequest {
                    model: &self.model,
                    max_tokens: self.max_tokens,
                    messages: vec![
                        ChatMessage {
                            role: "system",
                            content: system,
                        },
                        ChatMessage {
                            role: "user",
                            content: user_message,
                        },
                    ],
                };
                let body = serde_json::to_string(&request)
                    .map_err(|e| Error::parse(format!("serialize request: {e}")))?;
                let auth = format!("Bearer {}", self.api_key);
                self.http
                    .post_json_raw(&self.base_url, &body, &[("authorization", &auth)])
                    .await
            }
        }
        .map_err(|e| {
            warn!("completion API error: {e}");
            e
        })?;

        match self.provider {
            Provider::Anthropic => {
                let resp: AnthropicResponse = serde_json::from_str(&response_text)
                    .map_err(|e| Error::parse(format!("parse completion response: {e}")))?;
                Ok(resp
                    .content
                    .into_iter()
                    .filter_map(|b| b.text)
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            Provider::OpenAi | Provider::OpenRouter => {
                let resp: ChatResponse = serde_json::from_str(&response_text)
                    .map_err(|e| Error::parse(format!("parse completion response: {e}")))?;
                resp.choices
                    .into_iter()
                    .next()
                    .map(|c| c.message.content)
                    .ok_or_else(|| Error::parse("completion response had no choices"))
            }
        }
    }

    /// Send a prompt and parse the response as JSON, stripping markdown
    /// fences if present.
    pub async fn complete_json<T: serde::de::DeserializeOwned>(
        &self,
        system: &str,
        user_message: &str,
    ) -> Result<T> {
        let text = self.complete(system, user_message).await?;
        let json_str = extract_json(&text);
        serde_json::from_str(json_str)
            .map_err(|e| Error::parse(format!("parse completion JSON: {e}\nraw: {text}")))
    }
}

/// Extract JSON from a response that might be wrapped in markdown code fences.
fn extract_json(text: &str) -> &str {
    if let Some(start) = text.find("```json") {
        let content = &text[start + 7..];
        if let Some(end) = content.find("```") {
            return content[..end].trim();
        }
    }
    if let Some(start) = text.find("```") {
        let content = &text[start + 3..];
        if let Some(end) = content.find("```") {
            let inner = content[..end].trim();
            if inner.starts_with('{') || inner.starts_with('[') {
                return inner;
            }
        }
    }
    if let Some(start) = text.find('{')
        && let Some(end) = text.rfind('}')
    {
        return &text[start..=end];
    }
    text
}
