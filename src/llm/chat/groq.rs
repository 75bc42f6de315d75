use async_trait::async_trait;
use log::{ debug, warn };
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };
use std::time::Duration;

use super::{ ChatClient, CompletionResponse, LlmError };
use crate::config::prompt::{ MAX_TOKENS, MODEL, TEMPERATURE };
use crate::llm::LlmConfig;
use crate::models::chat::ChatMessage;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub struct GroqChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
}

#[derive(Serialize, Deserialize)]
struct GroqMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct GroqRequest {
    messages: Vec<GroqMessage>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
}

#[derive(Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
}

#[derive(Deserialize)]
struct GroqResponseMessage {
    content: Option<String>,
}

impl GroqChatClient {
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Duration
    ) -> Result<Self, LlmError> {
        let chat_model = model.unwrap_or_else(|| MODEL.to_string());
        let api_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e|
                LlmError::InvalidApiKey(e.to_string())
            )?
        );

        let http = HttpClient::builder().default_headers(headers).timeout(timeout).build()?;

        Ok(Self {
            http,
            model: chat_model,
            base_url: api_url,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = config.api_key.clone().ok_or(LlmError::NotConfigured)?;

        Self::new(api_key, config.completion_model.clone(), config.base_url.clone(), config.timeout)
    }

    fn build_request(&self, system_prompt: &str, history: &[ChatMessage]) -> GroqRequest {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(GroqMessage {
            role: "system".to_string(),
            content: system_prompt.to_string(),
        });
        messages.extend(
            history.iter().map(|m| GroqMessage {
                role: m.role.as_str().to_string(),
                content: m.content.clone(),
            })
        );

        GroqRequest {
            messages,
            model: self.model.clone(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[async_trait]
impl ChatClient for GroqChatClient {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ChatMessage]
    ) -> Result<CompletionResponse, LlmError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let req = self.build_request(system_prompt, history);
        debug!("Sending {} messages to {} ({})", req.messages.len(), url, self.model);

        let resp = self.http.post(&url).json(&req).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("Groq API returned {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = resp.json::<GroqResponse>().await?;
        let content = parsed.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)?;

        Ok(CompletionResponse { response: content })
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }
}
