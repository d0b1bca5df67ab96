use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::prompt::Prompt;

/// Sampling temperature for translations; low to keep output literal.
pub const TEMPERATURE: f32 = 0.3;

/// Generation cap for a single translation.
pub const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for the OpenAI Chat Completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(http: reqwest::Client, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(http: reqwest::Client, config: &Config) -> Self {
        Self::new(http, &config.openai_api_url, &config.openai_api_key)
    }

    /// Send one completion request and return the first choice's content.
    ///
    /// Makes exactly one HTTP call. The content is returned as the model
    /// produced it; trimming is the caller's concern.
    pub async fn complete(&self, model: &str, prompt: &Prompt) -> Result<String> {
        let request = ChatRequest {
            model,
            messages: vec![
                Message {
                    role: "system",
                    content: &prompt.system,
                },
                Message {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            anyhow::bail!("OpenAI API error ({}): {}", status, body);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI response")?;

        chat_response
            .choices
            .into_iter()
            .next()
            .context("OpenAI response contained no choices")?
            .message
            .content
            .context("OpenAI response message had no content")
    }
}
