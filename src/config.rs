use anyhow::{Context, Result};
use std::net::IpAddr;

pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct Config {
    // OpenAI
    pub openai_api_key: String,
    pub openai_api_url: String,
    pub openai_model: String,

    // Server
    pub host: IpAddr,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // OpenAI
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .context("OPENAI_API_KEY environment variable is required")?,
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_URL.to_string()),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),

            // Server
            host: match std::env::var("HOST") {
                Ok(v) => v
                    .parse()
                    .with_context(|| format!("HOST must be a valid IP address, got '{}'", v))?,
                Err(_) => IpAddr::from([0, 0, 0, 0]),
            },
            port: match std::env::var("PORT") {
                Ok(v) => v
                    .parse()
                    .with_context(|| format!("PORT must be a valid port number, got '{}'", v))?,
                Err(_) => DEFAULT_PORT,
            },
        })
    }
}
