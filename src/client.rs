//! HTTP client for the translation service, used by the terminal form.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::error::ErrorBody;
use crate::translator::{TranslationRequest, TranslationResponse};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
const LANGUAGES_TIMEOUT: Duration = Duration::from_secs(10);
const TRANSLATE_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a call to the service did not produce a result.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service could not be reached or did not answer in time.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The service answered with an error; the detail is shown verbatim.
    #[error("{0}")]
    Service(String),
}

#[derive(Debug, Deserialize)]
struct LanguagesBody {
    languages: LanguageList,
}

/// `(code, display name)` pairs in the order the service listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageList(pub Vec<(String, String)>);

impl<'de> Deserialize<'de> for LanguageList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ListVisitor;

        impl<'de> Visitor<'de> for ListVisitor {
            type Value = LanguageList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of language code to display name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, String>()? {
                    entries.push(entry);
                }
                Ok(LanguageList(entries))
            }
        }

        deserializer.deserialize_map(ListVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Clone)]
pub struct TranslatorClient {
    http: reqwest::Client,
    base_url: String,
}

impl TranslatorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from `API_BASE_URL`, falling back to the local default.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("API_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(connection_error)?;

        if !response.status().is_success() {
            return Err(ClientError::Service(format!(
                "Backend unavailable ({})",
                response.status()
            )));
        }

        response.json().await.map_err(decode_error)
    }

    /// Fetch the supported languages in service order.
    pub async fn languages(&self) -> Result<LanguageList, ClientError> {
        let response = self
            .http
            .get(format!("{}/languages", self.base_url))
            .timeout(LANGUAGES_TIMEOUT)
            .send()
            .await
            .map_err(connection_error)?;

        if !response.status().is_success() {
            return Err(ClientError::Service(format!(
                "Failed to load supported languages ({})",
                response.status()
            )));
        }

        let body: LanguagesBody = response.json().await.map_err(decode_error)?;
        Ok(body.languages)
    }

    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, ClientError> {
        let response = self
            .http
            .post(format!("{}/translate", self.base_url))
            .timeout(TRANSLATE_TIMEOUT)
            .json(request)
            .send()
            .await
            .map_err(connection_error)?;

        if response.status().is_success() {
            return response.json().await.map_err(decode_error);
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.detail)
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ClientError::Service(detail))
    }
}

fn connection_error(e: reqwest::Error) -> ClientError {
    ClientError::Connection(e.to_string())
}

// The backend answered, so a body we cannot read is a service failure.
fn decode_error(e: reqwest::Error) -> ClientError {
    ClientError::Service(format!("Invalid response from backend: {}", e))
}
