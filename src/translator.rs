//! Translation service: validates a request, builds the prompt, calls the
//! completion API once, and shapes the result.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::{LanguageRole, TranslateError};
use crate::languages::{LanguageEntry, LanguageTable};
use crate::openai::OpenAiClient;
use crate::prompt::Prompt;

/// Maximum accepted text length, in characters.
pub const MAX_TEXT_CHARS: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
    /// Model identifier; the service default is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
}

/// A request that passed every check, with both codes resolved.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedRequest<'a> {
    pub source: &'a LanguageEntry,
    pub target: &'a LanguageEntry,
    pub text: &'a str,
}

impl ValidatedRequest<'_> {
    pub fn prompt(&self) -> Prompt {
        Prompt::new(self.source.name, self.target.name, self.text)
    }
}

/// Check a request against the language table and the text bounds.
///
/// Checks run in a fixed order and the first failure wins: source code,
/// target code, empty text, text length. Identical source and target codes
/// are accepted.
pub fn validate<'a>(
    languages: &'a LanguageTable,
    request: &'a TranslationRequest,
) -> Result<ValidatedRequest<'a>, TranslateError> {
    let source = languages.get(&request.source_language).ok_or_else(|| {
        TranslateError::UnsupportedLanguage {
            role: LanguageRole::Source,
            code: request.source_language.clone(),
        }
    })?;

    let target = languages.get(&request.target_language).ok_or_else(|| {
        TranslateError::UnsupportedLanguage {
            role: LanguageRole::Target,
            code: request.target_language.clone(),
        }
    })?;

    if request.text.trim().is_empty() {
        return Err(TranslateError::EmptyText);
    }

    if request.text.chars().count() > MAX_TEXT_CHARS {
        return Err(TranslateError::TextTooLong { max: MAX_TEXT_CHARS });
    }

    Ok(ValidatedRequest {
        source,
        target,
        text: &request.text,
    })
}

/// The translation service. Immutable after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Translator {
    languages: LanguageTable,
    client: OpenAiClient,
    default_model: String,
}

impl Translator {
    pub fn new(languages: LanguageTable, client: OpenAiClient, default_model: impl Into<String>) -> Self {
        Self {
            languages,
            client,
            default_model: default_model.into(),
        }
    }

    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, TranslateError> {
        let validated = validate(&self.languages, request).inspect_err(|e| {
            warn!("Rejected translation request: {}", e);
        })?;

        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let prompt = validated.prompt();

        let content = self.client.complete(model, &prompt).await.map_err(|e| {
            error!(
                "Completion call failed ({} -> {}, model {}): {:#}",
                validated.source.code, validated.target.code, model, e
            );
            TranslateError::Upstream(format!("{:#}", e))
        })?;

        let translated_text = content.trim().to_string();

        info!(
            "Translated {} chars {} -> {} with {} ({} chars out)",
            request.text.chars().count(),
            validated.source.code,
            validated.target.code,
            model,
            translated_text.chars().count()
        );

        Ok(TranslationResponse {
            original_text: request.text.clone(),
            translated_text,
            source_language: request.source_language.clone(),
            target_language: request.target_language.clone(),
        })
    }
}
