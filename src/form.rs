//! Terminal translation form: selection state, input commands and rendering.
//!
//! Nothing here talks to the network. The `translator-form` binary feeds
//! user input through [`Command::parse`], keeps a [`FormState`], and prints
//! whatever [`FormState::render`] produces for each [`Outcome`].

use thiserror::Error;

use crate::client::{ClientError, HealthStatus, LanguageList};
use crate::translator::{TranslationRequest, TranslationResponse, MAX_TEXT_CHARS};

/// Models offered in the form.
pub const MODEL_OPTIONS: [&str; 3] = ["gpt-3.5-turbo", "gpt-4", "gpt-4-turbo"];

/// Line that ends a `/multi` block.
pub const MULTILINE_END: &str = ".";

pub const HELP: &str = "\
Commands:
  /from <code>    select the source language
  /to <code>      select the target language
  /swap           exchange source and target
  /model <name>   select the model (gpt-3.5-turbo, gpt-4, gpt-4-turbo)
  /multi          enter several lines of text, ending with a line holding only \".\"
  /languages      list supported languages
  /status         check the backend connection
  /help           show this help
  /quit           exit
Any other line is translated with the current selection.
Start a line with \"//\" to translate text that begins with \"/\".";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown language code '{0}'")]
    UnknownLanguage(String),

    #[error("Unknown model '{0}'")]
    UnknownModel(String),

    #[error("Source and target languages must be different")]
    SameLanguage,

    #[error("Please enter text to translate")]
    EmptyText,

    #[error("Text too long (max {} characters)", MAX_TEXT_CHARS)]
    TextTooLong,
}

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    From(String),
    To(String),
    Swap,
    Model(String),
    Multiline,
    Languages,
    Status,
    Help,
    Quit,
    Translate(String),
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Translate(line.to_string());
        };

        // "//text" translates "/text"
        if rest.starts_with('/') {
            let indent = &line[..line.len() - trimmed.len()];
            return Command::Translate(format!("{}{}", indent, rest));
        }

        let mut parts = rest.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).unwrap_or_default().to_string();

        match (name, arg.is_empty()) {
            ("from", false) => Command::From(arg),
            ("to", false) => Command::To(arg),
            ("model", false) => Command::Model(arg),
            ("swap", _) => Command::Swap,
            ("multi", _) => Command::Multiline,
            ("languages", _) => Command::Languages,
            ("status", _) => Command::Status,
            ("help", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,
            _ => Command::Unknown(line.trim().to_string()),
        }
    }
}

/// Collects the lines of a `/multi` block.
#[derive(Debug, Default)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl TextBuffer {
    /// Add one input line. Returns the joined text once the end marker arrives.
    pub fn push(&mut self, line: &str) -> Option<String> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line == MULTILINE_END {
            return Some(std::mem::take(&mut self.lines).join("\n"));
        }
        self.lines.push(line.to_string());
        None
    }
}

/// What came back from one translation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The backend could not be reached.
    Unreachable(String),
    /// The backend answered with an error detail.
    Failed(String),
    Translated(TranslationResponse),
}

impl From<Result<TranslationResponse, ClientError>> for Outcome {
    fn from(result: Result<TranslationResponse, ClientError>) -> Self {
        match result {
            Ok(response) => Outcome::Translated(response),
            Err(ClientError::Connection(message)) => Outcome::Unreachable(message),
            Err(ClientError::Service(detail)) => Outcome::Failed(detail),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    languages: Vec<(String, String)>,
    source: String,
    target: String,
    model: String,
}

impl FormState {
    /// Start a form over the languages the backend reported.
    ///
    /// Returns `None` when the list is empty. English to French is preselected
    /// when both are available, otherwise the first two languages listed.
    pub fn new(languages: LanguageList) -> Option<Self> {
        let languages = languages.0;
        let has = |code: &str| languages.iter().any(|(c, _)| c == code);

        let first = languages.first()?.0.clone();
        let source = if has("en") { "en".to_string() } else { first };
        let target = if has("fr") && source != "fr" {
            "fr".to_string()
        } else {
            languages
                .iter()
                .map(|(code, _)| code)
                .find(|code| **code != source)
                .cloned()
                .unwrap_or_else(|| source.clone())
        };

        Some(Self {
            languages,
            source,
            target,
            model: MODEL_OPTIONS[0].to_string(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn select_source(&mut self, code: &str) -> Result<(), FormError> {
        self.source = self.known_code(code)?;
        Ok(())
    }

    pub fn select_target(&mut self, code: &str) -> Result<(), FormError> {
        self.target = self.known_code(code)?;
        Ok(())
    }

    pub fn select_model(&mut self, model: &str) -> Result<(), FormError> {
        if !MODEL_OPTIONS.contains(&model) {
            return Err(FormError::UnknownModel(model.to_string()));
        }
        self.model = model.to_string();
        Ok(())
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
    }

    pub fn can_submit(&self, text: &str) -> bool {
        self.prepare(text).is_ok()
    }

    /// Build the request for `text`, or say why the form refuses to send it.
    pub fn prepare(&self, text: &str) -> Result<TranslationRequest, FormError> {
        if self.source == self.target {
            return Err(FormError::SameLanguage);
        }
        if text.trim().is_empty() {
            return Err(FormError::EmptyText);
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(FormError::TextTooLong);
        }

        Ok(TranslationRequest {
            text: text.to_string(),
            source_language: self.source.clone(),
            target_language: self.target.clone(),
            model: Some(self.model.clone()),
        })
    }

    /// `"French (fr)"`, or the bare code when it is not in the list.
    pub fn label(&self, code: &str) -> String {
        match self.name_of(code) {
            Some(name) => format!("{} ({})", name, code),
            None => code.to_string(),
        }
    }

    pub fn selection_line(&self) -> String {
        format!(
            "{} -> {}  [model: {}]",
            self.label(&self.source),
            self.label(&self.target),
            self.model
        )
    }

    pub fn language_list(&self) -> String {
        self.languages
            .iter()
            .map(|(code, name)| format!("  {}  {}", code, name))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render(&self, outcome: &Outcome) -> String {
        match outcome {
            Outcome::Unreachable(message) => {
                format!("[offline] Cannot reach the backend: {}", message)
            }
            Outcome::Failed(detail) => format!("[error] {}", detail),
            Outcome::Translated(response) => format!(
                "Original ({}):\n  {}\n\nTranslation ({}):\n  {}",
                self.display_name(&response.source_language),
                response.original_text,
                self.display_name(&response.target_language),
                response.translated_text
            ),
        }
    }

    fn name_of(&self, code: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, name)| name.as_str())
    }

    fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.name_of(code).unwrap_or(code)
    }

    fn known_code(&self, code: &str) -> Result<String, FormError> {
        if self.name_of(code).is_some() {
            Ok(code.to_string())
        } else {
            Err(FormError::UnknownLanguage(code.to_string()))
        }
    }
}

pub fn char_counter(text: &str) -> String {
    format!("Characters: {}/{}", text.chars().count(), MAX_TEXT_CHARS)
}

pub fn render_health(base_url: &str, health: &Result<HealthStatus, ClientError>) -> String {
    match health {
        Ok(status) => format!("Backend connected: {} ({})", status.service, base_url),
        Err(ClientError::Service(detail)) => format!("Backend not available: {}", detail),
        Err(err) => format!("Cannot reach the backend at {}: {}", base_url, err),
    }
}
