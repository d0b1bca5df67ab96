/// Persona sent as the system message of every translation request.
pub const SYSTEM_PROMPT: &str =
    "You are a professional translator. Provide accurate and natural translations.";

/// The two messages sent to the completion API for one translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    /// Build the prompt for translating `text` between two display names.
    pub fn new(source_name: &str, target_name: &str, text: &str) -> Self {
        Self {
            system: SYSTEM_PROMPT.to_string(),
            user: build_user_prompt(source_name, target_name, text),
        }
    }
}

/// Build the user prompt for translation
fn build_user_prompt(source_name: &str, target_name: &str, text: &str) -> String {
    format!(
        "Translate the following text from {} to {}.\n\
         Provide only the translation without any additional explanation or formatting.\n\
         \n\
         Text to translate: {}",
        source_name, target_name, text
    )
}
