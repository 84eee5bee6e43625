use serde::Serialize;
use serde_json::Value;

/// Languages offered when a service cannot list its own.
pub const DEFAULT_LANGUAGES: [&str; 12] = [
    "en", "es", "fr", "de", "it", "pt", "ru", "ja", "ko", "zh", "ar", "hi",
];

pub fn default_languages() -> Vec<String> {
    DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()
}

/// Data used to populate the language and model selectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageCatalog {
    pub transcription_languages: Vec<String>,
    pub translation_languages: Vec<String>,
    /// Raw `model_info` object, `None` when the backend could not be asked.
    pub model_info: Option<Value>,
}

impl LanguageCatalog {
    /// Model size reported by the backend, if any.
    pub fn model_size(&self) -> Option<&str> {
        self.model_info
            .as_ref()
            .and_then(|info| info.get("model_size"))
            .and_then(Value::as_str)
    }
}
