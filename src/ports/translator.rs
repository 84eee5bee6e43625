use async_trait::async_trait;

use crate::domain::ServiceCallError;

/// Port for the text translation service.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_language`, returning the translated text.
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ServiceCallError>;
}
