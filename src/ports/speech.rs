use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{ServiceCallError, VoiceCatalog};

/// Port for the text-to-speech service.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Generate speech and return the artifact id.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<String, ServiceCallError>;

    /// Fetch the generated audio.
    async fn download(&self, audio_id: &str) -> Result<Bytes, ServiceCallError>;

    /// Ask the service to delete an artifact.
    async fn cleanup(&self, audio_id: &str) -> Result<(), ServiceCallError>;

    async fn voices(&self) -> Result<VoiceCatalog, ServiceCallError>;

    /// Absolute URL the artifact can be streamed from, once the service
    /// has been resolved.
    fn download_url(&self, audio_id: &str) -> Option<String>;
}
