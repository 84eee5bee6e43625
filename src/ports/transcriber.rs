use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{AudioFile, ServiceCallError};

/// Task sent to the transcription service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhisperTask {
    Transcribe,
    /// The service's built-in translate mode.
    Translate,
}

impl WhisperTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            WhisperTask::Transcribe => "transcribe",
            WhisperTask::Translate => "translate",
        }
    }
}

/// Parameters of a transcription request.
#[derive(Debug, Clone)]
pub struct TranscribeRequest {
    pub audio: AudioFile,
    /// Source language hint; `None` lets the service detect it.
    pub language: Option<String>,
    pub task: WhisperTask,
    /// Only sent with `WhisperTask::Translate`.
    pub target_language: Option<String>,
}

/// `result` object of a transcription response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranscriptionOutput {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub model_size: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
}

/// Port for the speech-to-text service.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Submit audio for transcription. Never served from cache.
    async fn transcribe(&self, request: TranscribeRequest) -> Result<TranscriptionOutput, ServiceCallError>;

    /// Languages the service can transcribe.
    async fn languages(&self) -> Result<Vec<String>, ServiceCallError>;

    /// Languages the service can translate into.
    async fn translation_languages(&self) -> Result<Vec<String>, ServiceCallError>;

    /// Raw model metadata.
    async fn model_info(&self) -> Result<Value, ServiceCallError>;
}
