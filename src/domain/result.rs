use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::workflow::PerformedTask;

/// Final, normalized outcome of a job. Immutable once built; attaching a
/// synthesized audio artifact yields a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedResult {
    text: String,
    detected_language: String,
    model_identifier: String,
    task_performed: PerformedTask,
    original_text: Option<String>,
    target_language: Option<String>,
    audio_artifact_id: Option<String>,
}

impl NormalizedResult {
    /// Result of a single transcription call.
    pub fn transcribed(
        text: String,
        detected_language: Option<String>,
        model_identifier: Option<String>,
        task_performed: PerformedTask,
    ) -> Self {
        Self {
            text,
            detected_language: detected_language.unwrap_or_else(|| "unknown".to_string()),
            model_identifier: model_identifier.unwrap_or_else(|| "Unknown".to_string()),
            task_performed,
            original_text: None,
            target_language: None,
            audio_artifact_id: None,
        }
    }

    /// Result of transcription followed by translation. The translated text
    /// replaces the displayed text; the transcript is kept as `original_text`.
    pub fn translated(
        transcript: NormalizedResult,
        translated_text: String,
        target_language: String,
    ) -> Self {
        Self {
            original_text: Some(transcript.text),
            text: translated_text,
            target_language: Some(target_language),
            task_performed: PerformedTask::Translate,
            ..transcript
        }
    }

    pub fn with_audio_artifact(&self, audio_id: impl Into<String>) -> Self {
        Self {
            audio_artifact_id: Some(audio_id.into()),
            ..self.clone()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn detected_language(&self) -> &str {
        &self.detected_language
    }

    pub fn model_identifier(&self) -> &str {
        &self.model_identifier
    }

    pub fn task_performed(&self) -> PerformedTask {
        self.task_performed
    }

    pub fn original_text(&self) -> Option<&str> {
        self.original_text.as_deref()
    }

    pub fn target_language(&self) -> Option<&str> {
        self.target_language.as_deref()
    }

    pub fn audio_artifact_id(&self) -> Option<&str> {
        self.audio_artifact_id.as_deref()
    }

    /// File name used when exporting the text.
    pub fn export_file_name(at: DateTime<Utc>) -> String {
        format!("transcription_{}.txt", at.timestamp_millis())
    }
}
