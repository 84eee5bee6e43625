use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::adapters::service_client::{CallOptions, Operation, ServiceClient};
use crate::domain::ServiceCallError;
use crate::ports::{
    FormField, RequestBody, TranscribeRequest, Transcriber, TranscriptionOutput, WhisperTask,
};

const TRANSCRIBE_PATH: &str = "/api/v1/transcribe";
const LANGUAGES_PATH: &str = "/api/v1/languages";
const TRANSLATION_LANGUAGES_PATH: &str = "/api/v1/translation-languages";
const MODEL_INFO_PATH: &str = "/api/v1/model-info";

#[derive(Deserialize)]
struct LanguagesResponse {
    #[serde(default)]
    languages: Vec<String>,
}

/// Client for the Whisper transcription backend.
pub struct WhisperBackendClient {
    client: ServiceClient,
}

impl WhisperBackendClient {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub fn service_client(&self) -> &ServiceClient {
        &self.client
    }

    fn form(request: TranscribeRequest) -> Vec<FormField> {
        let TranscribeRequest {
            audio,
            language,
            task,
            target_language,
        } = request;

        let mut fields = vec![FormField::File {
            name: "audio".to_string(),
            file_name: audio.name().to_string(),
            mime_type: audio.mime_type().map(str::to_string),
            data: audio.data().clone(),
        }];

        if let Some(language) = language {
            fields.push(FormField::text("language", language));
        }

        fields.push(FormField::text("task", task.as_str()));

        if task == WhisperTask::Translate {
            if let Some(target) = target_language {
                fields.push(FormField::text("target_language", target));
            }
        }

        fields
    }

    async fn language_list(&self, path: &str) -> Result<Vec<String>, ServiceCallError> {
        let response: LanguagesResponse = self
            .client
            .call_as(&Operation::get(path), RequestBody::Empty, CallOptions::default())
            .await?;
        Ok(response.languages)
    }
}

#[async_trait]
impl Transcriber for WhisperBackendClient {
    async fn transcribe(&self, request: TranscribeRequest) -> Result<TranscriptionOutput, ServiceCallError> {
        info!(
            file = request.audio.name(),
            size = request.audio.size(),
            task = request.task.as_str(),
            "Submitting audio for transcription"
        );

        let value = self
            .client
            .call(
                &Operation::post(TRANSCRIBE_PATH),
                RequestBody::Multipart(Self::form(request)),
                CallOptions::default(),
            )
            .await?;

        // Older backends return the fields at the top level.
        let payload = value.get("result").unwrap_or(value.as_ref());
        let output: TranscriptionOutput = self.client.decode(payload)?;

        debug!(chars = output.text.len(), language = ?output.language, "Transcription received");
        Ok(output)
    }

    async fn languages(&self) -> Result<Vec<String>, ServiceCallError> {
        self.language_list(LANGUAGES_PATH).await
    }

    async fn translation_languages(&self) -> Result<Vec<String>, ServiceCallError> {
        self.language_list(TRANSLATION_LANGUAGES_PATH).await
    }

    async fn model_info(&self) -> Result<Value, ServiceCallError> {
        let value = self
            .client
            .call(&Operation::get(MODEL_INFO_PATH), RequestBody::Empty, CallOptions::default())
            .await?;
        Ok(value.get("model_info").cloned().unwrap_or_else(|| (*value).clone()))
    }
}
