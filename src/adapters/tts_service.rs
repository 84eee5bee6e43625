use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::adapters::service_client::{CallOptions, Operation, ServiceClient};
use crate::domain::{ServiceCallError, ServiceError, ServiceErrorKind, VoiceCatalog};
use crate::ports::{RequestBody, SpeechSynthesizer};

#[derive(Deserialize)]
struct SynthesisResponse {
    #[serde(default)]
    audio_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

fn download_path(audio_id: &str) -> String {
    format!("/download/{}", audio_id)
}

/// The one client for the speech synthesis service.
pub struct TtsServiceClient {
    client: ServiceClient,
    request_timeout: Duration,
    default_voice: String,
}

impl TtsServiceClient {
    pub fn new(client: ServiceClient, request_timeout: Duration, default_voice: impl Into<String>) -> Self {
        Self {
            client,
            request_timeout,
            default_voice: default_voice.into(),
        }
    }

    pub fn service_client(&self) -> &ServiceClient {
        &self.client
    }

    fn options(&self) -> CallOptions {
        CallOptions::default().with_timeout(self.request_timeout)
    }
}

#[async_trait]
impl SpeechSynthesizer for TtsServiceClient {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<String, ServiceCallError> {
        let text = text.trim();
        info!(chars = text.len(), voice, "Requesting speech synthesis");

        let response: SynthesisResponse = self
            .client
            .call_as(
                &Operation::post("/synthesize"),
                RequestBody::Json(json!({ "text": text, "voice": voice })),
                self.options(),
            )
            .await?;

        response.audio_id.or(response.id).ok_or_else(|| {
            ServiceError {
                service: self.client.service(),
                kind: ServiceErrorKind::Application,
                status: None,
                message: "Synthesis response carried no audio id".to_string(),
            }
            .into()
        })
    }

    async fn download(&self, audio_id: &str) -> Result<Bytes, ServiceCallError> {
        let audio = self
            .client
            .fetch_bytes(
                &Operation::get(download_path(audio_id)),
                RequestBody::Empty,
                self.options(),
            )
            .await?;
        debug!(audio_id, bytes = audio.len(), "Synthesized audio downloaded");
        Ok(audio)
    }

    async fn cleanup(&self, audio_id: &str) -> Result<(), ServiceCallError> {
        self.client
            .fetch_bytes(
                &Operation::delete(format!("/cleanup/{}", audio_id)),
                RequestBody::Empty,
                CallOptions::default().idempotent(false),
            )
            .await?;
        debug!(audio_id, "Synthesized audio cleaned up");
        Ok(())
    }

    async fn voices(&self) -> Result<VoiceCatalog, ServiceCallError> {
        match self
            .client
            .call_as::<VoiceCatalog>(&Operation::get("/voices"), RequestBody::Empty, CallOptions::default())
            .await
        {
            Ok(catalog) => Ok(catalog),
            Err(e) => {
                warn!(error = %e, default_voice = %self.default_voice, "Voice list unavailable, using default voice");
                Ok(VoiceCatalog::fallback(&self.default_voice))
            }
        }
    }

    fn download_url(&self, audio_id: &str) -> Option<String> {
        self.client
            .url_for(&download_path(audio_id))
            .map(|url| url.to_string())
    }
}
