use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::app::in_flight::InFlightGuard;
use crate::domain::{
    SynthesisState, SynthesizedAudio, VoiceCatalog, WorkflowError, WorkflowStep, WorkflowStepError,
};
use crate::ports::{PresentationAdapter, SpeechSynthesizer};

struct SynthesisInner {
    state: SynthesisState,
    current: Option<SynthesizedAudio>,
}

/// Text-to-speech lifecycle layered on top of a finished transcript.
///
/// At most one synthesis runs at a time. Starting a new one first asks the
/// service to delete the previous artifact; that cleanup is best-effort.
pub struct SpeechSynthesisWorkflow {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    presenter: Arc<dyn PresentationAdapter>,
    default_voice: String,
    inner: Mutex<SynthesisInner>,
}

impl SpeechSynthesisWorkflow {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        presenter: Arc<dyn PresentationAdapter>,
        default_voice: impl Into<String>,
    ) -> Self {
        Self {
            synthesizer,
            presenter,
            default_voice: default_voice.into(),
            inner: Mutex::new(SynthesisInner {
                state: SynthesisState::Idle,
                current: None,
            }),
        }
    }

    pub fn state(&self) -> SynthesisState {
        self.inner.lock().state
    }

    /// The artifact currently shown, if any.
    pub fn current(&self) -> Option<SynthesizedAudio> {
        self.inner.lock().current.clone()
    }

    pub fn default_voice(&self) -> &str {
        &self.default_voice
    }

    /// Available voices; a single default voice when the service cannot say.
    pub async fn voices(&self) -> VoiceCatalog {
        match self.synthesizer.voices().await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "Failed to load voices");
                VoiceCatalog::fallback(&self.default_voice)
            }
        }
    }

    /// Generate speech for `text` with `voice` (or the default voice).
    pub async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
    ) -> Result<SynthesizedAudio, WorkflowError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(self.fail(WorkflowError::EmptyText));
        }

        let previous = {
            let mut inner = self.inner.lock();
            if !inner.state.can_synthesize() {
                drop(inner);
                return Err(self.fail(WorkflowError::SynthesisInFlight));
            }
            inner.state = SynthesisState::Synthesizing;
            inner.current.take()
        };
        let abandoned = InFlightGuard::new(|| {
            let mut inner = self.inner.lock();
            if inner.state == SynthesisState::Synthesizing {
                inner.state = SynthesisState::Idle;
            }
        });

        if let Some(previous) = previous {
            self.presenter.clear_synthesis();
            self.cleanup_quietly(&previous.audio_id).await;
        }

        let voice = voice.filter(|v| !v.is_empty()).unwrap_or(self.default_voice.as_str());
        info!(voice, chars = text.len(), "Synthesizing speech");

        let outcome = self.synthesizer.synthesize(text, voice).await;
        abandoned.disarm();

        match outcome {
            Ok(audio_id) => {
                let audio = SynthesizedAudio {
                    download_url: self.synthesizer.download_url(&audio_id).unwrap_or_default(),
                    audio_id,
                    voice: voice.to_string(),
                };

                {
                    let mut inner = self.inner.lock();
                    inner.state = SynthesisState::Ready;
                    inner.current = Some(audio.clone());
                }

                info!(audio_id = %audio.audio_id, "Speech synthesized");
                self.presenter.render_synthesis(&audio);
                Ok(audio)
            }
            Err(source) => {
                self.inner.lock().state = SynthesisState::Idle;
                Err(self.fail(
                    WorkflowStepError {
                        step: WorkflowStep::Synthesis,
                        source,
                    }
                    .into(),
                ))
            }
        }
    }

    /// Hide the current audio and ask the service to delete it.
    pub async fn clear(&self) {
        let previous = {
            let mut inner = self.inner.lock();
            if inner.state == SynthesisState::Ready {
                inner.state = SynthesisState::Idle;
            }
            inner.current.take()
        };

        self.presenter.clear_synthesis();
        if let Some(previous) = previous {
            self.cleanup_quietly(&previous.audio_id).await;
        }
    }

    /// Bytes of the current audio.
    pub async fn download(&self) -> Result<Bytes, WorkflowError> {
        let audio = self.current().ok_or(WorkflowError::NoResult)?;
        self.synthesizer
            .download(&audio.audio_id)
            .await
            .map_err(|source| {
                WorkflowStepError {
                    step: WorkflowStep::Synthesis,
                    source,
                }
                .into()
            })
    }

    /// Save the current audio to `path` through a temporary file.
    pub async fn save_audio(&self, path: &Path) -> Result<u64, WorkflowError> {
        let audio = self.download().await?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| WorkflowError::Export(e.to_string()))?;
        }

        let temp_path = path.with_extension("download");
        if let Err(e) = tokio::fs::write(&temp_path, &audio).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(WorkflowError::Export(e.to_string()));
        }
        if let Err(e) = tokio::fs::rename(&temp_path, path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(WorkflowError::Export(e.to_string()));
        }

        info!(path = ?path, size = audio.len(), "Speech audio saved");
        Ok(audio.len() as u64)
    }

    async fn cleanup_quietly(&self, audio_id: &str) {
        if let Err(e) = self.synthesizer.cleanup(audio_id).await {
            warn!(audio_id, error = %e, "Failed to clean up synthesized audio");
        }
    }

    fn fail(&self, err: WorkflowError) -> WorkflowError {
        self.presenter.render_error(&err);
        err
    }
}
