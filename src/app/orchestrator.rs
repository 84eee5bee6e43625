use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::app::in_flight::InFlightGuard;
use crate::app::preview::{PreviewHandle, PreviewRegistry};
use crate::app::synthesis::SpeechSynthesisWorkflow;
use crate::domain::workflow::checkpoint;
use crate::domain::{
    AudioFile, ErrorRecord, FileMetadata, FileValidator, JobRequest, JobStatus, NormalizedResult,
    PerformedTask, ServiceCallError, TaskKind, WorkflowError, WorkflowJob, WorkflowState,
    WorkflowStep, WorkflowStepError,
};
use crate::ports::{Clock, PresentationAdapter, TranscribeRequest, Transcriber, Translator, WhisperTask};

struct OrchestratorInner {
    state: WorkflowState,
    file: Option<AudioFile>,
    preview: Option<PreviewHandle>,
    job: Option<WorkflowJob>,
}

fn step_error(step: WorkflowStep) -> impl FnOnce(ServiceCallError) -> WorkflowError {
    move |source| WorkflowStepError { step, source }.into()
}

/// Drives a job through transcription and optional translation.
///
/// Only one job may be in flight; a second `start` is rejected, never
/// queued. Steps run strictly one after another and a failed step ends the
/// job without exposing partial output.
pub struct WorkflowOrchestrator {
    transcriber: Arc<dyn Transcriber>,
    translator: Arc<dyn Translator>,
    synthesis: Arc<SpeechSynthesisWorkflow>,
    presenter: Arc<dyn PresentationAdapter>,
    validator: FileValidator,
    previews: PreviewRegistry,
    clock: Arc<dyn Clock>,
    inner: Mutex<OrchestratorInner>,
}

impl WorkflowOrchestrator {
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        translator: Arc<dyn Translator>,
        synthesis: Arc<SpeechSynthesisWorkflow>,
        presenter: Arc<dyn PresentationAdapter>,
        validator: FileValidator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            transcriber,
            translator,
            synthesis,
            presenter,
            validator,
            previews: PreviewRegistry::new(),
            clock,
            inner: Mutex::new(OrchestratorInner {
                state: WorkflowState::Idle,
                file: None,
                preview: None,
                job: None,
            }),
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.inner.lock().state
    }

    /// Snapshot of the current or last job.
    pub fn current_job(&self) -> Option<WorkflowJob> {
        self.inner.lock().job.clone()
    }

    /// Result of the last job, only once it completed.
    pub fn last_result(&self) -> Option<NormalizedResult> {
        let inner = self.inner.lock();
        inner
            .job
            .as_ref()
            .filter(|job| job.status == JobStatus::Complete)
            .and_then(|job| job.result.clone())
    }

    pub fn selected_file(&self) -> Option<FileMetadata> {
        self.inner.lock().file.as_ref().map(AudioFile::metadata)
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    pub fn synthesis(&self) -> &Arc<SpeechSynthesisWorkflow> {
        &self.synthesis
    }

    /// Validate and select an input file, replacing any previous one.
    pub fn select_file(&self, file: AudioFile) -> Result<FileMetadata, WorkflowError> {
        if let Err(violations) = self.validator.validate(&file) {
            warn!(file = file.name(), "File rejected: {}", violations);
            return Err(self.fail(violations.into()));
        }

        let metadata = file.metadata();
        let replaced = {
            let mut inner = self.inner.lock();
            if !inner.state.can_select_file() {
                drop(inner);
                return Err(self.fail(WorkflowError::JobInFlight));
            }

            let preview = self.previews.acquire(&file);
            inner.state = WorkflowState::FileSelected;
            inner.file = Some(file);
            inner.job = None;
            inner.preview.replace(preview)
        };
        drop(replaced);

        info!(file = %metadata.name, size = metadata.size, "File selected");
        self.presenter.clear_result();
        self.presenter.render_file(&metadata);
        Ok(metadata)
    }

    /// Forget the selected file and any result.
    pub fn clear_file(&self) -> Result<(), WorkflowError> {
        let released = {
            let mut inner = self.inner.lock();
            if inner.state.is_in_flight() {
                drop(inner);
                return Err(self.fail(WorkflowError::JobInFlight));
            }

            inner.state = WorkflowState::Idle;
            inner.file = None;
            inner.job = None;
            inner.preview.take()
        };
        drop(released);

        self.presenter.clear_file();
        self.presenter.clear_result();
        self.presenter.hide_progress();
        Ok(())
    }

    /// `clear_file`, plus removal of any synthesized speech.
    pub async fn reset(&self) -> Result<(), WorkflowError> {
        self.clear_file()?;
        self.synthesis.clear().await;
        info!("Workflow reset");
        Ok(())
    }

    /// Run a job on the selected file.
    pub async fn start(&self, request: JobRequest) -> Result<NormalizedResult, WorkflowError> {
        let job = {
            let mut inner = self.inner.lock();
            if inner.state.is_in_flight() {
                drop(inner);
                warn!("Start rejected, a job is already running");
                return Err(self.fail(WorkflowError::JobInFlight));
            }
            let can_start = inner.state.can_start();
            let file = match inner.file.clone() {
                Some(file) if can_start => file,
                _ => {
                    drop(inner);
                    return Err(self.fail(WorkflowError::NoFileSelected));
                }
            };

            let mut job = WorkflowJob::new(file, request, self.clock.now());
            job.status = JobStatus::Transcribing;
            inner.state = WorkflowState::Transcribing;
            inner.job = Some(job.clone());
            job
        };

        info!(job_id = %job.id, task = ?job.task, file = job.input_file.name(), "Job started");
        self.presenter.clear_result();
        self.presenter
            .show_progress(checkpoint::STARTED, "Uploading and processing audio...");

        let abandoned = InFlightGuard::new(|| self.abandon_job());
        let outcome = self.run(&job).await;
        abandoned.disarm();
        self.finish(outcome)
    }

    /// Speak the completed result. The job stays complete whether or not
    /// synthesis succeeds; on success the returned result carries the
    /// artifact id.
    pub async fn speak_result(&self, voice: Option<&str>) -> Result<NormalizedResult, WorkflowError> {
        let result = {
            let mut inner = self.inner.lock();
            if inner.state.is_in_flight() {
                drop(inner);
                return Err(self.fail(WorkflowError::JobInFlight));
            }
            let result = match (inner.state, inner.job.as_ref().and_then(|j| j.result.clone())) {
                (WorkflowState::Complete, Some(result)) => result,
                _ => {
                    drop(inner);
                    return Err(self.fail(WorkflowError::NoResult));
                }
            };

            inner.state = WorkflowState::SynthesizingSpeech;
            if let Some(job) = inner.job.as_mut() {
                job.status = JobStatus::Synthesizing;
            }
            result
        };

        let abandoned = InFlightGuard::new(|| self.restore_complete());
        let outcome = self.synthesis.synthesize(result.text(), voice).await;
        abandoned.disarm();

        let mut inner = self.inner.lock();
        inner.state = WorkflowState::Complete;
        let job = inner.job.as_mut();
        match outcome {
            Ok(audio) => {
                let with_audio = result.with_audio_artifact(audio.audio_id);
                if let Some(job) = job {
                    job.status = JobStatus::Complete;
                    job.result = Some(with_audio.clone());
                }
                Ok(with_audio)
            }
            Err(err) => {
                if let Some(job) = job {
                    job.status = JobStatus::Complete;
                }
                Err(err)
            }
        }
    }

    async fn run(&self, job: &WorkflowJob) -> Result<NormalizedResult, WorkflowError> {
        let two_step = job.task.is_two_step();
        let whisper_task = match job.task {
            TaskKind::WhisperTranslate => WhisperTask::Translate,
            TaskKind::Transcribe | TaskKind::Translate => WhisperTask::Transcribe,
        };

        if two_step {
            self.advance(
                WorkflowState::Transcribing,
                JobStatus::Transcribing,
                checkpoint::TRANSCRIBING,
                "Transcribing audio...",
            );
        }

        let output = self
            .transcriber
            .transcribe(TranscribeRequest {
                audio: job.input_file.clone(),
                language: job.source_language.clone(),
                task: whisper_task,
                target_language: (whisper_task == WhisperTask::Translate)
                    .then(|| job.target_language_or_default().to_string()),
            })
            .await
            .map_err(step_error(WorkflowStep::Transcription))?;

        let performed = output
            .task
            .as_deref()
            .and_then(PerformedTask::parse)
            .unwrap_or(match whisper_task {
                WhisperTask::Transcribe => PerformedTask::Transcribe,
                WhisperTask::Translate => PerformedTask::Translate,
            });
        let transcript =
            NormalizedResult::transcribed(output.text, output.language, output.model_size, performed);

        if !two_step {
            return Ok(transcript);
        }

        self.advance(
            WorkflowState::Translating,
            JobStatus::Translating,
            checkpoint::TRANSLATING,
            "Translating text...",
        );

        let target = job.target_language_or_default().to_string();
        let translated = self
            .translator
            .translate(transcript.text(), &target)
            .await
            .map_err(step_error(WorkflowStep::Translation))?;

        Ok(NormalizedResult::translated(transcript, translated, target))
    }

    fn advance(&self, state: WorkflowState, status: JobStatus, percent: u8, label: &str) {
        {
            let mut inner = self.inner.lock();
            inner.state = state;
            if let Some(job) = inner.job.as_mut() {
                job.status = status;
                job.progress_percent = percent;
            }
        }
        self.presenter.show_progress(percent, label);
    }

    fn finish(
        &self,
        outcome: Result<NormalizedResult, WorkflowError>,
    ) -> Result<NormalizedResult, WorkflowError> {
        let mut inner = self.inner.lock();
        match outcome {
            Ok(result) => {
                inner.state = WorkflowState::Complete;
                if let Some(job) = inner.job.as_mut() {
                    job.status = JobStatus::Complete;
                    job.progress_percent = checkpoint::COMPLETE;
                    job.result = Some(result.clone());
                    info!(job_id = %job.id, task = result.task_performed().as_str(), "Job complete");
                }
                drop(inner);

                self.presenter.show_progress(checkpoint::COMPLETE, "Complete");
                self.presenter.hide_progress();
                self.presenter.render_result(&result);
                self.presenter.toast("Processing completed successfully");
                Ok(result)
            }
            Err(err) => {
                inner.state = WorkflowState::Failed;
                if let Some(job) = inner.job.as_mut() {
                    job.status = JobStatus::Failed;
                    job.result = None;
                    job.error = Some(ErrorRecord {
                        step: err.step(),
                        message: err.to_string(),
                    });
                    warn!(job_id = %job.id, step = ?err.step(), "Job failed: {}", err);
                }
                drop(inner);

                self.presenter.hide_progress();
                Err(self.fail(err))
            }
        }
    }

    /// The `start` future was dropped mid-job.
    fn abandon_job(&self) {
        let err = WorkflowError::Cancelled;
        {
            let mut inner = self.inner.lock();
            if !inner.state.is_in_flight() {
                return;
            }
            inner.state = WorkflowState::Failed;
            if let Some(job) = inner.job.as_mut() {
                job.status = JobStatus::Failed;
                job.result = None;
                job.error = Some(ErrorRecord {
                    step: None,
                    message: err.to_string(),
                });
                warn!(job_id = %job.id, "Job abandoned before completion");
            }
        }
        self.presenter.hide_progress();
    }

    /// The `speak_result` future was dropped; the transcript is still valid.
    fn restore_complete(&self) {
        let mut inner = self.inner.lock();
        if inner.state == WorkflowState::SynthesizingSpeech {
            inner.state = WorkflowState::Complete;
            if let Some(job) = inner.job.as_mut() {
                job.status = JobStatus::Complete;
            }
        }
    }

    fn fail(&self, err: WorkflowError) -> WorkflowError {
        self.presenter.render_error(&err);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use bytes::Bytes;
    use serde_json::Value;
    use tokio::sync::Notify;

    use crate::domain::{
        DisplayHint, ServiceError, ServiceKind, SynthesisState, UploadConfig, VoiceCatalog,
    };
    use crate::ports::{SpeechSynthesizer, TranscriptionOutput};
    use crate::testing::{FakeClock, RecordingPresenter, Rendered};

    #[derive(Default)]
    struct StubTranscriber {
        gate: Option<Notify>,
        fail: bool,
        requests: parking_lot::Mutex<Vec<TranscribeRequest>>,
    }

    #[async_trait]
    impl Transcriber for StubTranscriber {
        async fn transcribe(&self, request: TranscribeRequest) -> Result<TranscriptionOutput, ServiceCallError> {
            let task = request.task.as_str().to_string();
            self.requests.lock().push(request);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fail {
                return Err(ServiceError::network(ServiceKind::Transcription, "refused").into());
            }
            Ok(TranscriptionOutput {
                text: "hello".to_string(),
                language: Some("en".to_string()),
                model_size: Some("base".to_string()),
                task: Some(task),
            })
        }

        async fn languages(&self) -> Result<Vec<String>, ServiceCallError> {
            Ok(vec![])
        }

        async fn translation_languages(&self) -> Result<Vec<String>, ServiceCallError> {
            Ok(vec![])
        }

        async fn model_info(&self) -> Result<Value, ServiceCallError> {
            Ok(Value::Null)
        }
    }

    struct StubTranslator {
        fail: bool,
    }

    #[async_trait]
    impl Translator for StubTranslator {
        async fn translate(&self, text: &str, target_language: &str) -> Result<String, ServiceCallError> {
            if self.fail {
                return Err(ServiceError::application(
                    ServiceKind::Translation,
                    503,
                    "Translation service not available",
                )
                .into());
            }
            Ok(format!("{} ({})", text, target_language))
        }
    }

    struct StubSynth;

    #[async_trait]
    impl SpeechSynthesizer for StubSynth {
        async fn synthesize(&self, _text: &str, _voice: &str) -> Result<String, ServiceCallError> {
            Ok("speech-1".to_string())
        }

        async fn download(&self, _audio_id: &str) -> Result<Bytes, ServiceCallError> {
            Ok(Bytes::new())
        }

        async fn cleanup(&self, _audio_id: &str) -> Result<(), ServiceCallError> {
            Ok(())
        }

        async fn voices(&self) -> Result<VoiceCatalog, ServiceCallError> {
            Ok(VoiceCatalog::fallback("en-US-gtts"))
        }

        fn download_url(&self, audio_id: &str) -> Option<String> {
            Some(format!("http://tts/download/{}", audio_id))
        }
    }

    struct Harness {
        orchestrator: Arc<WorkflowOrchestrator>,
        transcriber: Arc<StubTranscriber>,
        presenter: Arc<RecordingPresenter>,
    }

    fn harness(transcriber: StubTranscriber, translator: StubTranslator) -> Harness {
        let transcriber = Arc::new(transcriber);
        let presenter = RecordingPresenter::new();
        let synthesis = Arc::new(SpeechSynthesisWorkflow::new(
            Arc::new(StubSynth),
            presenter.clone(),
            "en-US-gtts",
        ));
        let orchestrator = Arc::new(WorkflowOrchestrator::new(
            transcriber.clone(),
            Arc::new(translator),
            synthesis,
            presenter.clone(),
            FileValidator::new(&UploadConfig::default()),
            FakeClock::new(),
        ));
        Harness {
            orchestrator,
            transcriber,
            presenter,
        }
    }

    fn ok_harness() -> Harness {
        harness(StubTranscriber::default(), StubTranslator { fail: false })
    }

    fn mp3() -> AudioFile {
        AudioFile::new("talk.mp3", Some("audio/mpeg".to_string()), vec![0u8; 1024])
    }

    #[tokio::test]
    async fn test_start_without_file_rejected() {
        let h = ok_harness();
        let err = h.orchestrator.start(JobRequest::default()).await.unwrap_err();
        assert_eq!(err, WorkflowError::NoFileSelected);
        assert_eq!(h.orchestrator.state(), WorkflowState::Idle);
    }

    #[tokio::test]
    async fn test_invalid_file_keeps_state() {
        let h = ok_harness();
        let bad = AudioFile::new("notes.txt", Some("text/plain".to_string()), vec![0u8; 8]);

        let err = h.orchestrator.select_file(bad).unwrap_err();

        assert_eq!(err.display_hint(), DisplayHint::Inline);
        assert_eq!(h.orchestrator.state(), WorkflowState::Idle);
        assert_eq!(h.orchestrator.previews().live_count(), 0);
    }

    #[tokio::test]
    async fn test_transcribe_job_progress_and_result() {
        let h = ok_harness();
        h.orchestrator.select_file(mp3()).unwrap();

        let result = h
            .orchestrator
            .start(JobRequest::new(TaskKind::Transcribe).with_source_language("auto"))
            .await
            .unwrap();

        assert_eq!(result.text(), "hello");
        assert_eq!(result.task_performed(), PerformedTask::Transcribe);
        assert_eq!(h.orchestrator.state(), WorkflowState::Complete);
        assert_eq!(h.presenter.progress(), vec![0, 100]);
        assert_eq!(h.presenter.results(), vec![result]);

        let sent = h.transcriber.requests.lock();
        assert_eq!(sent[0].language, None);
        assert_eq!(sent[0].task, WhisperTask::Transcribe);
        assert_eq!(sent[0].target_language, None);
    }

    #[tokio::test]
    async fn test_translate_job_runs_both_steps() {
        let h = ok_harness();
        h.orchestrator.select_file(mp3()).unwrap();

        let result = h
            .orchestrator
            .start(JobRequest::new(TaskKind::Translate).with_target_language("es"))
            .await
            .unwrap();

        assert_eq!(result.text(), "hello (es)");
        assert_eq!(result.original_text(), Some("hello"));
        assert_eq!(result.target_language(), Some("es"));
        assert_eq!(result.task_performed(), PerformedTask::Translate);
        assert_eq!(h.presenter.progress(), vec![0, 25, 50, 100]);

        let job = h.orchestrator.current_job().unwrap();
        assert_eq!(job.status, JobStatus::Complete);
        assert_eq!(job.progress_percent, 100);
    }

    #[tokio::test]
    async fn test_whisper_translate_is_single_step() {
        let h = ok_harness();
        h.orchestrator.select_file(mp3()).unwrap();

        let result = h
            .orchestrator
            .start(JobRequest::new(TaskKind::WhisperTranslate))
            .await
            .unwrap();

        assert_eq!(result.task_performed(), PerformedTask::Translate);
        assert!(result.original_text().is_none());
        assert_eq!(h.presenter.progress(), vec![0, 100]);
        let sent = h.transcriber.requests.lock();
        assert_eq!(sent[0].task, WhisperTask::Translate);
        assert_eq!(sent[0].target_language.as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn test_translation_failure_discards_transcript() {
        let h = harness(StubTranscriber::default(), StubTranslator { fail: true });
        h.orchestrator.select_file(mp3()).unwrap();

        let err = h
            .orchestrator
            .start(JobRequest::new(TaskKind::Translate).with_target_language("fr"))
            .await
            .unwrap_err();

        assert_eq!(err.step(), Some(WorkflowStep::Translation));
        assert!(err.to_string().starts_with("translation step failed"));
        assert_eq!(h.orchestrator.state(), WorkflowState::Failed);
        assert!(h.orchestrator.last_result().is_none());
        assert!(h.presenter.results().is_empty());

        let job = h.orchestrator.current_job().unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.result.is_none());
        assert_eq!(job.error.unwrap().step, Some(WorkflowStep::Translation));
    }

    #[tokio::test]
    async fn test_transcription_network_failure_is_retryable() {
        let h = harness(
            StubTranscriber {
                fail: true,
                ..StubTranscriber::default()
            },
            StubTranslator { fail: false },
        );
        h.orchestrator.select_file(mp3()).unwrap();

        let err = h.orchestrator.start(JobRequest::default()).await.unwrap_err();

        assert_eq!(err.display_hint(), DisplayHint::Retryable);
        assert_eq!(h.presenter.errors().len(), 1);

        // A failed job can be started again from the same file.
        assert!(h.orchestrator.state().can_start());
    }

    #[tokio::test]
    async fn test_concurrent_start_rejected() {
        let h = harness(
            StubTranscriber {
                gate: Some(Notify::new()),
                ..StubTranscriber::default()
            },
            StubTranslator { fail: false },
        );
        h.orchestrator.select_file(mp3()).unwrap();

        let running = {
            let orchestrator = Arc::clone(&h.orchestrator);
            tokio::spawn(async move { orchestrator.start(JobRequest::default()).await })
        };
        while h.transcriber.requests.lock().is_empty() {
            tokio::task::yield_now().await;
        }
        let first_job = h.orchestrator.current_job().unwrap();

        let err = h.orchestrator.start(JobRequest::default()).await.unwrap_err();
        assert_eq!(err, WorkflowError::JobInFlight);
        assert_eq!(h.orchestrator.select_file(mp3()).unwrap_err(), WorkflowError::JobInFlight);
        assert_eq!(h.orchestrator.clear_file().unwrap_err(), WorkflowError::JobInFlight);
        assert_eq!(h.orchestrator.state(), WorkflowState::Transcribing);

        if let Some(gate) = &h.transcriber.gate {
            gate.notify_one();
        }
        let result = running.await.unwrap().unwrap();

        assert_eq!(result.text(), "hello");
        let job = h.orchestrator.current_job().unwrap();
        assert_eq!(job.id, first_job.id);
        assert_eq!(job.status, JobStatus::Complete);
        assert_eq!(h.transcriber.requests.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_dropped_start_leaves_job_failed() {
        let h = harness(
            StubTranscriber {
                gate: Some(Notify::new()),
                ..StubTranscriber::default()
            },
            StubTranslator { fail: false },
        );
        h.orchestrator.select_file(mp3()).unwrap();

        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            h.orchestrator.start(JobRequest::default()),
        )
        .await;
        assert!(timed_out.is_err());

        assert_eq!(h.orchestrator.state(), WorkflowState::Failed);
        let job = h.orchestrator.current_job().unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.result.is_none());
        assert_eq!(
            job.error.map(|e| e.message),
            Some(WorkflowError::Cancelled.to_string())
        );
        assert!(h.orchestrator.last_result().is_none());

        if let Some(gate) = &h.transcriber.gate {
            gate.notify_one();
        }
        let result = h.orchestrator.start(JobRequest::default()).await.unwrap();
        assert_eq!(result.text(), "hello");
        assert_eq!(h.orchestrator.state(), WorkflowState::Complete);
        h.orchestrator.clear_file().unwrap();
    }

    #[tokio::test]
    async fn test_previews_released_on_replace_and_clear() {
        let h = ok_harness();

        h.orchestrator.select_file(mp3()).unwrap();
        h.orchestrator.select_file(mp3()).unwrap();
        assert_eq!(h.orchestrator.previews().live_count(), 1);

        h.orchestrator.clear_file().unwrap();
        assert_eq!(h.orchestrator.previews().live_count(), 0);
        assert_eq!(h.orchestrator.state(), WorkflowState::Idle);
        assert!(h.presenter.events().contains(&Rendered::ClearFile));
    }

    #[tokio::test]
    async fn test_speak_result_attaches_artifact() {
        let h = ok_harness();
        assert_eq!(
            h.orchestrator.speak_result(None).await.unwrap_err(),
            WorkflowError::NoResult
        );

        h.orchestrator.select_file(mp3()).unwrap();
        h.orchestrator.start(JobRequest::default()).await.unwrap();

        let spoken = h.orchestrator.speak_result(Some("en-GB")).await.unwrap();

        assert_eq!(spoken.audio_artifact_id(), Some("speech-1"));
        assert_eq!(h.orchestrator.state(), WorkflowState::Complete);
        assert_eq!(h.orchestrator.last_result(), Some(spoken));
        assert_eq!(h.orchestrator.synthesis().state(), SynthesisState::Ready);
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let h = ok_harness();
        h.orchestrator.select_file(mp3()).unwrap();
        h.orchestrator.start(JobRequest::default()).await.unwrap();
        h.orchestrator.speak_result(None).await.unwrap();

        h.orchestrator.reset().await.unwrap();

        assert_eq!(h.orchestrator.state(), WorkflowState::Idle);
        assert!(h.orchestrator.current_job().is_none());
        assert!(h.orchestrator.selected_file().is_none());
        assert_eq!(h.orchestrator.synthesis().state(), SynthesisState::Idle);
        assert_eq!(h.orchestrator.previews().live_count(), 0);
    }
}
