use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::result::NormalizedResult;
use crate::domain::upload::AudioFile;

/// Orchestrator state machine.
///
/// State transitions:
/// - Idle | FileSelected | Complete | Failed -> FileSelected (select_file)
/// - FileSelected | Complete | Failed -> Transcribing (start, file present)
/// - Transcribing -> Translating (task = translate)
/// - Transcribing | Translating -> Complete
/// - Transcribing | Translating -> Failed
/// - Complete -> SynthesizingSpeech -> Complete (speak_result)
///
/// A failed job is never resumed: the user starts again from the selected file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    Idle,
    FileSelected,
    Transcribing,
    Translating,
    SynthesizingSpeech,
    Complete,
    Failed,
}

impl WorkflowState {
    /// A job is running and owns the orchestrator.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            WorkflowState::Transcribing
                | WorkflowState::Translating
                | WorkflowState::SynthesizingSpeech
        )
    }

    #[must_use]
    pub fn can_select_file(&self) -> bool {
        !self.is_in_flight()
    }

    #[must_use]
    pub fn can_start(&self) -> bool {
        matches!(
            self,
            WorkflowState::FileSelected | WorkflowState::Complete | WorkflowState::Failed
        )
    }
}

/// Step of a job that talks to a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    Transcription,
    Translation,
    Synthesis,
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WorkflowStep::Transcription => "transcription",
            WorkflowStep::Translation => "translation",
            WorkflowStep::Synthesis => "synthesis",
        })
    }
}

/// Task requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Plain speech-to-text.
    #[default]
    Transcribe,
    /// Transcribe, then translate the text with the translation service.
    Translate,
    /// The transcription service's own built-in translate mode.
    WhisperTranslate,
}

impl TaskKind {
    #[must_use]
    pub fn is_two_step(&self) -> bool {
        matches!(self, TaskKind::Translate)
    }
}

/// Task as reported in the final result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformedTask {
    Transcribe,
    Translate,
}

impl PerformedTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformedTask::Transcribe => "transcribe",
            PerformedTask::Translate => "translate",
        }
    }

    /// Parse the task string a transcription service echoes back.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "transcribe" => Some(PerformedTask::Transcribe),
            "translate" => Some(PerformedTask::Translate),
            _ => None,
        }
    }
}

/// Lifecycle of a single job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Transcribing,
    Translating,
    Synthesizing,
    Complete,
    Failed,
}

impl JobStatus {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Complete | JobStatus::Failed)
    }
}

/// User choices for a job.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobRequest {
    pub task: TaskKind,
    /// Source language hint; empty or "auto" means auto-detect.
    pub source_language: Option<String>,
    pub target_language: Option<String>,
}

impl JobRequest {
    pub fn new(task: TaskKind) -> Self {
        Self {
            task,
            ..Self::default()
        }
    }

    pub fn with_source_language(mut self, language: impl Into<String>) -> Self {
        self.source_language = Some(language.into());
        self
    }

    pub fn with_target_language(mut self, language: impl Into<String>) -> Self {
        self.target_language = Some(language.into());
        self
    }
}

/// Failure details kept on a failed job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub step: Option<WorkflowStep>,
    pub message: String,
}

/// Progress checkpoints reported while a job runs.
pub mod checkpoint {
    pub const STARTED: u8 = 0;
    pub const TRANSCRIBING: u8 = 25;
    pub const TRANSLATING: u8 = 50;
    pub const COMPLETE: u8 = 100;
}

/// A user-initiated job. Owned and mutated only by the orchestrator.
#[derive(Debug, Clone)]
pub struct WorkflowJob {
    pub id: Uuid,
    pub input_file: AudioFile,
    pub task: TaskKind,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub status: JobStatus,
    pub progress_percent: u8,
    pub result: Option<NormalizedResult>,
    pub error: Option<ErrorRecord>,
    pub created_at: DateTime<Utc>,
}

impl WorkflowJob {
    pub fn new(input_file: AudioFile, request: JobRequest, created_at: DateTime<Utc>) -> Self {
        let source_language = request
            .source_language
            .filter(|l| !l.is_empty() && !l.eq_ignore_ascii_case("auto"));
        let target_language = request.target_language.filter(|l| !l.is_empty());

        Self {
            id: Uuid::new_v4(),
            input_file,
            task: request.task,
            source_language,
            target_language,
            status: JobStatus::Pending,
            progress_percent: checkpoint::STARTED,
            result: None,
            error: None,
            created_at,
        }
    }

    /// Target language, defaulting to English.
    pub fn target_language_or_default(&self) -> &str {
        self.target_language.as_deref().unwrap_or("en")
    }
}
