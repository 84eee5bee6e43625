//! VoxRelay: client-side orchestration for transcription, translation and
//! speech synthesis backends.
//!
//! Service discovery, request plumbing and the job state machine live here;
//! rendering is left to a [`ports::PresentationAdapter`] implementation.

#![forbid(unsafe_code)]

pub mod adapters;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{AppController, SpeechSynthesisWorkflow, WorkflowOrchestrator};
pub use domain::{
    AppConfig, AudioFile, JobRequest, NormalizedResult, TaskKind, WorkflowError, WorkflowState,
};
