use serde::Serialize;
use thiserror::Error;

use crate::domain::service::ServiceKind;
use crate::domain::upload::ValidationViolation;
use crate::domain::workflow::WorkflowStep;

/// Ambient failures: configuration, filesystem, serialization.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for DomainError {
    fn from(err: toml::de::Error) -> Self {
        DomainError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for DomainError {
    fn from(err: toml::ser::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

/// Rejected input file. Lists every violated rule, not just the first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<ValidationViolation>,
}

fn join_violations(violations: &[ValidationViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// No candidate endpoint answered its liveness check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{service} service is not accessible ({attempts} probe attempts failed)")]
pub struct UnreachableServiceError {
    pub service: ServiceKind,
    pub candidates: Vec<String>,
    pub attempts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceErrorKind {
    /// Connection refused, reset or timed out.
    Network,
    /// The service answered but rejected the request.
    Application,
}

/// Failure of a single request against a resolved service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ServiceError {
    pub service: ServiceKind,
    pub kind: ServiceErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ServiceError {
    pub fn network(service: ServiceKind, message: impl Into<String>) -> Self {
        Self {
            service,
            kind: ServiceErrorKind::Network,
            status: None,
            message: message.into(),
        }
    }

    pub fn application(service: ServiceKind, status: u16, message: impl Into<String>) -> Self {
        Self {
            service,
            kind: ServiceErrorKind::Application,
            status: Some(status),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_network(&self) -> bool {
        self.kind == ServiceErrorKind::Network
    }
}

/// Everything a `ServiceClient` call can fail with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceCallError {
    #[error(transparent)]
    Unreachable(#[from] UnreachableServiceError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// A service failure qualified with the workflow step it interrupted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{step} step failed: {source}")]
pub struct WorkflowStepError {
    pub step: WorkflowStep,
    pub source: ServiceCallError,
}

/// Errors surfaced by the orchestration layer to the presentation layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No file selected")]
    NoFileSelected,

    #[error("A job is already in progress")]
    JobInFlight,

    #[error("Speech synthesis is already in progress")]
    SynthesisInFlight,

    #[error("Job was cancelled before it finished")]
    Cancelled,

    #[error("No completed result available")]
    NoResult,

    #[error("No text to speak")]
    EmptyText,

    #[error("Failed to save file: {0}")]
    Export(String),

    #[error(transparent)]
    Step(#[from] WorkflowStepError),
}

/// How the presentation layer should surface an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayHint {
    /// User-correctable, shown next to the input.
    Inline,
    /// No backend answered; shown as a connectivity banner.
    ConnectivityBanner,
    /// Transport failure mid-session; the user may simply try again.
    Retryable,
    /// Shown verbatim.
    Message,
}

impl WorkflowError {
    pub fn display_hint(&self) -> DisplayHint {
        match self {
            WorkflowError::Validation(_) => DisplayHint::Inline,
            WorkflowError::Step(step) => match &step.source {
                ServiceCallError::Unreachable(_) => DisplayHint::ConnectivityBanner,
                ServiceCallError::Service(e) if e.is_network() => DisplayHint::Retryable,
                ServiceCallError::Service(_) => DisplayHint::Message,
            },
            _ => DisplayHint::Message,
        }
    }

    /// Step that failed, if the error came from a service call.
    pub fn step(&self) -> Option<WorkflowStep> {
        match self {
            WorkflowError::Step(e) => Some(e.step),
            _ => None,
        }
    }
}
