pub mod config;
pub mod error;
pub mod language;
pub mod result;
pub mod service;
pub mod synthesis;
pub mod upload;
pub mod workflow;

pub use config::{AppConfig, EndpointsConfig, RetryConfig, SynthesisConfig, UploadConfig};
pub use error::{
    DisplayHint, DomainError, ServiceCallError, ServiceError, ServiceErrorKind,
    UnreachableServiceError, ValidationError, WorkflowError, WorkflowStepError,
};
pub use language::{default_languages, LanguageCatalog};
pub use result::NormalizedResult;
pub use service::{ServiceEndpoint, ServiceHealth, ServiceKind, ServiceStatus};
pub use synthesis::{SynthesisState, SynthesizedAudio, VoiceCatalog};
pub use upload::{AudioFile, FileMetadata, FileValidator, ValidationViolation};
pub use workflow::{
    ErrorRecord, JobRequest, JobStatus, PerformedTask, TaskKind, WorkflowJob, WorkflowState,
    WorkflowStep,
};
