use crate::domain::{
    FileMetadata, NormalizedResult, ServiceKind, ServiceStatus, SynthesizedAudio, WorkflowError,
};

/// Rendering side of the client (progress bar, result panel, toasts).
///
/// Implemented outside the core; the orchestration layer only calls into
/// it and never reads back from it.
pub trait PresentationAdapter: Send + Sync {
    /// Show the selected file and its preview.
    fn render_file(&self, metadata: &FileMetadata);

    /// The selected file was removed.
    fn clear_file(&self);

    /// Update the progress bar (0-100) and its label.
    fn show_progress(&self, percent: u8, label: &str);

    fn hide_progress(&self);

    fn render_result(&self, result: &NormalizedResult);

    fn clear_result(&self);

    /// Surface an error; `WorkflowError::display_hint` tells how.
    fn render_error(&self, error: &WorkflowError);

    fn render_synthesis(&self, audio: &SynthesizedAudio);

    fn clear_synthesis(&self);

    fn set_service_status(&self, service: ServiceKind, status: &ServiceStatus);

    /// Short transient notification.
    fn toast(&self, message: &str);
}
