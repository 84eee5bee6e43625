use tracing::{error, info, warn};

use crate::domain::{
    DisplayHint, FileMetadata, NormalizedResult, ServiceKind, ServiceStatus, SynthesizedAudio,
    WorkflowError,
};
use crate::ports::PresentationAdapter;

/// Headless presenter that writes every UI update to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPresenter;

impl PresentationAdapter for TracingPresenter {
    fn render_file(&self, metadata: &FileMetadata) {
        info!(
            name = %metadata.name,
            size = %metadata.formatted_size,
            mime_type = %metadata.mime_type,
            "File selected"
        );
    }

    fn clear_file(&self) {
        info!("File cleared");
    }

    fn show_progress(&self, percent: u8, label: &str) {
        info!(percent, label, "Progress");
    }

    fn hide_progress(&self) {}

    fn render_result(&self, result: &NormalizedResult) {
        info!(
            task = result.task_performed().as_str(),
            language = result.detected_language(),
            model = result.model_identifier(),
            chars = result.text().len(),
            "Result ready"
        );
    }

    fn clear_result(&self) {}

    fn render_error(&self, err: &WorkflowError) {
        match err.display_hint() {
            DisplayHint::Inline | DisplayHint::Retryable => warn!(step = ?err.step(), "{}", err),
            DisplayHint::ConnectivityBanner | DisplayHint::Message => {
                error!(step = ?err.step(), "{}", err)
            }
        }
    }

    fn render_synthesis(&self, audio: &SynthesizedAudio) {
        info!(audio_id = %audio.audio_id, voice = %audio.voice, url = %audio.download_url, "Speech ready");
    }

    fn clear_synthesis(&self) {}

    fn set_service_status(&self, service: ServiceKind, status: &ServiceStatus) {
        match status {
            ServiceStatus::Checking => info!(service = %service, "Checking service"),
            ServiceStatus::Healthy { url } => info!(service = %service, url = %url, "Service healthy"),
            ServiceStatus::Unreachable { message } => {
                warn!(service = %service, message = %message, "Service unreachable")
            }
        }
    }

    fn toast(&self, message: &str) {
        info!("{}", message);
    }
}
