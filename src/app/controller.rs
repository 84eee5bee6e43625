use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use crate::adapters::{
    EndpointResolver, ReqwestTransport, RetryPolicy, ServiceClient, TokioClock, TomlConfigStore,
    TranslationServiceClient, TtsServiceClient, WhisperBackendClient,
};
use crate::app::orchestrator::WorkflowOrchestrator;
use crate::app::synthesis::SpeechSynthesisWorkflow;
use crate::domain::{
    default_languages, AppConfig, DomainError, FileValidator, LanguageCatalog, NormalizedResult,
    ServiceCallError, ServiceHealth, ServiceKind, ServiceStatus, WorkflowError,
};
use crate::infrastructure::init_logging;
use crate::ports::{Clock, ConfigStore, HttpTransport, PresentationAdapter, Transcriber};

/// Composition root: loads configuration, starts logging and wires the
/// service clients into the workflows.
pub struct AppController {
    config: RwLock<AppConfig>,
    config_store: Arc<dyn ConfigStore>,
    transcription: Arc<WhisperBackendClient>,
    translation: Arc<TranslationServiceClient>,
    speech: Arc<TtsServiceClient>,
    orchestrator: Arc<WorkflowOrchestrator>,
    presenter: Arc<dyn PresentationAdapter>,
    clock: Arc<dyn Clock>,
    _log_guard: Option<WorkerGuard>,
}

impl AppController {
    /// Initialize from the on-disk configuration with the real HTTP stack.
    pub fn new(presenter: Arc<dyn PresentationAdapter>) -> Result<Self, DomainError> {
        let config_store = Arc::new(TomlConfigStore::new()?);
        let config = config_store.load()?;

        let log_guard = init_logging(
            &config_store.logs_dir(),
            &config.logging.level,
            config.logging.file_logging,
        )?;

        info!("VoxRelay starting up");

        let transport = Arc::new(ReqwestTransport::new()?);
        let mut controller =
            Self::with_components(config, config_store, transport, Arc::new(TokioClock), presenter);
        controller._log_guard = log_guard;
        Ok(controller)
    }

    /// Wire everything from explicit parts. Candidate URLs are derived from
    /// `config` here, once.
    pub fn with_components(
        config: AppConfig,
        config_store: Arc<dyn ConfigStore>,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
        presenter: Arc<dyn PresentationAdapter>,
    ) -> Self {
        let policy = RetryPolicy::from(&config.retry);
        let client_for = |kind: ServiceKind| {
            let resolver = EndpointResolver::new(
                kind,
                config.endpoints.candidate_urls(kind),
                Arc::clone(&transport),
                Arc::clone(&clock),
                policy,
            );
            ServiceClient::new(Arc::new(resolver), Arc::clone(&transport), Arc::clone(&clock))
        };

        let transcription = Arc::new(WhisperBackendClient::new(client_for(ServiceKind::Transcription)));
        let translation = Arc::new(TranslationServiceClient::new(client_for(ServiceKind::Translation)));
        let speech = Arc::new(TtsServiceClient::new(
            client_for(ServiceKind::SpeechSynthesis),
            config.synthesis.request_timeout(),
            config.synthesis.default_voice.clone(),
        ));

        let synthesis = Arc::new(SpeechSynthesisWorkflow::new(
            speech.clone(),
            Arc::clone(&presenter),
            config.synthesis.default_voice.clone(),
        ));
        let orchestrator = Arc::new(WorkflowOrchestrator::new(
            transcription.clone(),
            translation.clone(),
            synthesis,
            Arc::clone(&presenter),
            FileValidator::new(&config.upload),
            Arc::clone(&clock),
        ));

        info!(
            max_attempts = policy.max_attempts,
            client_host = %config.endpoints.client_host,
            "AppController initialized"
        );

        Self {
            config: RwLock::new(config),
            config_store,
            transcription,
            translation,
            speech,
            orchestrator,
            presenter,
            clock,
            _log_guard: None,
        }
    }

    pub fn orchestrator(&self) -> &Arc<WorkflowOrchestrator> {
        &self.orchestrator
    }

    pub fn synthesis(&self) -> &Arc<SpeechSynthesisWorkflow> {
        self.orchestrator.synthesis()
    }

    /// Get the current configuration.
    pub fn config(&self) -> AppConfig {
        self.config.read().clone()
    }

    /// Persist a new configuration. Endpoint and retry changes apply on the
    /// next start.
    pub fn update_config(&self, config: AppConfig) -> Result<(), DomainError> {
        self.config_store.save(&config)?;
        *self.config.write() = config;
        info!("Configuration updated");
        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_store.config_path()
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.config_store.logs_dir()
    }

    fn resolver(&self, kind: ServiceKind) -> &Arc<EndpointResolver> {
        match kind {
            ServiceKind::Transcription => self.transcription.service_client().resolver(),
            ServiceKind::Translation => self.translation.service_client().resolver(),
            ServiceKind::SpeechSynthesis => self.speech.service_client().resolver(),
        }
    }

    /// Resolve every service and report its reachability.
    pub async fn check_service_health(&self) -> Vec<ServiceHealth> {
        let mut report = Vec::with_capacity(ServiceKind::ALL.len());

        for kind in ServiceKind::ALL {
            self.presenter.set_service_status(kind, &ServiceStatus::Checking);
            let status = match self.resolver(kind).resolve().await {
                Ok(url) => ServiceStatus::Healthy {
                    url: url.to_string(),
                },
                Err(e) => ServiceStatus::Unreachable {
                    message: e.to_string(),
                },
            };
            self.presenter.set_service_status(kind, &status);
            report.push(ServiceHealth {
                service: kind,
                status,
            });
        }

        report
    }

    /// Fetch language lists and model metadata for the selectors. Lists
    /// that cannot be fetched fall back to the built-in defaults.
    pub async fn load_catalog(&self) -> LanguageCatalog {
        let mut last_error: Option<ServiceCallError> = None;

        let transcription_languages = match self.transcription.languages().await {
            Ok(languages) if !languages.is_empty() => languages,
            Ok(_) => default_languages(),
            Err(e) => {
                warn!(error = %e, "Failed to load languages, using defaults");
                last_error = Some(e);
                default_languages()
            }
        };

        let translation_languages = match self.transcription.translation_languages().await {
            Ok(languages) if !languages.is_empty() => languages,
            Ok(_) => default_languages(),
            Err(e) => {
                warn!(error = %e, "Failed to load translation languages, using defaults");
                last_error = Some(e);
                default_languages()
            }
        };

        let model_info = match self.transcription.model_info().await {
            Ok(info) => Some(info),
            Err(e) => {
                warn!(error = %e, "Failed to load model info");
                last_error = Some(e);
                None
            }
        };

        let status = match (self.transcription.service_client().base_url(), last_error) {
            (Some(url), _) => ServiceStatus::Healthy {
                url: url.to_string(),
            },
            (None, Some(e)) => ServiceStatus::Unreachable {
                message: e.to_string(),
            },
            (None, None) => ServiceStatus::Checking,
        };
        self.presenter
            .set_service_status(ServiceKind::Transcription, &status);

        LanguageCatalog {
            transcription_languages,
            translation_languages,
            model_info,
        }
    }

    /// Write the completed result's text into `dir`.
    pub async fn export_result(&self, dir: &Path) -> Result<PathBuf, WorkflowError> {
        let result = self.orchestrator.last_result().ok_or(WorkflowError::NoResult)?;
        let path = dir.join(NormalizedResult::export_file_name(self.clock.now()));

        let written = async {
            tokio::fs::create_dir_all(dir).await?;
            tokio::fs::write(&path, result.text()).await
        }
        .await;

        if let Err(e) = written {
            let err = WorkflowError::Export(e.to_string());
            self.presenter.render_error(&err);
            return Err(err);
        }

        info!(path = ?path, "Transcription exported");
        self.presenter.toast("Transcription downloaded");
        Ok(path)
    }
}
