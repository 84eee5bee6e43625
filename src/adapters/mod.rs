pub mod config_store;
pub mod endpoint_resolver;
pub mod reqwest_transport;
pub mod service_client;
pub mod tokio_clock;
pub mod tracing_presenter;
pub mod translation_service;
pub mod tts_service;
pub mod whisper_backend;

pub use config_store::TomlConfigStore;
pub use endpoint_resolver::{EndpointResolver, RetryPolicy};
pub use reqwest_transport::ReqwestTransport;
pub use service_client::{CallOptions, Operation, ServiceClient};
pub use tokio_clock::TokioClock;
pub use tracing_presenter::TracingPresenter;
pub use translation_service::TranslationServiceClient;
pub use tts_service::TtsServiceClient;
pub use whisper_backend::WhisperBackendClient;
