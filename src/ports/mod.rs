pub mod clock;
pub mod config;
pub mod http;
pub mod presentation;
pub mod speech;
pub mod transcriber;
pub mod translator;

pub use clock::Clock;
pub use config::ConfigStore;
pub use http::{
    FormField, HttpMethod, HttpTransport, RequestBody, TransportError, TransportRequest,
    TransportResponse,
};
pub use presentation::PresentationAdapter;
pub use speech::SpeechSynthesizer;
pub use transcriber::{TranscribeRequest, Transcriber, TranscriptionOutput, WhisperTask};
pub use translator::Translator;
