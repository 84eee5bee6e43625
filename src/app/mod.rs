pub mod controller;
mod in_flight;
pub mod orchestrator;
pub mod preview;
pub mod synthesis;

pub use controller::AppController;
pub use orchestrator::WorkflowOrchestrator;
pub use preview::{PreviewHandle, PreviewRegistry};
pub use synthesis::SpeechSynthesisWorkflow;
