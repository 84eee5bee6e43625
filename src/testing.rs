//! Test doubles shared by the unit tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use serde_json::Value;

use crate::domain::{
    DisplayHint, FileMetadata, NormalizedResult, ServiceKind, ServiceStatus, SynthesizedAudio,
    WorkflowError,
};
use crate::ports::{
    Clock, HttpMethod, HttpTransport, PresentationAdapter, TransportError, TransportRequest,
    TransportResponse,
};

type Route = (HttpMethod, String);

/// Scripted transport. Unknown routes fail with a connection error.
#[derive(Default)]
pub(crate) struct FakeTransport {
    routes: Mutex<HashMap<Route, Result<TransportResponse, TransportError>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: HttpMethod, url: &str, status: u16, body: impl Into<Bytes>) {
        self.routes.lock().insert(
            (method, url.to_string()),
            Ok(TransportResponse::new(status, body)),
        );
    }

    pub fn respond_json(&self, method: HttpMethod, url: &str, status: u16, body: Value) {
        self.respond(method, url, status, body.to_string());
    }

    pub fn fail(&self, method: HttpMethod, url: &str, error: TransportError) {
        self.routes
            .lock()
            .insert((method, url.to_string()), Err(error));
    }

    /// Make `GET {base}/health` answer 200.
    pub fn healthy(&self, base: &str) {
        self.respond_json(
            HttpMethod::Get,
            &format!("{}/health", base),
            200,
            serde_json::json!({"status": "healthy"}),
        );
    }

    pub fn count(&self, method: HttpMethod, url: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.method == method && r.url.as_str() == url)
            .count()
    }

    pub fn total_requests(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let key = (request.method, request.url.to_string());
        self.requests.lock().push(request);
        self.routes
            .lock()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(TransportError::Connect("connection refused".to_string())))
    }
}

/// Virtual clock: sleeping advances time instantly.
pub(crate) struct FakeClock {
    now: Mutex<DateTime<Utc>>,
    sleeps: Mutex<Vec<Duration>>,
}

impl FakeClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
            sleeps: Mutex::new(Vec::new()),
        })
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
        let mut now = self.now.lock();
        *now += chrono::Duration::from_std(duration).unwrap();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Rendered {
    File(FileMetadata),
    ClearFile,
    Progress(u8, String),
    HideProgress,
    Result(NormalizedResult),
    ClearResult,
    Error(String, DisplayHint),
    Synthesis(SynthesizedAudio),
    ClearSynthesis,
    Status(ServiceKind, ServiceStatus),
    Toast(String),
}

/// Presenter that records every call.
#[derive(Default)]
pub(crate) struct RecordingPresenter {
    events: Mutex<Vec<Rendered>>,
}

impl RecordingPresenter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<Rendered> {
        self.events.lock().clone()
    }

    pub fn progress(&self) -> Vec<u8> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                Rendered::Progress(p, _) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<(String, DisplayHint)> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                Rendered::Error(m, h) => Some((m.clone(), *h)),
                _ => None,
            })
            .collect()
    }

    pub fn results(&self) -> Vec<NormalizedResult> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                Rendered::Result(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Rendered) {
        self.events.lock().push(event);
    }
}

impl PresentationAdapter for RecordingPresenter {
    fn render_file(&self, metadata: &FileMetadata) {
        self.push(Rendered::File(metadata.clone()));
    }

    fn clear_file(&self) {
        self.push(Rendered::ClearFile);
    }

    fn show_progress(&self, percent: u8, label: &str) {
        self.push(Rendered::Progress(percent, label.to_string()));
    }

    fn hide_progress(&self) {
        self.push(Rendered::HideProgress);
    }

    fn render_result(&self, result: &NormalizedResult) {
        self.push(Rendered::Result(result.clone()));
    }

    fn clear_result(&self) {
        self.push(Rendered::ClearResult);
    }

    fn render_error(&self, error: &WorkflowError) {
        self.push(Rendered::Error(error.to_string(), error.display_hint()));
    }

    fn render_synthesis(&self, audio: &SynthesizedAudio) {
        self.push(Rendered::Synthesis(audio.clone()));
    }

    fn clear_synthesis(&self) {
        self.push(Rendered::ClearSynthesis);
    }

    fn set_service_status(&self, service: ServiceKind, status: &ServiceStatus) {
        self.push(Rendered::Status(service, status.clone()));
    }

    fn toast(&self, message: &str) {
        self.push(Rendered::Toast(message.to_string()));
    }
}
