use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Logical backend service, addressed by a stable name regardless of which
/// physical URL answers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    /// Speech-to-text backend (`/api/v1/...`).
    Transcription,
    /// Text translation backend.
    Translation,
    /// Text-to-speech backend.
    SpeechSynthesis,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [
        ServiceKind::Transcription,
        ServiceKind::Translation,
        ServiceKind::SpeechSynthesis,
    ];

    /// Stable display name.
    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Transcription => "transcription",
            ServiceKind::Translation => "translation",
            ServiceKind::SpeechSynthesis => "speech-synthesis",
        }
    }

    /// Path of the liveness check, relative to the service base URL.
    pub fn health_path(&self) -> &'static str {
        "/health"
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolution state of one logical service.
///
/// Owned by a single `EndpointResolver`. `resolved_url` is memoized once a
/// probe succeeds and cleared again when a live request fails at the
/// transport level.
#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    candidate_urls: Vec<Url>,
    resolved_url: Option<Url>,
    last_probed_at: Option<DateTime<Utc>>,
}

impl ServiceEndpoint {
    pub fn new(candidate_urls: Vec<Url>) -> Self {
        Self {
            candidate_urls,
            resolved_url: None,
            last_probed_at: None,
        }
    }

    pub fn candidate_urls(&self) -> &[Url] {
        &self.candidate_urls
    }

    pub fn resolved_url(&self) -> Option<&Url> {
        self.resolved_url.as_ref()
    }

    pub fn last_probed_at(&self) -> Option<DateTime<Utc>> {
        self.last_probed_at
    }

    pub fn record_probe(&mut self, at: DateTime<Utc>) {
        self.last_probed_at = Some(at);
    }

    pub fn mark_resolved(&mut self, url: Url) {
        self.resolved_url = Some(url);
    }

    /// Forget the memoized URL, returning it if one was set.
    pub fn invalidate(&mut self) -> Option<Url> {
        self.resolved_url.take()
    }
}

/// Reachability of a service as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ServiceStatus {
    Checking,
    Healthy { url: String },
    Unreachable { message: String },
}

impl ServiceStatus {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        matches!(self, ServiceStatus::Healthy { .. })
    }
}

/// Health report entry for one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceHealth {
    pub service: ServiceKind,
    #[serde(flatten)]
    pub status: ServiceStatus,
}

/// Whether the client itself runs on a loopback-style host.
pub fn is_loopback_host(host: &str) -> bool {
    matches!(
        host.trim_start_matches('[').trim_end_matches(']'),
        "localhost" | "127.0.0.1" | "::1"
    )
}
