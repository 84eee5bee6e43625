use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::service::{is_loopback_host, ServiceKind};

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Enable file logging with rotation.
    pub file_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: true,
        }
    }
}

/// Addressing of one logical service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceHostConfig {
    /// Hostname of the service on the container network.
    pub container_host: String,
    pub port: u16,
    pub scheme: String,
    /// Extra base URLs tried after the derived ones.
    pub extra_candidates: Vec<String>,
}

impl ServiceHostConfig {
    fn new(container_host: &str, port: u16) -> Self {
        Self {
            container_host: container_host.to_string(),
            port,
            scheme: "http".to_string(),
            extra_candidates: Vec::new(),
        }
    }

    fn base_for(&self, host: &str) -> String {
        if host.contains(':') && !host.starts_with('[') {
            format!("{}://[{}]:{}", self.scheme, host, self.port)
        } else {
            format!("{}://{}:{}", self.scheme, host, self.port)
        }
    }
}

impl Default for ServiceHostConfig {
    fn default() -> Self {
        Self::new("localhost", 80)
    }
}

/// Where the three backends may be found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Hostname the client itself is served from.
    pub client_host: String,
    pub transcription: ServiceHostConfig,
    pub translation: ServiceHostConfig,
    pub speech_synthesis: ServiceHostConfig,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            client_host: "localhost".to_string(),
            transcription: ServiceHostConfig::new("whisper-backend", 5000),
            translation: ServiceHostConfig::new("translation-service", 6000),
            speech_synthesis: ServiceHostConfig::new("tts-service", 7000),
        }
    }
}

impl EndpointsConfig {
    pub fn service(&self, kind: ServiceKind) -> &ServiceHostConfig {
        match kind {
            ServiceKind::Transcription => &self.transcription,
            ServiceKind::Translation => &self.translation,
            ServiceKind::SpeechSynthesis => &self.speech_synthesis,
        }
    }

    /// Ordered candidate base URLs for a service.
    ///
    /// Loopback hostnames come first when the client runs on a loopback
    /// host, container-network names first otherwise. Duplicates and
    /// unparseable entries are dropped.
    pub fn candidate_urls(&self, kind: ServiceKind) -> Vec<Url> {
        let service = self.service(kind);
        let loopback = [self.client_host.as_str(), "localhost", "127.0.0.1"];

        let mut hosts: Vec<&str> = Vec::with_capacity(4);
        if is_loopback_host(&self.client_host) {
            hosts.extend(loopback);
            hosts.push(&service.container_host);
        } else {
            hosts.push(&service.container_host);
            hosts.extend(loopback);
        }

        let mut raw: Vec<String> = hosts.into_iter().map(|h| service.base_for(h)).collect();
        raw.extend(service.extra_candidates.iter().cloned());

        let mut urls: Vec<Url> = Vec::with_capacity(raw.len());
        for candidate in raw {
            match Url::parse(&candidate) {
                Ok(url) if !urls.contains(&url) => urls.push(url),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(service = %kind, candidate = %candidate, error = %e, "Ignoring invalid candidate URL");
                }
            }
        }
        urls
    }
}

/// Probe retry policy settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Probe attempts per candidate URL.
    pub max_attempts: u32,
    /// Wait between attempts on the same candidate.
    pub backoff_ms: u64,
    /// Timeout of a single liveness probe.
    pub probe_timeout_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_ms: 1_000,
            probe_timeout_ms: 5_000,
        }
    }
}

/// Upload validation rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub max_file_size_bytes: u64,
    pub allowed_mime_types: Vec<String>,
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 50 * 1024 * 1024,
            allowed_mime_types: [
                "audio/mpeg",
                "audio/wav",
                "audio/mp4",
                "audio/m4a",
                "audio/ogg",
                "audio/flac",
                "audio/webm",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            allowed_extensions: [".mp3", ".wav", ".mp4", ".m4a", ".ogg", ".flac", ".webm"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Speech synthesis settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Timeout for synthesize requests; audio generation is slow.
    pub request_timeout_ms: u64,
    pub default_voice: String,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 30_000,
            default_voice: "en-US-gtts".to_string(),
        }
    }
}

impl SynthesisConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub endpoints: EndpointsConfig,
    pub retry: RetryConfig,
    pub upload: UploadConfig,
    pub synthesis: SynthesisConfig,
}

impl AppConfig {
    /// Create a new AppConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }
}
