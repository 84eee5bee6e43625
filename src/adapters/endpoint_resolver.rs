use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::{RetryConfig, ServiceEndpoint, ServiceKind, UnreachableServiceError};
use crate::ports::{Clock, HttpTransport, TransportRequest};

/// Bounded retry settings for liveness probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Probe attempts per candidate before moving on.
    pub max_attempts: u32,
    /// Wait between two attempts on the same candidate.
    pub backoff: Duration,
    /// Timeout of a single probe.
    pub probe_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff: Duration::from_millis(config.backoff_ms),
            probe_timeout: Duration::from_millis(config.probe_timeout_ms),
        }
    }
}

/// Append an absolute path to a base URL, keeping any path prefix the base has.
pub(crate) fn endpoint_url(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("{}{}", base.as_str().trim_end_matches('/'), path))
}

/// Finds a reachable base URL for one logical service.
///
/// Candidates are probed in order, each up to `max_attempts` times. The
/// first candidate answering its health check with a 2xx wins and is
/// memoized until `invalidate` is called.
pub struct EndpointResolver {
    service: ServiceKind,
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
    policy: RetryPolicy,
    endpoint: Mutex<ServiceEndpoint>,
    // Serializes probing so concurrent callers share one resolution.
    resolving: tokio::sync::Mutex<()>,
}

impl EndpointResolver {
    pub fn new(
        service: ServiceKind,
        candidates: Vec<Url>,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
        policy: RetryPolicy,
    ) -> Self {
        debug!(
            service = %service,
            candidates = ?candidates.iter().map(Url::as_str).collect::<Vec<_>>(),
            "EndpointResolver created"
        );

        Self {
            service,
            transport,
            clock,
            policy,
            endpoint: Mutex::new(ServiceEndpoint::new(candidates)),
            resolving: tokio::sync::Mutex::new(()),
        }
    }

    pub fn service(&self) -> ServiceKind {
        self.service
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Memoized base URL, if resolution has succeeded and not been invalidated.
    pub fn resolved_url(&self) -> Option<Url> {
        self.endpoint.lock().resolved_url().cloned()
    }

    /// Snapshot of the resolution state.
    pub fn endpoint(&self) -> ServiceEndpoint {
        self.endpoint.lock().clone()
    }

    /// Drop the memoized URL so the next `resolve` probes again.
    pub fn invalidate(&self) {
        if let Some(url) = self.endpoint.lock().invalidate() {
            info!(service = %self.service, url = %url, "Endpoint invalidated");
        }
    }

    /// Return a reachable base URL, probing candidates if none is memoized.
    pub async fn resolve(&self) -> Result<Url, UnreachableServiceError> {
        if let Some(url) = self.resolved_url() {
            return Ok(url);
        }

        let _guard = self.resolving.lock().await;
        if let Some(url) = self.resolved_url() {
            return Ok(url);
        }

        let candidates = self.endpoint.lock().candidate_urls().to_vec();
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempts = 0u32;

        for candidate in &candidates {
            for attempt in 1..=max_attempts {
                attempts += 1;
                let outcome = self.probe(candidate).await;
                let now = self.clock.now();

                match outcome {
                    Ok(()) => {
                        let mut endpoint = self.endpoint.lock();
                        endpoint.record_probe(now);
                        endpoint.mark_resolved(candidate.clone());
                        info!(service = %self.service, url = %candidate, attempts, "Service accessible");
                        return Ok(candidate.clone());
                    }
                    Err(reason) => {
                        self.endpoint.lock().record_probe(now);
                        warn!(
                            service = %self.service,
                            url = %candidate,
                            attempt,
                            max_attempts,
                            reason = %reason,
                            "Probe failed"
                        );
                        if attempt < max_attempts {
                            self.clock.sleep(self.policy.backoff).await;
                        }
                    }
                }
            }
        }

        warn!(service = %self.service, attempts, "No accessible endpoint found");
        Err(UnreachableServiceError {
            service: self.service,
            candidates: candidates.iter().map(|u| u.to_string()).collect(),
            attempts,
        })
    }

    async fn probe(&self, base: &Url) -> Result<(), String> {
        let url = endpoint_url(base, self.service.health_path()).map_err(|e| e.to_string())?;
        let request = TransportRequest::get(url).with_timeout(self.policy.probe_timeout);

        match self.transport.execute(request).await {
            Ok(response) if response.is_success() => Ok(()),
            Ok(response) => Err(format!("HTTP {}", response.status)),
            Err(e) => Err(e.to_string()),
        }
    }
}
