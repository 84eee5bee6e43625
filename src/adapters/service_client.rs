use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::adapters::endpoint_resolver::{endpoint_url, EndpointResolver};
use crate::domain::{ServiceCallError, ServiceError, ServiceErrorKind, ServiceKind};
use crate::ports::{Clock, HttpMethod, HttpTransport, RequestBody, TransportRequest, TransportResponse};

/// A named request against a service: method plus path suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operation {
    method: HttpMethod,
    path: String,
}

impl Operation {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Reads are idempotent unless the caller says otherwise.
    pub fn is_read_only(&self) -> bool {
        self.method == HttpMethod::Get
    }
}

/// Per-call options.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallOptions {
    /// Overrides the method-derived idempotency (and thus caching).
    pub idempotent: Option<bool>,
    pub timeout: Option<Duration>,
}

impl CallOptions {
    pub fn idempotent(mut self, idempotent: bool) -> Self {
        self.idempotent = Some(idempotent);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

struct CacheEntry {
    value: Arc<Value>,
    fetched_at: DateTime<Utc>,
}

/// Request client for one logical service.
///
/// Resolves the base URL through its own `EndpointResolver`, classifies
/// failures into network and application errors, and caches idempotent
/// JSON responses for the lifetime of the client. The cache is keyed by
/// method and path and is never invalidated.
pub struct ServiceClient {
    resolver: Arc<EndpointResolver>,
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
    cache: Mutex<HashMap<(HttpMethod, String), CacheEntry>>,
}

impl ServiceClient {
    pub fn new(
        resolver: Arc<EndpointResolver>,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            resolver,
            transport,
            clock,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn service(&self) -> ServiceKind {
        self.resolver.service()
    }

    pub fn resolver(&self) -> &Arc<EndpointResolver> {
        &self.resolver
    }

    /// Base URL from the last successful resolution, without probing.
    pub fn base_url(&self) -> Option<Url> {
        self.resolver.resolved_url()
    }

    /// Resolve the service, probing if needed.
    pub async fn ensure_resolved(&self) -> Result<Url, ServiceCallError> {
        Ok(self.resolver.resolve().await?)
    }

    /// Absolute URL of `path` at the resolved base, if resolved.
    pub fn url_for(&self, path: &str) -> Option<Url> {
        self.base_url().and_then(|base| endpoint_url(&base, path).ok())
    }

    /// When the cached response for `operation` was fetched.
    pub fn cached_at(&self, operation: &Operation) -> Option<DateTime<Utc>> {
        self.cache
            .lock()
            .get(&cache_key(operation))
            .map(|entry| entry.fetched_at)
    }

    /// Perform `operation` and return its parsed JSON body.
    ///
    /// Idempotent calls are answered from the cache when possible; the same
    /// `Arc` is handed out for every hit.
    pub async fn call(
        &self,
        operation: &Operation,
        body: RequestBody,
        options: CallOptions,
    ) -> Result<Arc<Value>, ServiceCallError> {
        let idempotent = options.idempotent.unwrap_or_else(|| operation.is_read_only());
        let key = cache_key(operation);

        if idempotent {
            if let Some(entry) = self.cache.lock().get(&key) {
                debug!(service = %self.service(), path = operation.path(), "Cache hit");
                return Ok(Arc::clone(&entry.value));
            }
        }

        let response = self.send(operation, body, options.timeout).await?;
        let value: Value = serde_json::from_slice(&response.body).map_err(|e| {
            ServiceError::application(
                self.service(),
                response.status,
                format!("Invalid JSON response: {}", e),
            )
        })?;
        let value = Arc::new(value);

        if idempotent {
            self.cache.lock().insert(
                key,
                CacheEntry {
                    value: Arc::clone(&value),
                    fetched_at: self.clock.now(),
                },
            );
        }

        Ok(value)
    }

    /// `call` followed by deserialization into `T`.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        body: RequestBody,
        options: CallOptions,
    ) -> Result<T, ServiceCallError> {
        let value = self.call(operation, body, options).await?;
        self.decode(&value)
    }

    /// Perform `operation` and return the raw body. Never cached.
    pub async fn fetch_bytes(
        &self,
        operation: &Operation,
        body: RequestBody,
        options: CallOptions,
    ) -> Result<Bytes, ServiceCallError> {
        Ok(self.send(operation, body, options.timeout).await?.body)
    }

    /// Deserialize a response value, reporting shape mismatches as
    /// application errors.
    pub fn decode<T: DeserializeOwned>(&self, value: &Value) -> Result<T, ServiceCallError> {
        T::deserialize(value).map_err(|e| {
            ServiceCallError::from(ServiceError {
                service: self.service(),
                kind: ServiceErrorKind::Application,
                status: None,
                message: format!("Unexpected response from {} service: {}", self.service(), e),
            })
        })
    }

    async fn send(
        &self,
        operation: &Operation,
        body: RequestBody,
        timeout: Option<Duration>,
    ) -> Result<TransportResponse, ServiceCallError> {
        let service = self.service();
        let base = self.resolver.resolve().await?;
        let url = endpoint_url(&base, operation.path()).map_err(|e| ServiceError {
            service,
            kind: ServiceErrorKind::Application,
            status: None,
            message: format!("Invalid request path {}: {}", operation.path(), e),
        })?;

        debug!(service = %service, method = %operation.method(), url = %url, "Calling service");

        let request = TransportRequest {
            method: operation.method(),
            url,
            body,
            timeout,
        };

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(e) if !e.is_network() => {
                warn!(service = %service, error = %e, "Request could not be sent");
                return Err(ServiceError {
                    service,
                    kind: ServiceErrorKind::Application,
                    status: None,
                    message: format!("Invalid request to {} service: {}", service, e),
                }
                .into());
            }
            Err(e) => {
                warn!(service = %service, url = %base, error = %e, "Network error, invalidating endpoint");
                self.resolver.invalidate();
                return Err(ServiceError::network(
                    service,
                    format!("Network error: Cannot connect to {} service at {}", service, base),
                )
                .into());
            }
        };

        if !response.is_success() {
            let message = error_message(response.status, &response.body);
            warn!(service = %service, status = response.status, message = %message, "Service rejected request");
            return Err(ServiceError::application(service, response.status, message).into());
        }

        Ok(response)
    }
}

fn cache_key(operation: &Operation) -> (HttpMethod, String) {
    (operation.method(), operation.path().to_string())
}

/// Server-supplied `error` field, or the status line.
fn error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            let reason = reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown Status");
            format!("HTTP {}: {}", status, reason)
        })
}
