use async_trait::async_trait;
use reqwest::{multipart, Client};
use tracing::debug;

use crate::domain::DomainError;
use crate::ports::{
    FormField, HttpMethod, HttpTransport, RequestBody, TransportError, TransportRequest,
    TransportResponse,
};

/// `HttpTransport` backed by a shared reqwest client.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, DomainError> {
        let client = Client::builder()
            .use_rustls_tls()
            .user_agent(format!("VoxRelay/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::HttpClient(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn build_form(fields: Vec<FormField>) -> Result<multipart::Form, TransportError> {
        let mut form = multipart::Form::new();
        for field in fields {
            form = match field {
                FormField::Text { name, value } => form.text(name, value),
                FormField::File {
                    name,
                    file_name,
                    mime_type,
                    data,
                } => {
                    let mut part = multipart::Part::bytes(data.to_vec()).file_name(file_name);
                    if let Some(mime) = mime_type {
                        part = part
                            .mime_str(&mime)
                            .map_err(|e| TransportError::InvalidRequest(format!("mime {}: {}", mime, e)))?;
                    }
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}

/// Map a reqwest failure onto the transport taxonomy.
fn classify(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        TransportError::InvalidRequest(err.to_string())
    } else if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let TransportRequest {
            method,
            url,
            body,
            timeout,
        } = request;

        debug!(method = %method, url = %url, "Sending request");

        let mut builder = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(fields) => builder.multipart(Self::build_form(fields)?),
        };

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(classify)?;

        Ok(TransportResponse { status, body })
    }
}
