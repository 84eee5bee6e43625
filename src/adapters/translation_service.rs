use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::adapters::service_client::{CallOptions, Operation, ServiceClient};
use crate::domain::ServiceCallError;
use crate::ports::{RequestBody, Translator};

#[derive(Deserialize)]
struct TranslationOutput {
    translated_text: String,
}

/// Client for the text translation service.
pub struct TranslationServiceClient {
    client: ServiceClient,
}

impl TranslationServiceClient {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub fn service_client(&self) -> &ServiceClient {
        &self.client
    }
}

#[async_trait]
impl Translator for TranslationServiceClient {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ServiceCallError> {
        info!(chars = text.len(), target_language, "Requesting translation");

        let value = self
            .client
            .call(
                &Operation::post("/translate"),
                RequestBody::Json(json!({
                    "text": text,
                    "target_language": target_language,
                })),
                CallOptions::default(),
            )
            .await?;

        let payload = value.get("result").unwrap_or(value.as_ref());
        let output: TranslationOutput = self.client.decode(payload)?;
        Ok(output.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use url::Url;

    use crate::adapters::{EndpointResolver, RetryPolicy};
    use crate::domain::ServiceKind;
    use crate::ports::HttpMethod;
    use crate::testing::{FakeClock, FakeTransport};

    const BASE: &str = "http://translation-service:6000";

    fn translator(transport: &Arc<FakeTransport>) -> TranslationServiceClient {
        let clock = FakeClock::new();
        let resolver = EndpointResolver::new(
            ServiceKind::Translation,
            vec![Url::parse(BASE).unwrap()],
            transport.clone(),
            clock.clone(),
            RetryPolicy::default(),
        );
        TranslationServiceClient::new(ServiceClient::new(Arc::new(resolver), transport.clone(), clock))
    }

    #[tokio::test]
    async fn test_translate_sends_json_and_reads_result() {
        let transport = FakeTransport::new();
        transport.healthy(BASE);
        transport.respond_json(
            HttpMethod::Post,
            &format!("{}/translate", BASE),
            200,
            json!({"result": {"translated_text": "hola"}}),
        );
        let translator = translator(&transport);

        let text = translator.translate("hello", "es").await.unwrap();
        assert_eq!(text, "hola");

        let sent = transport
            .requests()
            .into_iter()
            .find(|r| r.method == HttpMethod::Post)
            .unwrap();
        match sent.body {
            RequestBody::Json(body) => {
                assert_eq!(body, json!({"text": "hello", "target_language": "es"}));
            }
            other => panic!("expected json body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_translate_is_not_cached() {
        let transport = FakeTransport::new();
        transport.healthy(BASE);
        transport.respond_json(
            HttpMethod::Post,
            &format!("{}/translate", BASE),
            200,
            json!({"result": {"translated_text": "hola"}}),
        );
        let translator = translator(&transport);

        translator.translate("hello", "es").await.unwrap();
        translator.translate("hello", "es").await.unwrap();
        assert_eq!(transport.count(HttpMethod::Post, &format!("{}/translate", BASE)), 2);
    }

    #[tokio::test]
    async fn test_missing_translation_is_error() {
        let transport = FakeTransport::new();
        transport.healthy(BASE);
        transport.respond_json(HttpMethod::Post, &format!("{}/translate", BASE), 200, json!({"result": {}}));
        let translator = translator(&transport);

        assert!(translator.translate("hello", "es").await.is_err());
    }
}
