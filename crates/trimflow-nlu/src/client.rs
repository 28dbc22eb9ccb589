// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the external NLU intent classifier.
//!
//! Provides [`NluClient`] which posts the message text with a stable
//! per-user session identity and maps the service's response onto
//! [`trimflow_core::NluResult`]. The client is strictly best-effort: every
//! failure becomes a `Classifier` error for the cascade to swallow.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use trimflow_core::{IntentDetector, NluResult, TrimflowError};

/// Request body for the detect endpoint.
#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    session_id: &'a str,
    text: &'a str,
    language_code: &'a str,
}

/// Response body from the detect endpoint.
#[derive(Debug, Deserialize)]
struct DetectResponse {
    intent: String,
    confidence: f32,
    #[serde(default)]
    fulfillment_text: String,
}

/// HTTP client for the NLU service.
#[derive(Debug, Clone)]
pub struct NluClient {
    client: reqwest::Client,
    base_url: String,
}

impl NluClient {
    /// Creates a new NLU client.
    ///
    /// # Arguments
    /// * `base_url` - Service base URL, without trailing slash
    /// * `api_key` - Optional API key sent as `x-api-key`
    /// * `timeout` - Per-request timeout
    pub fn new(
        base_url: String,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, TrimflowError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        if let Some(key) = api_key {
            headers.insert(
                "x-api-key",
                HeaderValue::from_str(key)
                    .map_err(|e| TrimflowError::Config(format!("invalid NLU API key: {e}")))?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| TrimflowError::Classifier {
                message: format!("failed to build NLU HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl IntentDetector for NluClient {
    async fn detect_intent(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<NluResult, TrimflowError> {
        let url = format!("{}/v1/detect", self.base_url);
        let body = DetectRequest {
            session_id,
            text,
            language_code: "en",
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TrimflowError::Classifier {
                message: format!("NLU request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrimflowError::Classifier {
                message: format!("NLU service returned {status}: {body}"),
                source: None,
            });
        }

        let detected: DetectResponse =
            response.json().await.map_err(|e| TrimflowError::Classifier {
                message: format!("failed to parse NLU response: {e}"),
                source: Some(Box::new(e)),
            })?;

        debug!(
            intent = %detected.intent,
            confidence = detected.confidence,
            "nlu intent detected"
        );

        Ok(NluResult {
            intent: detected.intent,
            confidence: detected.confidence,
            fulfillment_text: detected.fulfillment_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> NluClient {
        NluClient::new(
            base_url.to_string(),
            Some("nlu-test-key"),
            Duration::from_secs(2),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn detect_intent_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/detect"))
            .and(header("x-api-key", "nlu-test-key"))
            .and(body_partial_json(serde_json::json!({
                "session_id": "+919876500001",
                "text": "when do you open"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "intent": "timing",
                "confidence": 0.82,
                "fulfillment_text": "We open at 9 AM."
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client
            .detect_intent("+919876500001", "when do you open")
            .await
            .unwrap();

        assert_eq!(result.intent, "timing");
        assert!((result.confidence - 0.82).abs() < f32::EPSILON);
        assert_eq!(result.fulfillment_text, "We open at 9 AM.");
    }

    #[tokio::test]
    async fn missing_fulfillment_text_defaults_to_empty() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/detect"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "intent": "fallback",
                "confidence": 0.1
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.detect_intent("s", "gibberish").await.unwrap();
        assert_eq!(result.intent, "fallback");
        assert!(result.fulfillment_text.is_empty());
    }

    #[tokio::test]
    async fn server_error_maps_to_classifier_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/detect"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.detect_intent("s", "hello").await.unwrap_err();
        assert!(matches!(err, TrimflowError::Classifier { .. }));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn malformed_body_maps_to_classifier_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/detect"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.detect_intent("s", "hello").await.unwrap_err();
        assert!(matches!(err, TrimflowError::Classifier { .. }));
    }
}
