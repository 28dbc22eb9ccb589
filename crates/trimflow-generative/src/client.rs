// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the generative-text fallback.
//!
//! Provides [`GenerativeClient`], the most expensive stage of the cascade.
//! Calls run under a strict timeout (shorter than the transport layer's
//! response deadline) and are never retried without bound. A detected
//! permanent configuration error (invalid credential) flips the circuit to
//! [`CircuitState::Disabled`] for the rest of the process lifetime so later
//! turns skip the network call entirely.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use trimflow_core::{TextGenerator, TrimflowError};

/// Keep a margin under the channel's 4096-character message limit.
const CHANNEL_TEXT_LIMIT: usize = 3800;

/// Circuit status of the generative client.
///
/// An explicit sum type rather than a boolean so the disabled reason stays
/// inspectable for operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CircuitState {
    /// Calls are attempted normally.
    Active,
    /// Calls are skipped for the rest of the process lifetime.
    Disabled { reason: String },
}

/// Request body for the completion endpoint.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: String,
    max_output_tokens: u32,
    temperature: f32,
}

/// Response body from the completion endpoint.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    text: String,
}

/// HTTP client for the generative completion service.
pub struct GenerativeClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    max_output_tokens: u32,
    temperature: f32,
    timeout: Duration,
    circuit: Mutex<CircuitState>,
}

impl GenerativeClient {
    /// Creates a new generative client.
    pub fn new(
        endpoint: String,
        api_key: &str,
        model: String,
        timeout: Duration,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Result<Self, TrimflowError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        let bearer = format!("Bearer {api_key}");
        headers.insert(
            "authorization",
            HeaderValue::from_str(&bearer).map_err(|e| {
                TrimflowError::Config(format!("invalid generative API key header: {e}"))
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| TrimflowError::Classifier {
                message: format!("failed to build generative HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint,
            model,
            max_output_tokens,
            temperature,
            timeout,
            circuit: Mutex::new(CircuitState::Active),
        })
    }

    /// Current circuit status.
    pub fn circuit(&self) -> CircuitState {
        self.circuit.lock().expect("circuit lock poisoned").clone()
    }

    fn open_circuit(&self, reason: &str) {
        let mut circuit = self.circuit.lock().expect("circuit lock poisoned");
        if let CircuitState::Disabled { .. } = *circuit {
            return;
        }
        warn!(reason, "disabling generative fallback for this process");
        *circuit = CircuitState::Disabled {
            reason: reason.to_string(),
        };
    }

    /// Assemble the grounded prompt for a user message.
    ///
    /// Keeps the knowledge block compact: the catalog's starting prices,
    /// outlet footprint, and franchise terms are enough for the model to
    /// answer on-brand without hallucinating figures.
    fn build_prompt(&self, message: &str) -> String {
        let mut knowledge = String::new();
        for section in trimflow_catalog::SERVICE_MENU {
            if let Some(min) = section.items.iter().filter_map(|i| i.price).min() {
                knowledge.push_str(&format!("- {}: from Rs {}\n", section.title, min));
            }
        }
        let economics = trimflow_catalog::ECONOMICS;
        let cities = trimflow_catalog::all_cities().join(", ");

        format!(
            "You are the WhatsApp assistant for Crown & Clipper Men's Salon.\n\
             \n\
             Services:\n{knowledge}\n\
             Outlets in: {cities}\n\
             Opening hours: {hours}\n\
             Franchise: total investment Rs {investment} lakhs, payback {roi}, \
             revenue potential {revenue}.\n\
             \n\
             Answer the customer's question concisely (under 150 words), stay on \
             salon topics, and redirect unrelated questions back to services, \
             outlets, bookings, or franchise. Plain text with *bold* highlights.\n\
             \n\
             Customer: \"{message}\"\n\
             Assistant:",
            hours = trimflow_catalog::services::OPENING_HOURS,
            investment = economics.total_investment_lakhs,
            roi = economics.roi_months,
            revenue = economics.revenue_potential_lakhs,
        )
    }
}

/// Whether a response body describes a credential error that can never
/// succeed until the operator fixes the key and restarts.
fn is_credential_error(status: reqwest::StatusCode, body: &str) -> bool {
    status == reqwest::StatusCode::UNAUTHORIZED
        || status == reqwest::StatusCode::FORBIDDEN
        || body.contains("API_KEY_INVALID")
        || body.contains("invalid api key")
}

/// Truncate to the channel limit, pointing long answers back at the menu.
fn trim_to_channel_limit(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.len() <= CHANNEL_TEXT_LIMIT {
        return trimmed.to_string();
    }
    let mut cut = CHANNEL_TEXT_LIMIT - 50;
    while !trimmed.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}\n\nType *menu* for services.", trimmed[..cut].trim_end())
}

#[async_trait]
impl TextGenerator for GenerativeClient {
    fn is_available(&self) -> bool {
        matches!(self.circuit(), CircuitState::Active)
    }

    async fn generate(&self, message: &str) -> Result<String, TrimflowError> {
        if let CircuitState::Disabled { reason } = self.circuit() {
            return Err(TrimflowError::Classifier {
                message: format!("generative fallback disabled: {reason}"),
                source: None,
            });
        }

        let body = CompletionRequest {
            model: &self.model,
            prompt: self.build_prompt(message),
            max_output_tokens: self.max_output_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TrimflowError::Timeout {
                        duration: self.timeout,
                    }
                } else {
                    TrimflowError::Classifier {
                        message: format!("generative request failed: {e}"),
                        source: Some(Box::new(e)),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if is_credential_error(status, &body) {
                self.open_circuit("invalid credential");
            }
            return Err(TrimflowError::Classifier {
                message: format!("generative service returned {status}: {body}"),
                source: None,
            });
        }

        let completion: CompletionResponse =
            response.json().await.map_err(|e| TrimflowError::Classifier {
                message: format!("failed to parse generative response: {e}"),
                source: Some(Box::new(e)),
            })?;

        debug!(chars = completion.text.len(), "generative reply produced");
        Ok(trim_to_channel_limit(&completion.text))
    }
}
