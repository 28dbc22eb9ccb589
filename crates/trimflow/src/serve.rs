// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dependency wiring for the `serve` command.
//!
//! Builds the conversation pipeline from configuration: state stores,
//! classifier cascade with whichever external collaborators are
//! configured, forwarding, and the HTTP gateway.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use trimflow_config::TrimflowConfig;
use trimflow_conversation::{ConversationHandler, ConversationStore};
use trimflow_core::{ChannelAdapter, TrimflowError};
use trimflow_gateway::{GatewayState, ServerConfig, start_server};
use trimflow_generative::GenerativeClient;
use trimflow_intent::IntentCascade;
use trimflow_leads::{ForwardingService, LeadStore};
use trimflow_nlu::NluClient;

/// Placeholder outbound channel used until a messaging provider is wired
/// in. Every send fails, which downgrades advisor forwarding to the
/// logged-only path - leads are still recorded.
struct UnconfiguredChannel;

#[async_trait]
impl ChannelAdapter for UnconfiguredChannel {
    async fn send_text(&self, _to: &str, _text: &str) -> Result<(), TrimflowError> {
        Err(TrimflowError::Channel {
            message: "no outbound messaging provider configured".to_string(),
            source: None,
        })
    }
}

/// Build the pipeline and run the gateway until shutdown.
pub async fn run(config: TrimflowConfig) -> Result<(), TrimflowError> {
    let contexts = Arc::new(ConversationStore::new(Duration::from_secs(
        config.conversation.context_timeout_secs,
    )));
    let leads = Arc::new(LeadStore::new(&config.leads.store_path));

    let mut cascade = IntentCascade::new(
        config.classifier.pattern_threshold,
        config.classifier.nlu_threshold,
    );

    match &config.nlu.endpoint {
        Some(endpoint) => {
            let nlu = NluClient::new(
                endpoint.clone(),
                config.nlu.api_key.as_deref(),
                Duration::from_secs(config.nlu.timeout_secs),
            )?;
            cascade = cascade.with_nlu(Arc::new(nlu));
        }
        None => warn!("nlu.endpoint not set, NLU stage disabled"),
    }

    if config.generative.enabled {
        match (&config.generative.api_key, &config.generative.endpoint) {
            (Some(api_key), Some(endpoint)) => {
                let generator = GenerativeClient::new(
                    endpoint.clone(),
                    api_key,
                    config.generative.model.clone(),
                    Duration::from_millis(config.generative.timeout_ms),
                    config.generative.max_output_tokens,
                    config.generative.temperature,
                )?;
                cascade = cascade.with_generator(Arc::new(generator));
            }
            _ => warn!(
                "generative.enabled is set but api_key/endpoint missing, \
                 generative stage disabled"
            ),
        }
    }

    let forwarder = Arc::new(ForwardingService::new(
        trimflow_catalog::advisors::directory(),
        Arc::new(UnconfiguredChannel),
        leads.clone(),
    ));

    let handler = Arc::new(ConversationHandler::new(
        contexts,
        cascade,
        leads.clone(),
        forwarder,
    ));

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };
    start_server(&server_config, GatewayState { handler, leads }).await
}
