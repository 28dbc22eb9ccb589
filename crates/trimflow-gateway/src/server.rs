// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the webhook and the
//! lead dashboard.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;

use trimflow_conversation::ConversationHandler;
use trimflow_core::TrimflowError;
use trimflow_leads::LeadStore;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The conversation handler processing webhook messages.
    pub handler: Arc<ConversationHandler>,
    /// Lead store for the dashboard endpoints.
    pub leads: Arc<LeadStore>,
}

/// Gateway server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the gateway router.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/webhook/message", post(handlers::post_webhook))
        .route("/dashboard/leads", get(handlers::get_leads))
        .route("/dashboard/leads/summary", get(handlers::get_leads_summary))
        .route("/dashboard/leads/export.csv", get(handlers::get_leads_csv))
        .route("/dashboard/leads/{id}", get(handlers::get_lead))
        .route("/dashboard/leads/{id}/status", put(handlers::put_lead_status))
        .route("/dashboard/leads/{id}/notes", post(handlers::post_lead_note))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), TrimflowError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener =
        tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TrimflowError::Channel {
                message: format!("failed to bind gateway to {addr}: {e}"),
                source: Some(Box::new(e)),
            })?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| TrimflowError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
        assert!(debug.contains("3000"));
    }
}
