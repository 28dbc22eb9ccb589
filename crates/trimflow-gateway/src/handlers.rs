// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the webhook and the lead dashboard.
//!
//! The webhook is the transport boundary: a request missing `from` or
//! `text` is rejected with 400 before any side effect is attempted. The
//! dashboard handlers are thin read/format endpoints over the lead store.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use trimflow_core::InboundMessage;
use trimflow_leads::{Lead, LeadStatus, LeadSummary, export_csv};

use crate::server::GatewayState;

/// Request body for POST /webhook/message.
#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    /// Sender identity (phone number).
    #[serde(default)]
    pub from: String,
    /// Message text.
    #[serde(default)]
    pub text: String,
    /// Optional sender display name.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Response body for POST /webhook/message.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    /// Reply text to deliver back to the sender.
    pub reply: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Query parameters for GET /dashboard/leads.
#[derive(Debug, Default, Deserialize)]
pub struct LeadFilter {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Response body for lead listings.
#[derive(Debug, Serialize)]
pub struct LeadListResponse {
    pub count: usize,
    pub leads: Vec<Lead>,
}

/// Request body for PUT /dashboard/leads/{id}/status.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// Request body for POST /dashboard/leads/{id}/notes.
#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub text: String,
    #[serde(default)]
    pub kind: Option<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn storage_error(e: trimflow_core::TrimflowError) -> Response {
    error!(error = %e, "lead store unavailable");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "lead store unavailable".to_string(),
        }),
    )
        .into_response()
}

/// POST /webhook/message
///
/// Runs the conversation handler and returns the reply text. Malformed
/// requests are rejected with 400 and cause no side effects.
pub async fn post_webhook(
    State(state): State<GatewayState>,
    Json(body): Json<WebhookRequest>,
) -> Response {
    if body.from.trim().is_empty() || body.text.trim().is_empty() {
        return bad_request("missing required fields: from, text");
    }

    let inbound = InboundMessage {
        from: body.from,
        text: body.text,
        display_name: body.display_name,
    };
    let reply = state.handler.handle(&inbound).await;
    (StatusCode::OK, Json(WebhookResponse { reply })).into_response()
}

/// GET /health
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /dashboard/leads
///
/// Lists leads newest-first, optionally filtered by status or phone
/// fragment, optionally truncated to `limit`.
pub async fn get_leads(
    State(state): State<GatewayState>,
    Query(filter): Query<LeadFilter>,
) -> Response {
    let result = if let Some(ref status) = filter.status {
        match LeadStatus::from_str(status) {
            Ok(status) => state.leads.by_status(status).await,
            Err(_) => return bad_request("unknown status value"),
        }
    } else if let Some(ref phone) = filter.phone {
        state.leads.by_phone(phone).await
    } else {
        state.leads.all().await
    };

    match result {
        Ok(mut leads) => {
            if let Some(limit) = filter.limit {
                leads.truncate(limit);
            }
            (
                StatusCode::OK,
                Json(LeadListResponse {
                    count: leads.len(),
                    leads,
                }),
            )
                .into_response()
        }
        Err(e) => storage_error(e),
    }
}

/// GET /dashboard/leads/summary
pub async fn get_leads_summary(State(state): State<GatewayState>) -> Response {
    match state.leads.summary().await {
        Ok(summary) => (StatusCode::OK, Json::<LeadSummary>(summary)).into_response(),
        Err(e) => storage_error(e),
    }
}

/// GET /dashboard/leads/{id}
pub async fn get_lead(
    State(state): State<GatewayState>,
    Path(lead_id): Path<String>,
) -> Response {
    match state.leads.get(&lead_id).await {
        Ok(Some(lead)) => (StatusCode::OK, Json(lead)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "lead not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => storage_error(e),
    }
}

/// PUT /dashboard/leads/{id}/status
pub async fn put_lead_status(
    State(state): State<GatewayState>,
    Path(lead_id): Path<String>,
    Json(body): Json<StatusUpdateRequest>,
) -> Response {
    let Ok(status) = LeadStatus::from_str(&body.status) else {
        return bad_request("unknown status value");
    };

    match state
        .leads
        .update_status(&lead_id, status, body.note.as_deref())
        .await
    {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "lead not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => storage_error(e),
    }
}

/// POST /dashboard/leads/{id}/notes
pub async fn post_lead_note(
    State(state): State<GatewayState>,
    Path(lead_id): Path<String>,
    Json(body): Json<NoteRequest>,
) -> Response {
    if body.text.trim().is_empty() {
        return bad_request("note text is required");
    }
    let kind = body.kind.as_deref().unwrap_or("general");

    match state.leads.add_note(&lead_id, &body.text, kind).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "lead not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => storage_error(e),
    }
}

/// GET /dashboard/leads/export.csv
pub async fn get_leads_csv(State(state): State<GatewayState>) -> Response {
    let leads = match state.leads.all().await {
        Ok(leads) => leads,
        Err(e) => return storage_error(e),
    };
    match export_csv(&leads) {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"franchise-leads.csv\"",
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => storage_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::GatewayState;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::tempdir;
    use trimflow_catalog::RegionalAdvisor;
    use trimflow_conversation::{ConversationHandler, ConversationStore};
    use trimflow_intent::IntentCascade;
    use trimflow_leads::{ForwardingService, LeadStore, NewLead};
    use trimflow_test_utils::MockChannel;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn test_state(dir: &tempfile::TempDir) -> GatewayState {
        let contexts = Arc::new(ConversationStore::new(Duration::from_secs(1800)));
        let leads = Arc::new(LeadStore::new(dir.path().join("leads.json")));
        let advisors = vec![RegionalAdvisor {
            region: "south-india".into(),
            name: "South Desk".into(),
            contact: Some("+918600010001".into()),
            coverage_areas: vec!["Chennai".into()],
            active: true,
        }];
        let forwarder = Arc::new(ForwardingService::new(
            advisors,
            Arc::new(MockChannel::new()),
            leads.clone(),
        ));
        let handler = Arc::new(ConversationHandler::new(
            contexts,
            IntentCascade::new(0.5, 0.7),
            leads.clone(),
            forwarder,
        ));
        GatewayState { handler, leads }
    }

    #[tokio::test]
    async fn webhook_rejects_missing_fields_without_side_effects() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);

        let response = post_webhook(
            State(state.clone()),
            Json(WebhookRequest {
                from: String::new(),
                text: "franchise".into(),
                display_name: None,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.leads.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn webhook_replies_to_valid_message() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);

        let response = post_webhook(
            State(state),
            Json(WebhookRequest {
                from: "+919876500001".into(),
                text: "menu".into(),
                display_name: Some("Asha".into()),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Complete Price List"));
    }

    #[tokio::test]
    async fn lead_listing_filters_by_status() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);
        state
            .leads
            .create_lead(NewLead::from_enquiry("+911", "A", "Chennai", "franchise"))
            .await
            .unwrap();

        let response = get_leads(
            State(state.clone()),
            Query(LeadFilter {
                status: Some("new".into()),
                ..LeadFilter::default()
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("\"count\":1"));

        let response = get_leads(
            State(state),
            Query(LeadFilter {
                status: Some("bogus".into()),
                ..LeadFilter::default()
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn lead_fetch_and_status_update() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);
        let lead = state
            .leads
            .create_lead(NewLead::from_enquiry("+911", "A", "Chennai", "franchise"))
            .await
            .unwrap();

        let response = get_lead(State(state.clone()), Path(lead.id.clone())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = put_lead_status(
            State(state.clone()),
            Path(lead.id.clone()),
            Json(StatusUpdateRequest {
                status: "contacted".into(),
                note: Some("called".into()),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let updated = state.leads.get(&lead.id).await.unwrap().unwrap();
        assert_eq!(updated.status, LeadStatus::Contacted);

        let response = get_lead(State(state), Path("LEAD-missing".into())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn note_endpoint_appends_note() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);
        let lead = state
            .leads
            .create_lead(NewLead::from_enquiry("+911", "A", "Chennai", "franchise"))
            .await
            .unwrap();

        let response = post_lead_note(
            State(state.clone()),
            Path(lead.id.clone()),
            Json(NoteRequest {
                text: "spoke to customer".into(),
                kind: None,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let updated = state.leads.get(&lead.id).await.unwrap().unwrap();
        assert_eq!(updated.notes.len(), 1);
        assert_eq!(updated.notes[0].kind, "general");
    }

    #[tokio::test]
    async fn csv_export_sets_headers_and_content() {
        let dir = tempdir().unwrap();
        let state = test_state(&dir);
        state
            .leads
            .create_lead(NewLead::from_enquiry("+911", "A", "Chennai", "franchise"))
            .await
            .unwrap();

        let response = get_leads_csv(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv"
        );
        let body = body_string(response).await;
        assert!(body.starts_with("ID,Phone,Name,Location"));
        assert!(body.contains("+911"));
    }

    #[test]
    fn webhook_request_deserializes_with_defaults() {
        let req: WebhookRequest = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert!(req.from.is_empty());
        assert_eq!(req.text, "hi");
        assert!(req.display_name.is_none());
    }
}
