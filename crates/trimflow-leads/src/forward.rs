// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort forwarding of new leads to regional advisors.
//!
//! Ordering is the core correctness property here: the lead is already
//! persisted before forwarding is attempted, and a forwarding failure only
//! appends a failure note. A customer enquiry is never dropped because a
//! notification channel was down.

use std::sync::Arc;

use tracing::{info, warn};

use trimflow_catalog::{RegionalAdvisor, advisor_for_location, has_active_advisors};
use trimflow_core::ChannelAdapter;

use crate::model::{AdvisorInfo, Lead};
use crate::store::LeadStore;

/// Result of one forwarding attempt.
#[derive(Debug, Clone)]
pub struct ForwardOutcome {
    /// Whether the advisor notification was actually delivered.
    pub forwarded: bool,
    /// The advisor the lead went to, when forwarding succeeded.
    pub advisor: Option<AdvisorInfo>,
    /// Delivery error, when forwarding was attempted and failed.
    pub error: Option<String>,
}

impl ForwardOutcome {
    fn logged_only() -> Self {
        Self {
            forwarded: false,
            advisor: None,
            error: None,
        }
    }
}

/// Routes leads to the advisor covering their location and notifies them
/// over the channel adapter.
pub struct ForwardingService {
    advisors: Vec<RegionalAdvisor>,
    channel: Arc<dyn ChannelAdapter>,
    store: Arc<LeadStore>,
}

impl ForwardingService {
    pub fn new(
        advisors: Vec<RegionalAdvisor>,
        channel: Arc<dyn ChannelAdapter>,
        store: Arc<LeadStore>,
    ) -> Self {
        Self {
            advisors,
            channel,
            store,
        }
    }

    /// Attempt to forward an already-persisted lead to its regional
    /// advisor. Never fails: every problem downgrades to a logged-only
    /// outcome with a note on the lead.
    pub async fn forward_to_advisor(&self, lead: &Lead) -> ForwardOutcome {
        if !has_active_advisors(&self.advisors) {
            info!(lead_id = %lead.id, "no regional advisors configured, lead logged only");
            self.note(lead, "No regional advisors configured; lead logged only", "general")
                .await;
            return ForwardOutcome::logged_only();
        }

        let Some(advisor) = advisor_for_location(&self.advisors, &lead.location) else {
            info!(lead_id = %lead.id, location = %lead.location,
                "no advisor covers this location, lead logged only");
            self.note(lead, "No matching regional advisor found", "general")
                .await;
            return ForwardOutcome::logged_only();
        };

        // Guarded by can_receive() inside advisor_for_location.
        let contact = advisor.contact.clone().unwrap_or_default();
        let message = format_advisor_message(lead);

        match self.channel.send_text(&contact, &message).await {
            Ok(()) => {
                let info = AdvisorInfo {
                    name: advisor.name.clone(),
                    region: advisor.region.clone(),
                    contact,
                };
                if let Err(e) = self.store.mark_forwarded(&lead.id, info.clone()).await {
                    warn!(lead_id = %lead.id, error = %e,
                        "forward delivered but status update failed");
                }
                info!(lead_id = %lead.id, advisor = %info.name, "lead forwarded");
                ForwardOutcome {
                    forwarded: true,
                    advisor: Some(info),
                    error: None,
                }
            }
            Err(e) => {
                warn!(lead_id = %lead.id, error = %e, "forwarding failed, lead stays logged");
                self.note(lead, &format!("Forwarding failed: {e}"), "error")
                    .await;
                ForwardOutcome {
                    forwarded: false,
                    advisor: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    async fn note(&self, lead: &Lead, text: &str, kind: &str) {
        if let Err(e) = self.store.add_note(&lead.id, text, kind).await {
            warn!(lead_id = %lead.id, error = %e, "failed to attach note");
        }
    }
}

/// Render the notification sent to the regional advisor.
pub fn format_advisor_message(lead: &Lead) -> String {
    let mut message = String::from("*NEW FRANCHISE ENQUIRY*\n\n");
    message.push_str(&format!("Lead ID: {}\n", lead.id));
    message.push_str(&format!(
        "Received: {}\n",
        lead.created_at.format("%d %b %Y %H:%M UTC")
    ));
    message.push_str(&format!("Customer Phone: {}\n", lead.customer_phone));
    if !lead.customer_name.is_empty() && lead.customer_name != "Unknown" {
        message.push_str(&format!("Customer Name: {}\n", lead.customer_name));
    }
    if !lead.location.is_empty() && lead.location != "Not specified" {
        message.push_str(&format!("Location Interest: {}\n", lead.location));
    }
    message.push_str(&format!("Enquiry Type: {}\n", lead.enquiry_type));
    if !lead.enquiry_message.is_empty() {
        message.push_str(&format!("\nCustomer Message:\n\"{}\"\n", lead.enquiry_message));
    }
    if !lead.interested_in.is_empty() {
        message.push_str("\nInterested In:\n");
        for item in &lead.interested_in {
            message.push_str(&format!("- {item}\n"));
        }
    }
    message.push_str("\nPlease contact the customer within 24 hours.\n");
    message.push_str("This lead has been logged in the dashboard.");
    message
}
