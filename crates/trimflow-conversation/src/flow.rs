// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The franchise lead-collection state machine.
//!
//! Drives the multi-turn dialogue name -> location -> email -> details ->
//! submit, reading and writing the conversation store. Submission runs the
//! lead store and forwarding synchronously because the confirmation reply
//! must disclose the generated lead ID and the true forwarding outcome.
//!
//! The machine engages only on an explicit contact signal (see the
//! handler); a bare "franchise" keyword never starts data collection.

use std::sync::Arc;

use tracing::{info, warn};

use trimflow_core::TrimflowError;
use trimflow_leads::{EnquiryType, ForwardingService, Lead, LeadStore, NewLead};

use crate::context::{CoarseIntent, ConversationStore, DraftLead, LeadStage};
use crate::responder;

/// Value stored when the user skips the email question.
const EMAIL_NOT_PROVIDED: &str = "Not provided";

/// Outcome of one flow turn.
#[derive(Debug)]
pub struct FlowReply {
    /// Text to send back to the user.
    pub text: String,
    /// The created lead, present only on the submission turn.
    pub lead: Option<Lead>,
}

impl FlowReply {
    fn text_only(text: String) -> Self {
        Self { text, lead: None }
    }
}

/// The collection flow engine.
pub struct LeadCollectionFlow {
    contexts: Arc<ConversationStore>,
    leads: Arc<LeadStore>,
    forwarder: Arc<ForwardingService>,
}

impl LeadCollectionFlow {
    pub fn new(
        contexts: Arc<ConversationStore>,
        leads: Arc<LeadStore>,
        forwarder: Arc<ForwardingService>,
    ) -> Self {
        Self {
            contexts,
            leads,
            forwarder,
        }
    }

    /// Engage the flow for a user. A location already mentioned in the
    /// triggering message is prefilled into the draft; the location
    /// question is still asked and an explicit answer overwrites it.
    pub fn start(&self, phone: &str, prefill_location: Option<String>) -> String {
        if self.contexts.get(phone).is_none() {
            self.contexts.set(phone, CoarseIntent::Franchise);
        }
        self.contexts.update(phone, |ctx| {
            ctx.intent = CoarseIntent::Franchise;
            ctx.stage = Some(LeadStage::CollectingName);
            ctx.draft = DraftLead {
                preferred_location: prefill_location,
                ..DraftLead::default()
            };
        });
        info!(phone, "lead collection flow engaged");
        responder::ask_name()
    }

    /// Feed one user message into the active flow.
    ///
    /// The only error that can escape is lead-store unavailability on the
    /// submission turn; the caller turns it into an apology. The context is
    /// left untouched in that case so the user can simply retry.
    pub async fn advance(&self, phone: &str, message: &str) -> Result<FlowReply, TrimflowError> {
        let Some(ctx) = self.contexts.get(phone) else {
            // Expired mid-dialogue. Fatal to the flow, not the process.
            return Ok(FlowReply::text_only(responder::collection_restart()));
        };
        let Some(stage) = ctx.stage else {
            warn!(phone, "flow advanced without an active stage");
            self.contexts.clear(phone);
            return Ok(FlowReply::text_only(responder::collection_restart()));
        };

        let answer = message.trim();
        match stage {
            LeadStage::CollectingName => {
                self.contexts.update(phone, |ctx| {
                    ctx.draft.name = Some(answer.to_string());
                    ctx.stage = Some(LeadStage::CollectingLocation);
                });
                Ok(FlowReply::text_only(responder::ask_location()))
            }
            LeadStage::CollectingLocation => {
                self.contexts.update(phone, |ctx| {
                    ctx.draft.preferred_location = Some(answer.to_string());
                    ctx.stage = Some(LeadStage::CollectingEmail);
                });
                Ok(FlowReply::text_only(responder::ask_email()))
            }
            LeadStage::CollectingEmail => {
                let email = if answer.eq_ignore_ascii_case("skip") {
                    EMAIL_NOT_PROVIDED.to_string()
                } else {
                    answer.to_string()
                };
                self.contexts.update(phone, |ctx| {
                    ctx.draft.email = Some(email);
                    ctx.stage = Some(LeadStage::CollectingDetails);
                });
                Ok(FlowReply::text_only(responder::ask_details()))
            }
            LeadStage::CollectingDetails => {
                let detail = if answer.eq_ignore_ascii_case("done") {
                    None
                } else {
                    Some(answer.to_string())
                };
                self.submit(phone, ctx.draft, detail).await
            }
        }
    }

    /// Terminal transition: persist the lead, attempt forwarding, reset the
    /// context to bare franchise intent, and confirm with the lead ID.
    async fn submit(
        &self,
        phone: &str,
        draft: DraftLead,
        detail: Option<String>,
    ) -> Result<FlowReply, TrimflowError> {
        // Defensive check against state corruption: required fields must
        // have been collected before we reach the terminal stage.
        let (Some(name), Some(location)) = (draft.name, draft.preferred_location) else {
            warn!(phone, "draft missing required fields at submission, restarting flow");
            self.contexts.clear(phone);
            return Ok(FlowReply::text_only(responder::collection_restart()));
        };

        let enquiry_message = detail
            .clone()
            .unwrap_or_else(|| format!("Franchise enquiry for {location} (guided flow)"));

        let lead = self
            .leads
            .create_lead(NewLead {
                customer_phone: phone.to_string(),
                customer_name: name,
                customer_email: Some(
                    draft.email.unwrap_or_else(|| EMAIL_NOT_PROVIDED.to_string()),
                ),
                location,
                enquiry_type: EnquiryType::detect(&enquiry_message),
                enquiry_message,
                interested_in: vec!["Franchise Opportunity".to_string()],
            })
            .await?;

        let outcome = self.forwarder.forward_to_advisor(&lead).await;

        // Flow complete: back to bare franchise intent so follow-up
        // messages stay franchise-flavored without re-collecting.
        self.contexts.set(phone, CoarseIntent::Franchise);

        let text = match outcome.advisor {
            Some(advisor) if outcome.forwarded => {
                responder::lead_confirmation_forwarded(&lead.id, &advisor.name)
            }
            _ => responder::lead_confirmation_logged(&lead.id),
        };

        Ok(FlowReply {
            text,
            lead: Some(lead),
        })
    }
}
