// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-turn conversation orchestration.
//!
//! One inbound message flows through: greeting/abandonment check ->
//! mid-flow advance (if collecting) -> franchise-context sub-routing ->
//! intent cascade -> response formatting. The handler is the one place
//! that catches the lead store's loud failure and turns it into an
//! apology instead of crashing the request task.

use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, error};

use trimflow_core::InboundMessage;
use trimflow_intent::{
    CONVERSATIONAL_INTENT, DEFAULT_INTENT, GREETINGS, IntentCascade, extract_datetime,
    extract_location, is_service_intent,
};
use trimflow_leads::{EnquiryType, ForwardingService, LeadStore};

use crate::context::{CoarseIntent, ConversationStore};
use crate::flow::LeadCollectionFlow;
use crate::responder;

static CONTACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(contact|call|phone|number|reach|connect|speak|talk)\b")
        .expect("valid regex")
});

static THANKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(thank|thanks|appreciate)\b").expect("valid regex"));

static BYE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(bye|goodbye|see you|later)\b").expect("valid regex"));

/// Orchestrates one conversation turn end-to-end.
pub struct ConversationHandler {
    contexts: Arc<ConversationStore>,
    cascade: IntentCascade,
    flow: LeadCollectionFlow,
}

impl ConversationHandler {
    pub fn new(
        contexts: Arc<ConversationStore>,
        cascade: IntentCascade,
        leads: Arc<LeadStore>,
        forwarder: Arc<ForwardingService>,
    ) -> Self {
        let flow = LeadCollectionFlow::new(contexts.clone(), leads, forwarder);
        Self {
            contexts,
            cascade,
            flow,
        }
    }

    /// Process one inbound message and produce the reply text.
    ///
    /// Never returns an error and never panics: every failure path ends in
    /// one of the formatter's apology/redirect templates.
    pub async fn handle(&self, message: &InboundMessage) -> String {
        let phone = message.from.as_str();
        let text = message.text.trim();
        if text.is_empty() {
            return responder::default_fallback();
        }
        let lower = text.to_lowercase();

        // A fresh greeting abandons whatever was in progress.
        if GREETINGS.contains(&lower.as_str()) {
            self.contexts.set(phone, CoarseIntent::None);
            return responder::welcome(message.display_name.as_deref());
        }

        // Mid-collection messages feed the state machine directly.
        if let Some(ctx) = self.contexts.get(phone) {
            if ctx.stage.is_some() {
                return match self.flow.advance(phone, text).await {
                    Ok(reply) => reply.text,
                    Err(e) => {
                        error!(phone, error = %e, "lead submission failed");
                        responder::storage_failure_apology()
                    }
                };
            }
        }

        // Make sure a context exists and stays fresh for this turn.
        if self.contexts.get(phone).is_none() {
            self.contexts.set(phone, CoarseIntent::None);
        } else {
            self.contexts.touch(phone);
        }

        // Sticky franchise context: follow-up questions stay
        // franchise-flavored without the keyword being repeated.
        let in_franchise = self
            .contexts
            .get(phone)
            .map(|c| c.intent == CoarseIntent::Franchise)
            .unwrap_or(false);
        if in_franchise {
            if let Some(reply) = self.route_franchise(phone, text) {
                return reply;
            }
        }

        let classification = self.cascade.classify(phone, text).await;
        debug!(
            phone,
            intent = %classification.intent,
            confidence = classification.confidence,
            source = %classification.source,
            "message classified"
        );

        match classification.intent.as_str() {
            "greeting" => {
                self.contexts.set(phone, CoarseIntent::None);
                responder::welcome(message.display_name.as_deref())
            }
            "menu" => responder::complete_menu(),
            "help" => responder::help(),
            "franchise" => {
                self.contexts
                    .update(phone, |ctx| ctx.intent = CoarseIntent::Franchise);
                self.route_franchise(phone, text)
                    .unwrap_or_else(responder::franchise_overview)
            }
            intent if is_service_intent(intent) => {
                self.contexts
                    .update(phone, |ctx| ctx.intent = CoarseIntent::Services);
                responder::service_section(intent)
            }
            "price" => responder::price_overview(),
            "location" => match extract_location(text) {
                Some(city) => responder::outlets_for_location(&city),
                None => responder::location_prompt(),
            },
            "timing" => responder::timing_card(),
            "booking" => responder::booking_prompt(extract_datetime(text).as_ref()),
            CONVERSATIONAL_INTENT => classification
                .reply
                .unwrap_or_else(responder::default_fallback),
            DEFAULT_INTENT => {
                if THANKS_RE.is_match(text) {
                    responder::thanks()
                } else if BYE_RE.is_match(text) {
                    responder::goodbye()
                } else {
                    responder::default_fallback()
                }
            }
            // NLU intents outside the canned set: use the service's own
            // fulfillment text when it supplied one.
            _ => classification
                .reply
                .unwrap_or_else(responder::default_fallback),
        }
    }

    /// Franchise-context sub-routing. Returns `None` when the message is
    /// not franchise-specific, letting the generic cascade take over.
    ///
    /// Collection engages only on an explicit contact signal or a concrete
    /// location mention; a bare "franchise" keyword only sets the coarse
    /// intent.
    fn route_franchise(&self, phone: &str, text: &str) -> Option<String> {
        if CONTACT_RE.is_match(text) {
            return Some(self.flow.start(phone, extract_location(text)));
        }
        match EnquiryType::detect(text) {
            EnquiryType::Investment => Some(responder::franchise_investment()),
            EnquiryType::Revenue => Some(responder::franchise_revenue()),
            EnquiryType::Support => Some(responder::franchise_support()),
            EnquiryType::Location | EnquiryType::General => {
                extract_location(text).map(|location| self.flow.start(phone, Some(location)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;
    use trimflow_catalog::RegionalAdvisor;
    use trimflow_test_utils::MockChannel;

    const PHONE: &str = "+919876500001";

    fn advisors() -> Vec<RegionalAdvisor> {
        vec![RegionalAdvisor {
            region: "south-india".into(),
            name: "South Desk".into(),
            contact: Some("+918600010001".into()),
            coverage_areas: vec!["Tamil Nadu".into(), "Chennai".into()],
            active: true,
        }]
    }

    struct Fixture {
        contexts: Arc<ConversationStore>,
        leads: Arc<LeadStore>,
        handler: ConversationHandler,
        _dir: tempfile::TempDir,
    }

    fn fixture() -> Fixture {
        let dir = tempdir().unwrap();
        let contexts = Arc::new(ConversationStore::new(Duration::from_secs(1800)));
        let leads = Arc::new(LeadStore::new(dir.path().join("leads.json")));
        let forwarder = Arc::new(ForwardingService::new(
            advisors(),
            Arc::new(MockChannel::new()),
            leads.clone(),
        ));
        let handler = ConversationHandler::new(
            contexts.clone(),
            IntentCascade::new(0.5, 0.7),
            leads.clone(),
            forwarder,
        );
        Fixture {
            contexts,
            leads,
            handler,
            _dir: dir,
        }
    }

    async fn say(f: &Fixture, text: &str) -> String {
        f.handler
            .handle(&InboundMessage::new(PHONE, text))
            .await
    }

    #[tokio::test]
    async fn greeting_returns_welcome_and_resets_context() {
        let f = fixture();
        f.contexts.set(PHONE, CoarseIntent::Franchise);

        let reply = say(&f, "hello").await;
        assert!(reply.contains("Welcome"));
        assert_eq!(
            f.contexts.get(PHONE).unwrap().intent,
            CoarseIntent::None
        );
    }

    #[tokio::test]
    async fn menu_command_returns_complete_price_list() {
        let f = fixture();
        let reply = say(&f, "menu").await;
        assert!(reply.contains("Complete Price List"));
        assert!(reply.contains("HAIRCUT SERVICES"));
    }

    #[tokio::test]
    async fn service_query_sets_services_intent() {
        let f = fixture();
        let reply = say(&f, "beard prices please").await;
        assert!(reply.contains("BEARD SERVICES"));
        assert_eq!(
            f.contexts.get(PHONE).unwrap().intent,
            CoarseIntent::Services
        );
    }

    #[tokio::test]
    async fn bare_franchise_sets_intent_without_starting_collection() {
        let f = fixture();
        let reply = say(&f, "franchise").await;
        assert!(reply.contains("Franchise Opportunity"));

        let ctx = f.contexts.get(PHONE).unwrap();
        assert_eq!(ctx.intent, CoarseIntent::Franchise);
        assert!(ctx.stage.is_none(), "collection must not start implicitly");
    }

    #[tokio::test]
    async fn franchise_context_makes_followups_franchise_flavored() {
        let f = fixture();
        say(&f, "franchise").await;

        let reply = say(&f, "what support do you provide").await;
        assert!(reply.contains("Franchise Support"));

        let reply = say(&f, "how much investment is needed").await;
        assert!(reply.contains("Investment Breakup"));
    }

    #[tokio::test]
    async fn contact_signal_starts_collection_flow() {
        let f = fixture();
        say(&f, "franchise").await;

        let reply = say(&f, "i want to contact someone").await;
        assert!(reply.contains("name"));
        assert!(f.contexts.get(PHONE).unwrap().stage.is_some());
    }

    #[tokio::test]
    async fn location_mention_in_franchise_context_starts_collection() {
        let f = fixture();
        say(&f, "franchise").await;

        let reply = say(&f, "chennai").await;
        assert!(reply.contains("name"));
        let ctx = f.contexts.get(PHONE).unwrap();
        assert!(ctx.stage.is_some());
        assert_eq!(ctx.draft.preferred_location.as_deref(), Some("Chennai"));
    }

    #[tokio::test]
    async fn full_flow_through_handler_creates_one_lead() {
        let f = fixture();
        say(&f, "franchise").await;
        say(&f, "please call me").await;
        say(&f, "Asha Rao").await;
        say(&f, "Chennai").await;
        say(&f, "skip").await;
        let confirmation = say(&f, "done").await;

        let all = f.leads.all().await.unwrap();
        assert_eq!(all.len(), 1);
        let lead = &all[0];
        assert_eq!(lead.customer_name, "Asha Rao");
        assert_eq!(lead.location, "Chennai");
        assert_eq!(lead.customer_email.as_deref(), Some("Not provided"));
        assert!(confirmation.contains(&lead.id));

        // Context back to bare franchise.
        let ctx = f.contexts.get(PHONE).unwrap();
        assert_eq!(ctx.intent, CoarseIntent::Franchise);
        assert!(ctx.stage.is_none());
    }

    #[tokio::test]
    async fn greeting_mid_flow_abandons_collection() {
        let f = fixture();
        say(&f, "franchise").await;
        say(&f, "please call me").await;
        assert!(f.contexts.get(PHONE).unwrap().stage.is_some());

        let reply = say(&f, "hi").await;
        assert!(reply.contains("Welcome"));
        let ctx = f.contexts.get(PHONE).unwrap();
        assert!(ctx.stage.is_none());
        assert!(f.leads.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn location_query_with_city_lists_outlets() {
        let f = fixture();
        let reply = say(&f, "nearest outlet in chennai").await;
        assert!(reply.contains("Chennai"));
        assert!(reply.contains("Phone:"));
    }

    #[tokio::test]
    async fn thanks_and_goodbye_are_acknowledged() {
        let f = fixture();
        assert!(say(&f, "thanks a lot").await.contains("welcome"));
        assert!(say(&f, "bye for now").await.contains("great day"));
    }

    #[tokio::test]
    async fn unmatched_message_gets_default_fallback() {
        let f = fixture();
        let reply = say(&f, "zxcvb").await;
        assert!(reply.contains("type *menu*"));
    }

    #[tokio::test]
    async fn empty_text_gets_default_fallback() {
        let f = fixture();
        let reply = say(&f, "   ").await;
        assert!(reply.contains("type *menu*"));
    }

    #[tokio::test]
    async fn storage_failure_ends_in_apology_not_panic() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let contexts = Arc::new(ConversationStore::new(Duration::from_secs(1800)));
        let leads = Arc::new(LeadStore::new(blocker.join("leads.json")));
        let forwarder = Arc::new(ForwardingService::new(
            advisors(),
            Arc::new(MockChannel::new()),
            leads.clone(),
        ));
        let handler = ConversationHandler::new(
            contexts,
            IntentCascade::new(0.5, 0.7),
            leads,
            forwarder,
        );

        let say = |text: &'static str| {
            let handler = &handler;
            async move { handler.handle(&InboundMessage::new(PHONE, text)).await }
        };
        say("franchise").await;
        say("please call me").await;
        say("Asha Rao").await;
        say("Chennai").await;
        say("skip").await;
        let reply = say("done").await;
        assert!(reply.contains("couldn't record"));
    }
}
