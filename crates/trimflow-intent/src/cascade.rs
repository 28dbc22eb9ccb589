// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The intent resolution cascade.
//!
//! Resolves a raw message to a named intent and confidence by trying, in
//! fixed priority order: literal command keywords, the weighted pattern
//! matcher, the external NLU service, the generative-text fallback, and a
//! static default. Each probabilistic stage has an acceptance threshold;
//! rejection or collaborator failure falls through silently to the next
//! stage. The default stage always succeeds, so classification is total.

use std::sync::Arc;

use tracing::{debug, warn};
use trimflow_core::{IntentDetector, NLU_NO_MATCH_INTENT, TextGenerator};

use crate::pattern::PatternMatcher;

/// Which cascade stage produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationSource {
    Command,
    Pattern,
    Nlu,
    Generative,
    Default,
}

impl std::fmt::Display for ClassificationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassificationSource::Command => write!(f, "command"),
            ClassificationSource::Pattern => write!(f, "pattern"),
            ClassificationSource::Nlu => write!(f, "nlu"),
            ClassificationSource::Generative => write!(f, "generative"),
            ClassificationSource::Default => write!(f, "default"),
        }
    }
}

/// A resolved classification.
#[derive(Debug, Clone)]
pub struct Classification {
    /// Resolved intent name.
    pub intent: String,
    /// Confidence in [0, 1]. Commands are 1.0; the default stage reports
    /// 0.0 as the "nothing matched" sentinel.
    pub confidence: f32,
    /// The stage that produced this result.
    pub source: ClassificationSource,
    /// Ready-made reply text carried from the NLU fulfillment or the
    /// generative output, when the stage supplied one.
    pub reply: Option<String>,
}

/// Intent name produced by the default stage.
pub const DEFAULT_INTENT: &str = "default";
/// Intent name produced by an accepted generative completion.
pub const CONVERSATIONAL_INTENT: &str = "conversational";

/// Substring commands: operationally critical keywords that must never be
/// shadowed by probabilistic stages.
const SUBSTRING_COMMANDS: &[(&str, &str)] = &[
    ("menu", "menu"),
    ("price list", "menu"),
    ("all services", "menu"),
    ("help", "help"),
];

/// Exact-match greetings, checked against the whole trimmed message.
///
/// Public because the conversation handler treats a fresh greeting as
/// abandonment of any in-progress dialogue.
pub const GREETINGS: &[&str] = &[
    "hi", "hello", "hey", "good morning", "good afternoon", "good evening",
];

/// Single-word routes the generative stage must never be consulted for,
/// even when a pattern tier happens to miss them.
const GENERATIVE_SKIP: &[&str] = &[
    "menu", "help", "hi", "hello", "franchise", "haircut", "beard", "spa", "facial", "color",
    "massage", "wedding", "groom", "book", "appointment", "price", "timing", "timings",
    "location", "locations", "outlet", "outlets",
];

/// The layered classifier.
///
/// NLU and generative collaborators are optional and best-effort: a missing
/// collaborator simply skips its stage, and any error from one is logged and
/// swallowed, never surfaced to the end user.
pub struct IntentCascade {
    matcher: PatternMatcher,
    nlu: Option<Arc<dyn IntentDetector>>,
    generator: Option<Arc<dyn TextGenerator>>,
    nlu_threshold: f32,
}

impl IntentCascade {
    /// Create a cascade with the given stage thresholds and no external
    /// collaborators.
    pub fn new(pattern_threshold: f32, nlu_threshold: f32) -> Self {
        Self {
            matcher: PatternMatcher::with_threshold(pattern_threshold),
            nlu: None,
            generator: None,
            nlu_threshold,
        }
    }

    /// Attach the external NLU classifier.
    pub fn with_nlu(mut self, nlu: Arc<dyn IntentDetector>) -> Self {
        self.nlu = Some(nlu);
        self
    }

    /// Attach the generative-text fallback.
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Resolve `message` to an intent. `session_id` is the stable per-user
    /// key (phone number) forwarded to the NLU service.
    pub async fn classify(&self, session_id: &str, message: &str) -> Classification {
        let trimmed = message.trim();
        let lower = trimmed.to_lowercase();

        // Stage 1: literal commands.
        if let Some(intent) = command_intent(&lower) {
            return Classification {
                intent: intent.to_string(),
                confidence: 1.0,
                source: ClassificationSource::Command,
                reply: None,
            };
        }

        // Stage 2: weighted pattern matcher.
        if let Some(m) = self.matcher.best_match(trimmed) {
            debug!(intent = m.intent, confidence = m.confidence, matched = m.matched,
                "pattern stage accepted");
            return Classification {
                intent: m.intent.to_string(),
                confidence: m.confidence,
                source: ClassificationSource::Pattern,
                reply: None,
            };
        }

        // Stage 3: external NLU service.
        if let Some(ref nlu) = self.nlu {
            match nlu.detect_intent(session_id, trimmed).await {
                Ok(result) => {
                    if result.confidence > self.nlu_threshold
                        && result.intent != NLU_NO_MATCH_INTENT
                    {
                        debug!(intent = %result.intent, confidence = result.confidence,
                            "nlu stage accepted");
                        let reply = (!result.fulfillment_text.is_empty())
                            .then_some(result.fulfillment_text);
                        return Classification {
                            intent: result.intent,
                            confidence: result.confidence,
                            source: ClassificationSource::Nlu,
                            reply,
                        };
                    }
                    debug!(intent = %result.intent, confidence = result.confidence,
                        "nlu stage fell through");
                }
                Err(e) => {
                    warn!(error = %e, "nlu stage unavailable, falling through");
                }
            }
        }

        // Stage 4: generative fallback, gated to plausibly conversational
        // messages so single-word keywords never burn the expensive call.
        if let Some(ref generator) = self.generator {
            if generator.is_available() && should_attempt_generative(trimmed) {
                match generator.generate(trimmed).await {
                    Ok(text) if !text.trim().is_empty() => {
                        return Classification {
                            intent: CONVERSATIONAL_INTENT.to_string(),
                            confidence: 0.9,
                            source: ClassificationSource::Generative,
                            reply: Some(text),
                        };
                    }
                    Ok(_) => {
                        debug!("generative stage returned empty text, falling through");
                    }
                    Err(e) => {
                        warn!(error = %e, "generative stage failed, falling through");
                    }
                }
            }
        }

        // Stage 5: static default. Always succeeds.
        Classification {
            intent: DEFAULT_INTENT.to_string(),
            confidence: 0.0,
            source: ClassificationSource::Default,
            reply: None,
        }
    }
}

/// Command-stage lookup over the lowercased message.
fn command_intent(lower: &str) -> Option<&'static str> {
    if GREETINGS.contains(&lower) {
        return Some("greeting");
    }
    SUBSTRING_COMMANDS
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, intent)| *intent)
}

/// Whether a message is plausibly conversational enough to justify the
/// generative call: longer than three words, or carrying an interrogative
/// cue. Single-word known keywords are always excluded.
pub fn should_attempt_generative(message: &str) -> bool {
    let trimmed = message.trim();
    if trimmed.is_empty() || trimmed.len() > 500 {
        return false;
    }

    let lower = trimmed.to_lowercase();
    if GENERATIVE_SKIP.contains(&lower.as_str()) {
        return false;
    }

    let word_count = trimmed.split_whitespace().count();
    if word_count > 3 {
        return true;
    }

    if trimmed.contains('?') {
        return true;
    }

    const INTERROGATIVES: &[&str] = &[
        "what", "when", "where", "how", "why", "which", "who", "can", "do", "is", "are",
    ];
    lower
        .split_whitespace()
        .next()
        .map(|first| INTERROGATIVES.contains(&first))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trimflow_test_utils::{MockGenerator, MockIntentDetector};

    fn cascade() -> IntentCascade {
        IntentCascade::new(0.5, 0.7)
    }

    #[tokio::test]
    async fn command_keyword_wins_over_everything() {
        // The NLU stub would return a confident different answer; the
        // command stage must never let it run.
        let nlu = Arc::new(MockIntentDetector::with_results(vec![Ok((
            "haircut".to_string(),
            0.99,
            String::new(),
        ))]));
        let cascade = cascade().with_nlu(nlu.clone());

        let result = cascade.classify("+911", "menu").await;
        assert_eq!(result.intent, "menu");
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.source, ClassificationSource::Command);
        assert_eq!(nlu.call_count(), 0);
    }

    #[tokio::test]
    async fn price_list_routes_to_menu_command() {
        let result = cascade().classify("+911", "send me the price list").await;
        assert_eq!(result.intent, "menu");
        assert_eq!(result.source, ClassificationSource::Command);
    }

    #[tokio::test]
    async fn greeting_is_exact_match_only() {
        let result = cascade().classify("+911", "hello").await;
        assert_eq!(result.intent, "greeting");
        assert_eq!(result.source, ClassificationSource::Command);
        // A sentence merely containing a greeting is not a greeting command.
        let result = cascade().classify("+911", "hello do you do fades").await;
        assert_ne!(result.source, ClassificationSource::Command);
    }

    #[tokio::test]
    async fn pattern_stage_resolves_service_query() {
        let result = cascade().classify("+911", "i want a harcut done").await;
        assert_eq!(result.intent, "haircut");
        assert_eq!(result.source, ClassificationSource::Pattern);
    }

    #[tokio::test]
    async fn pattern_boundary_falls_through_to_default() {
        // "fade" scores exactly 0.5 (related tier only); the boundary is
        // exclusive so with no collaborators this lands on the default.
        let result = cascade().classify("+911", "fade").await;
        assert_eq!(result.intent, DEFAULT_INTENT);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.source, ClassificationSource::Default);
    }

    #[tokio::test]
    async fn nlu_accepted_above_threshold() {
        let nlu = Arc::new(MockIntentDetector::with_results(vec![Ok((
            "store.policy".to_string(),
            0.85,
            "Our hygiene policy...".to_string(),
        ))]));
        let cascade = cascade().with_nlu(nlu.clone());

        let result = cascade.classify("+911", "do you sanitise tools").await;
        assert_eq!(result.intent, "store.policy");
        assert_eq!(result.source, ClassificationSource::Nlu);
        assert_eq!(result.reply.as_deref(), Some("Our hygiene policy..."));
        assert_eq!(nlu.call_count(), 1);
    }

    #[tokio::test]
    async fn nlu_sentinel_falls_through() {
        let nlu = Arc::new(MockIntentDetector::with_results(vec![Ok((
            trimflow_core::NLU_NO_MATCH_INTENT.to_string(),
            0.95,
            "no idea".to_string(),
        ))]));
        let cascade = cascade().with_nlu(nlu);

        let result = cascade.classify("+911", "do you sanitise tools").await;
        assert_eq!(result.source, ClassificationSource::Default);
    }

    #[tokio::test]
    async fn nlu_below_threshold_falls_through() {
        let nlu = Arc::new(MockIntentDetector::with_results(vec![Ok((
            "store.policy".to_string(),
            0.7,
            String::new(),
        ))]));
        let cascade = cascade().with_nlu(nlu);

        // 0.7 does not clear the exclusive 0.7 threshold.
        let result = cascade.classify("+911", "do you sanitise tools").await;
        assert_eq!(result.source, ClassificationSource::Default);
    }

    #[tokio::test]
    async fn nlu_error_falls_through_silently() {
        let nlu = Arc::new(MockIntentDetector::with_results(vec![Err(
            "connection refused".to_string(),
        )]));
        let generator = Arc::new(MockGenerator::with_responses(vec![
            "We open at 9 AM on weekdays.".to_string(),
        ]));
        let cascade = cascade().with_nlu(nlu).with_generator(generator);

        let result = cascade
            .classify("+911", "can my son come along with me tomorrow")
            .await;
        assert_eq!(result.intent, CONVERSATIONAL_INTENT);
        assert_eq!(result.source, ClassificationSource::Generative);
    }

    #[tokio::test]
    async fn generative_skip_list_blocks_single_keywords() {
        let generator = Arc::new(MockGenerator::with_responses(vec![
            "should never be used".to_string(),
        ]));
        let cascade = cascade().with_generator(generator.clone());

        let result = cascade.classify("+911", "menu").await;
        assert_eq!(result.source, ClassificationSource::Command);
        assert_eq!(generator.call_count(), 0);

        // Short non-keyword with no conversational cues also skips.
        let result = cascade.classify("+911", "ok").await;
        assert_eq!(result.source, ClassificationSource::Default);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn unavailable_generator_is_never_called() {
        let generator = Arc::new(MockGenerator::unavailable("invalid credential"));
        let cascade = cascade().with_generator(generator.clone());

        let result = cascade
            .classify("+911", "can my son come along with me tomorrow")
            .await;
        assert_eq!(result.source, ClassificationSource::Default);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn generative_error_falls_through_to_default() {
        let generator = Arc::new(MockGenerator::with_results(vec![Err(
            "timeout".to_string(),
        )]));
        let cascade = cascade().with_generator(generator.clone());

        let result = cascade
            .classify("+911", "can my son come along with me tomorrow")
            .await;
        assert_eq!(result.source, ClassificationSource::Default);
        assert_eq!(generator.call_count(), 1);
    }

    #[test]
    fn gating_rules() {
        assert!(!should_attempt_generative(""));
        assert!(!should_attempt_generative("menu"));
        assert!(!should_attempt_generative("timings"));
        assert!(!should_attempt_generative("ok"));
        assert!(should_attempt_generative("what products do you use"));
        assert!(should_attempt_generative("sulphate free?"));
        assert!(should_attempt_generative(
            "can my son come along with me tomorrow"
        ));
        let long = "a ".repeat(300);
        assert!(!should_attempt_generative(&long));
    }

    #[test]
    fn source_display() {
        assert_eq!(ClassificationSource::Command.to_string(), "command");
        assert_eq!(ClassificationSource::Pattern.to_string(), "pattern");
        assert_eq!(ClassificationSource::Nlu.to_string(), "nlu");
        assert_eq!(ClassificationSource::Generative.to_string(), "generative");
        assert_eq!(ClassificationSource::Default.to_string(), "default");
    }
}
