// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weighted pattern matcher over curated term lists.
//!
//! Scores a message against four term tiers per intent and returns the
//! best-scoring intent when it clears the acceptance threshold. Zero cost,
//! zero latency; sits between the command stage and the external NLU stage
//! in the cascade.

/// Points for an exact-phrase hit.
pub const EXACT_WEIGHT: u32 = 100;
/// Points for a canonical question-form hit.
pub const QUESTION_WEIGHT: u32 = 80;
/// Points for a known-misspelling hit.
pub const TYPO_WEIGHT: u32 = 70;
/// Points for a loosely related vocabulary hit.
pub const RELATED_WEIGHT: u32 = 50;

/// Term tiers for one intent. All matching is case-insensitive substring.
#[derive(Debug, Clone, Copy)]
pub struct IntentPattern {
    pub intent: &'static str,
    pub exact: &'static [&'static str],
    pub questions: &'static [&'static str],
    pub typos: &'static [&'static str],
    pub related: &'static [&'static str],
}

/// The pattern database. Declaration order is the tie-break order: the
/// first intent to reach the top score wins.
pub const PATTERNS: &[IntentPattern] = &[
    IntentPattern {
        intent: "haircut",
        exact: &["haircut", "hair cut", "cut", "hairstyle", "hair style", "cutting"],
        questions: &["haircut price", "how much haircut", "haircut cost", "cutting price"],
        typos: &["harcut", "hercut", "haircot", "haarcut"],
        related: &["trim", "fade", "taper", "mullet", "buzz", "crew"],
    },
    IntentPattern {
        intent: "beard",
        exact: &["beard", "shave", "shaving", "mustache", "moustache", "facial hair"],
        questions: &["beard price", "shaving cost", "beard trimming", "beard rate"],
        typos: &["berd", "baird", "mushtash", "shav"],
        related: &["goatee", "stubble", "zero trim", "beard style"],
    },
    IntentPattern {
        intent: "facial",
        exact: &["facial", "face care", "skin care", "cleanup", "clean up"],
        questions: &["facial price", "facial cost", "face treatment cost"],
        typos: &["facal", "facil", "faceal", "fasial"],
        related: &["glow", "radiance", "brightening", "de-tan", "face treatment"],
    },
    IntentPattern {
        intent: "spa",
        exact: &["spa", "hair spa", "scalp treatment", "hair treatment"],
        questions: &["spa price", "hair spa cost", "hair treatment price"],
        typos: &["spaa", "hairspa"],
        related: &["dandruff", "hair fall", "scalp", "detox", "conditioning"],
    },
    IntentPattern {
        intent: "color",
        exact: &["color", "colour", "dye", "hair color", "hair colour"],
        questions: &["color price", "coloring cost", "dye cost"],
        typos: &["colr", "culer"],
        related: &["highlight", "streak", "tint", "bleach"],
    },
    IntentPattern {
        intent: "wedding",
        exact: &["wedding", "marriage", "groom", "bridal"],
        questions: &["wedding package price", "groom package cost", "wedding service"],
        typos: &["weding", "marrage", "grom"],
        related: &["wedding package", "groom package", "ceremony", "special occasion"],
    },
    IntentPattern {
        intent: "massage",
        exact: &["massage", "head massage", "oil massage"],
        questions: &["massage price", "massage cost", "oil massage cost"],
        typos: &["masage", "masaj"],
        related: &["relaxation", "stress relief"],
    },
    IntentPattern {
        intent: "franchise",
        exact: &["franchise", "franchisee", "business opportunity", "investment", "partner"],
        questions: &["franchise cost", "how to start franchise", "franchise investment", "franchise details"],
        typos: &["franchice", "francise", "partener"],
        related: &["investment opportunity", "partnership", "entrepreneur", "own outlet"],
    },
    IntentPattern {
        intent: "price",
        exact: &["price", "cost", "charge", "rate", "how much", "pricing"],
        questions: &["what is the price", "how much does it cost", "what are the charges"],
        typos: &["prise", "cose"],
        related: &["expensive", "cheap", "affordable", "fee", "amount"],
    },
    IntentPattern {
        intent: "location",
        exact: &["where", "location", "address", "nearest", "outlet", "branch"],
        questions: &["where is outlet", "nearest branch", "find location", "outlet near me"],
        typos: &["loction", "adress", "neer", "outlit"],
        related: &["near", "nearby", "find", "map", "shop", "salon"],
    },
    IntentPattern {
        intent: "timing",
        exact: &["timing", "opening hours", "open", "close", "working hours"],
        questions: &["what time open", "opening hours", "closing time", "when open"],
        typos: &["tym", "timeing", "shedule"],
        related: &["available", "business hours", "hours"],
    },
    IntentPattern {
        intent: "booking",
        exact: &["book", "booking", "appointment", "reserve"],
        questions: &["how to book", "book appointment", "make booking"],
        typos: &["bok", "apointment", "resrve"],
        related: &["schedule visit", "reserve slot", "slot"],
    },
];

/// Intents that describe a customer-facing service category.
pub const SERVICE_INTENTS: &[&str] = &[
    "haircut", "beard", "facial", "spa", "color", "wedding", "massage",
];

/// A scored pattern-stage result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternMatch {
    pub intent: &'static str,
    /// `min(score / 100, 1.0)`.
    pub confidence: f32,
    /// The term that contributed the highest-weight hit.
    pub matched: &'static str,
}

/// Pattern matcher with a configurable acceptance threshold.
///
/// The threshold is exclusive: a match scoring exactly at the boundary is
/// rejected and the cascade falls through to the next stage.
pub struct PatternMatcher {
    threshold: f32,
}

impl PatternMatcher {
    /// Create a matcher with the default 0.5 threshold.
    pub fn new() -> Self {
        Self { threshold: 0.5 }
    }

    /// Create a matcher with a custom acceptance threshold.
    pub fn with_threshold(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Score `message` against every intent and return the best match,
    /// regardless of threshold. Returns `None` when nothing scored.
    pub fn score(&self, message: &str) -> Option<PatternMatch> {
        let lower = message.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }

        let mut best: Option<(u32, PatternMatch)> = None;

        for pattern in PATTERNS {
            let mut score = 0u32;
            let mut matched: Option<&'static str> = None;

            let mut tier = |terms: &'static [&'static str], weight: u32| {
                if let Some(term) = terms.iter().find(|t| lower.contains(*t)) {
                    score += weight;
                    if matched.is_none() {
                        matched = Some(term);
                    }
                }
            };

            tier(pattern.exact, EXACT_WEIGHT);
            tier(pattern.questions, QUESTION_WEIGHT);
            tier(pattern.typos, TYPO_WEIGHT);
            tier(pattern.related, RELATED_WEIGHT);

            if score == 0 {
                continue;
            }

            // Strict > keeps the first intent in declaration order on ties.
            if best.map(|(s, _)| score > s).unwrap_or(true) {
                best = Some((
                    score,
                    PatternMatch {
                        intent: pattern.intent,
                        confidence: (score as f32 / EXACT_WEIGHT as f32).min(1.0),
                        matched: matched.unwrap_or(pattern.intent),
                    },
                ));
            }
        }

        best.map(|(_, m)| m)
    }

    /// The best match, if it strictly clears the acceptance threshold.
    pub fn best_match(&self, message: &str) -> Option<PatternMatch> {
        self.score(message).filter(|m| m.confidence > self.threshold)
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `intent` names a service category from the menu.
pub fn is_service_intent(intent: &str) -> bool {
    SERVICE_INTENTS.contains(&intent)
}
