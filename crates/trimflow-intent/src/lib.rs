// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent resolution for the Trimflow bot.
//!
//! Three pieces: the weighted [`pattern`] matcher, the layered [`cascade`]
//! that orders command / pattern / NLU / generative / default stages, and
//! the [`extract`] side lookups for cities and date/time expressions.

pub mod cascade;
pub mod extract;
pub mod pattern;

pub use cascade::{
    CONVERSATIONAL_INTENT, Classification, ClassificationSource, DEFAULT_INTENT, GREETINGS,
    IntentCascade, should_attempt_generative,
};
pub use extract::{DateTimeMention, extract_datetime, extract_location};
pub use pattern::{PatternMatch, PatternMatcher, is_service_intent};
