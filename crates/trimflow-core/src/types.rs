// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Trimflow workspace.

use serde::{Deserialize, Serialize};

/// An inbound message delivered by the transport layer.
///
/// The transport adapter strips provider-specific framing (e.g. a
/// `whatsapp:` prefix on the sender) before handing the message to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Sender identity, normally an E.164 phone number.
    pub from: String,
    /// Raw message text.
    pub text: String,
    /// Display name the transport reported for the sender, if any.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl InboundMessage {
    /// Convenience constructor for text-only messages.
    pub fn new(from: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            text: text.into(),
            display_name: None,
        }
    }
}

/// Result of a single external NLU classification call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NluResult {
    /// Intent name as reported by the external classifier.
    pub intent: String,
    /// Classifier confidence in [0, 1].
    pub confidence: f32,
    /// Ready-made reply text the classifier suggests, if any.
    #[serde(default)]
    pub fulfillment_text: String,
}

/// Intent name the external NLU service reports when nothing matched.
///
/// The cascade must treat this as "no answer" and fall through, never as a
/// real classification.
pub const NLU_NO_MATCH_INTENT: &str = "fallback";
