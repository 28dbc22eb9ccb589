// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! NLU classifier trait for the external intent-detection service.

use async_trait::async_trait;

use crate::error::TrimflowError;
use crate::types::NluResult;

/// Adapter for the external NLU classifier.
///
/// `session_id` must be a stable per-user key (the phone number) so the
/// external service can keep its own multi-turn slots; the core does not
/// depend on that behavior.
#[async_trait]
pub trait IntentDetector: Send + Sync {
    /// Classifies `text` within the user's session, returning the detected
    /// intent, confidence, and any suggested reply text.
    async fn detect_intent(&self, session_id: &str, text: &str)
    -> Result<NluResult, TrimflowError>;
}
