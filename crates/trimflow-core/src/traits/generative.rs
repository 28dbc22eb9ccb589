// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generative-text fallback trait.

use async_trait::async_trait;

use crate::error::TrimflowError;

/// Adapter for the expensive generative-text fallback.
///
/// Implementations must run under a bounded timeout and must never retry
/// without bound. `is_available` lets callers skip the call entirely when
/// the client has disabled itself (e.g. a permanent credential error).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Whether the generator is currently willing to attempt a call.
    fn is_available(&self) -> bool;

    /// Generates a grounded reply to the user's message. Prompt assembly
    /// (knowledge context, formatting instructions) is the implementation's
    /// concern.
    async fn generate(&self, message: &str) -> Result<String, TrimflowError>;
}
