// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter trait for outbound message delivery.

use async_trait::async_trait;

use crate::error::TrimflowError;

/// Adapter for dispatching text to a messaging channel.
///
/// The core hands over plain text and an identity; the adapter owns all
/// provider-specific wire formats and delivery mechanics.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Sends a text message to the given identity.
    async fn send_text(&self, to: &str, text: &str) -> Result<(), TrimflowError>;
}
