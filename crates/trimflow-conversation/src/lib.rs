// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation core for the Trimflow bot.
//!
//! Holds the per-user state store with lazy expiry, the franchise
//! lead-collection state machine, the pure response formatter, and the
//! handler that orchestrates one turn end-to-end.

pub mod context;
pub mod flow;
pub mod handler;
pub mod responder;

pub use context::{CoarseIntent, ConversationContext, ConversationStore, DraftLead, LeadStage};
pub use flow::{FlowReply, LeadCollectionFlow};
pub use handler::ConversationHandler;
