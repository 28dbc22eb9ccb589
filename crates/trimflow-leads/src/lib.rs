// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead persistence and forwarding for the Trimflow bot.
//!
//! Leads live in a single JSON document rewritten atomically on every
//! mutation. Creation is mandatory-and-first; advisor forwarding is
//! best-effort-and-after, so a notification failure can never lose an
//! enquiry.

pub mod export;
pub mod forward;
pub mod model;
pub mod store;

pub use export::{CSV_COLUMNS, export_csv};
pub use forward::{ForwardOutcome, ForwardingService, format_advisor_message};
pub use model::{AdvisorInfo, EnquiryType, Lead, LeadNote, LeadStatus, NewLead};
pub use store::{LeadStore, LeadSummary};
