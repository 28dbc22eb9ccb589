// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user conversation state with lazy time-based expiry.
//!
//! Keyed by phone number. Expiry is evaluated at read time against the
//! stored `last_activity` timestamp; there is no background sweeper. The
//! dashmap shards give per-key locking, so retried webhook deliveries for
//! the same user cannot interleave destructively, and unrelated users never
//! contend.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// Coarse conversation topic, surviving across turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoarseIntent {
    #[default]
    None,
    Services,
    Franchise,
}

impl std::fmt::Display for CoarseIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoarseIntent::None => write!(f, "none"),
            CoarseIntent::Services => write!(f, "services"),
            CoarseIntent::Franchise => write!(f, "franchise"),
        }
    }
}

/// Stage of the franchise lead-collection dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadStage {
    CollectingName,
    CollectingLocation,
    CollectingEmail,
    CollectingDetails,
}

impl std::fmt::Display for LeadStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadStage::CollectingName => write!(f, "collecting_name"),
            LeadStage::CollectingLocation => write!(f, "collecting_location"),
            LeadStage::CollectingEmail => write!(f, "collecting_email"),
            LeadStage::CollectingDetails => write!(f, "collecting_details"),
        }
    }
}

/// Partial lead fields accumulated by the collection flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftLead {
    pub name: Option<String>,
    pub preferred_location: Option<String>,
    pub email: Option<String>,
    pub details: Option<String>,
}

/// One user's conversation state.
#[derive(Debug, Clone)]
pub struct ConversationContext {
    pub phone: String,
    pub intent: CoarseIntent,
    /// Present only while the franchise collection flow is active.
    pub stage: Option<LeadStage>,
    pub draft: DraftLead,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

/// Keyed store of conversation contexts.
pub struct ConversationStore {
    contexts: DashMap<String, ConversationContext>,
    timeout: chrono::Duration,
}

impl ConversationStore {
    /// Create a store with the given inactivity timeout.
    pub fn new(timeout: std::time::Duration) -> Self {
        Self {
            contexts: DashMap::new(),
            timeout: chrono::Duration::from_std(timeout)
                .unwrap_or_else(|_| chrono::Duration::minutes(30)),
        }
    }

    fn expired(&self, context: &ConversationContext) -> bool {
        Utc::now() - context.last_activity > self.timeout
    }

    /// Fetch a user's context. A context whose `last_activity` is older
    /// than the timeout is removed and reported absent.
    pub fn get(&self, phone: &str) -> Option<ConversationContext> {
        let entry = self.contexts.get(phone)?;
        if self.expired(&entry) {
            drop(entry);
            self.contexts.remove(phone);
            return None;
        }
        Some(entry.clone())
    }

    /// Replace (or create) a user's context with a fresh one carrying the
    /// given coarse intent. Nothing from any previous context survives.
    pub fn set(&self, phone: &str, intent: CoarseIntent) {
        let now = Utc::now();
        self.contexts.insert(
            phone.to_string(),
            ConversationContext {
                phone: phone.to_string(),
                intent,
                stage: None,
                draft: DraftLead::default(),
                created_at: now,
                last_activity: now,
            },
        );
    }

    /// Mutate a user's context in place and refresh `last_activity`.
    /// Returns false when the context is absent or expired (expired
    /// contexts are removed, exactly as in [`get`]).
    pub fn update<F>(&self, phone: &str, mutate: F) -> bool
    where
        F: FnOnce(&mut ConversationContext),
    {
        let Some(mut entry) = self.contexts.get_mut(phone) else {
            return false;
        };
        if self.expired(&entry) {
            drop(entry);
            self.contexts.remove(phone);
            return false;
        }
        mutate(&mut entry);
        entry.last_activity = Utc::now();
        true
    }

    /// Refresh a context's `last_activity` without other changes.
    pub fn touch(&self, phone: &str) -> bool {
        self.update(phone, |_| {})
    }

    /// Remove a user's context entirely.
    pub fn clear(&self, phone: &str) {
        self.contexts.remove(phone);
    }

    /// Number of live (possibly stale) entries, for diagnostics.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}
