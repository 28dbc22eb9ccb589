// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock channel adapter for deterministic testing.
//!
//! Records every outbound send; can be configured to fail every delivery,
//! which is how forwarding-failure paths are exercised.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use trimflow_core::{ChannelAdapter, TrimflowError};

/// A channel adapter that records sends instead of delivering them.
pub struct MockChannel {
    sent: Mutex<Vec<(String, String)>>,
    calls: AtomicUsize,
    fail_with: Option<String>,
}

impl MockChannel {
    /// Create a channel that accepts every send.
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail_with: None,
        }
    }

    /// Create a channel that fails every send with the given reason.
    pub fn failing(reason: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            fail_with: Some(reason.to_string()),
        }
    }

    /// All `(to, text)` pairs delivered so far.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().expect("mock lock poisoned").clone()
    }

    /// Number of send attempts, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChannelAdapter for MockChannel {
    async fn send_text(&self, to: &str, text: &str) -> Result<(), TrimflowError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ref reason) = self.fail_with {
            return Err(TrimflowError::Channel {
                message: reason.clone(),
                source: None,
            });
        }
        self.sent
            .lock()
            .expect("mock lock poisoned")
            .push((to.to_string(), text.to_string()));
        Ok(())
    }
}
