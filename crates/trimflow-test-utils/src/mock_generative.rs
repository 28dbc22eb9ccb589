// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock generative-text client for deterministic testing.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use trimflow_core::{TextGenerator, TrimflowError};

/// Scripted result: `Ok(text)` or an error message.
pub type ScriptedGeneration = Result<String, String>;

/// A text generator that pops scripted results from a FIFO queue and
/// records how often it was invoked. The circuit-breaker contract is
/// modelled by the `available` flag: an unavailable generator must never
/// see a call.
pub struct MockGenerator {
    results: Mutex<VecDeque<ScriptedGeneration>>,
    calls: AtomicUsize,
    available: bool,
    disabled_reason: Option<String>,
}

impl MockGenerator {
    /// Create a generator with an empty script.
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            available: true,
            disabled_reason: None,
        }
    }

    /// Create a generator pre-loaded with successful responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    /// Create a generator pre-loaded with scripted results.
    pub fn with_results(results: Vec<ScriptedGeneration>) -> Self {
        Self {
            results: Mutex::new(VecDeque::from(results)),
            calls: AtomicUsize::new(0),
            available: true,
            disabled_reason: None,
        }
    }

    /// Create a generator whose circuit is open: `is_available` reports
    /// false and any call that happens anyway is an error in the caller.
    pub fn unavailable(reason: &str) -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            available: false,
            disabled_reason: Some(reason.to_string()),
        }
    }

    /// Number of `generate` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The configured disabled reason, if any.
    pub fn disabled_reason(&self) -> Option<&str> {
        self.disabled_reason.as_deref()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn generate(&self, _message: &str) -> Result<String, TrimflowError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.results.lock().expect("mock lock poisoned").pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(TrimflowError::Classifier {
                message,
                source: None,
            }),
            None => Ok("mock generated reply".to_string()),
        }
    }
}
