// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock NLU classifier for deterministic testing.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use trimflow_core::{IntentDetector, NLU_NO_MATCH_INTENT, NluResult, TrimflowError};

/// Scripted result: `Ok((intent, confidence, fulfillment_text))` or an
/// error message.
pub type ScriptedNlu = Result<(String, f32, String), String>;

/// An intent detector that pops scripted results from a FIFO queue.
///
/// When the queue is empty it reports the no-match sentinel at zero
/// confidence, which every caller must treat as fallthrough.
pub struct MockIntentDetector {
    results: Mutex<VecDeque<ScriptedNlu>>,
    calls: AtomicUsize,
}

impl MockIntentDetector {
    /// Create a detector with an empty script.
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a detector pre-loaded with scripted results.
    pub fn with_results(results: Vec<ScriptedNlu>) -> Self {
        Self {
            results: Mutex::new(VecDeque::from(results)),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `detect_intent` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockIntentDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IntentDetector for MockIntentDetector {
    async fn detect_intent(
        &self,
        _session_id: &str,
        _text: &str,
    ) -> Result<NluResult, TrimflowError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.results.lock().expect("mock lock poisoned").pop_front();
        match next {
            Some(Ok((intent, confidence, fulfillment_text))) => Ok(NluResult {
                intent,
                confidence,
                fulfillment_text,
            }),
            Some(Err(message)) => Err(TrimflowError::Classifier {
                message,
                source: None,
            }),
            None => Ok(NluResult {
                intent: NLU_NO_MATCH_INTENT.to_string(),
                confidence: 0.0,
                fulfillment_text: String::new(),
            }),
        }
    }
}
