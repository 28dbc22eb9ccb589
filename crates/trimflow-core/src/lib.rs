// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Trimflow bot.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Trimflow workspace. All external
//! collaborators (channel, NLU, generative fallback) implement traits
//! defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TrimflowError;
pub use types::{InboundMessage, NLU_NO_MATCH_INTENT, NluResult};

// Re-export all adapter traits at crate root.
pub use traits::{ChannelAdapter, IntentDetector, TextGenerator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimflow_error_has_all_variants() {
        let _config = TrimflowError::Config("test".into());
        let _storage = TrimflowError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _channel = TrimflowError::Channel {
            message: "test".into(),
            source: None,
        };
        let _classifier = TrimflowError::Classifier {
            message: "test".into(),
            source: None,
        };
        let _timeout = TrimflowError::Timeout {
            duration: std::time::Duration::from_secs(8),
        };
        let _internal = TrimflowError::Internal("test".into());
    }

    #[test]
    fn error_display_includes_message() {
        let err = TrimflowError::Classifier {
            message: "nlu unreachable".into(),
            source: None,
        };
        assert!(err.to_string().contains("nlu unreachable"));
    }

    #[test]
    fn all_trait_modules_are_exported() {
        // If any trait module is missing or fails to compile, this test
        // won't compile.
        fn _assert_channel_adapter<T: ChannelAdapter>() {}
        fn _assert_intent_detector<T: IntentDetector>() {}
        fn _assert_text_generator<T: TextGenerator>() {}
    }
}
