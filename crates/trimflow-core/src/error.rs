// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Trimflow bot.

use thiserror::Error;

/// The primary error type used across all Trimflow adapter traits and core operations.
#[derive(Debug, Error)]
pub enum TrimflowError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Lead store errors (file I/O, serialization). The one failure class
    /// allowed to surface to the conversation handler: a lead must never be
    /// dropped silently.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Channel delivery errors (outbound send failure, rate limiting).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Classifier collaborator errors (NLU service, generative fallback).
    /// Always recovered by cascade fallthrough, never shown to the user.
    #[error("classifier error: {message}")]
    Classifier {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
