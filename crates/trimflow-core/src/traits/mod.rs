// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for external collaborators.
//!
//! The conversation core never talks to a messaging provider, NLU vendor,
//! or LLM API directly; it goes through these traits so every collaborator
//! can be substituted with a test double.

pub mod channel;
pub mod generative;
pub mod nlu;

pub use channel::ChannelAdapter;
pub use generative::TextGenerator;
pub use nlu::IntentDetector;
