// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generative-text fallback adapter for Trimflow.

pub mod client;

pub use client::{CircuitState, GenerativeClient};
