// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External NLU classifier adapter for Trimflow.

pub mod client;

pub use client::NluClient;
