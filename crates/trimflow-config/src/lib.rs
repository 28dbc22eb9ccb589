// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Trimflow bot.
//!
//! Layered TOML + environment configuration with strict unknown-field
//! rejection. See [`loader`] for the merge hierarchy.

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::TrimflowConfig;
