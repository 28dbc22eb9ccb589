// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./trimflow.toml` > `~/.config/trimflow/trimflow.toml`
//! > `/etc/trimflow/trimflow.toml` with environment variable overrides via
//! `TRIMFLOW_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TrimflowConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/trimflow/trimflow.toml` (system-wide)
/// 3. `~/.config/trimflow/trimflow.toml` (user XDG config)
/// 4. `./trimflow.toml` (local directory)
/// 5. `TRIMFLOW_*` environment variables
pub fn load_config() -> Result<TrimflowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TrimflowConfig::default()))
        .merge(Toml::file("/etc/trimflow/trimflow.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("trimflow/trimflow.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("trimflow.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<TrimflowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TrimflowConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TrimflowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TrimflowConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TRIMFLOW_LEADS_STORE_PATH` must map to
/// `leads.store_path`, not `leads.store.path`.
fn env_provider() -> Env {
    Env::prefixed("TRIMFLOW_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: TRIMFLOW_GENERATIVE_API_KEY -> "generative_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("classifier_", "classifier.", 1)
            .replacen("nlu_", "nlu.", 1)
            .replacen("generative_", "generative.", 1)
            .replacen("conversation_", "conversation.", 1)
            .replacen("leads_", "leads.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}
