// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Trimflow bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Trimflow configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TrimflowConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Intent cascade thresholds.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// External NLU classifier settings.
    #[serde(default)]
    pub nlu: NluConfig,

    /// Generative-text fallback settings.
    #[serde(default)]
    pub generative: GenerativeConfig,

    /// Conversation state settings.
    #[serde(default)]
    pub conversation: ConversationConfig,

    /// Lead store settings.
    #[serde(default)]
    pub leads: LeadsConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the bot.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "trimflow".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Intent cascade threshold configuration.
///
/// The pattern and NLU acceptance boundaries are exclusive: a score exactly
/// at the threshold falls through to the next stage.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Minimum pattern-stage confidence, exclusive (default 0.5).
    #[serde(default = "default_pattern_threshold")]
    pub pattern_threshold: f32,

    /// Minimum NLU-stage confidence, exclusive (default 0.7).
    #[serde(default = "default_nlu_threshold")]
    pub nlu_threshold: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            pattern_threshold: default_pattern_threshold(),
            nlu_threshold: default_nlu_threshold(),
        }
    }
}

fn default_pattern_threshold() -> f32 {
    0.5
}

fn default_nlu_threshold() -> f32 {
    0.7
}

/// External NLU classifier configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NluConfig {
    /// Base URL of the NLU service. `None` disables the NLU stage.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// API key sent with each request, if the service requires one.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_nlu_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NluConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout_secs: default_nlu_timeout_secs(),
        }
    }
}

fn default_nlu_timeout_secs() -> u64 {
    5
}

/// Generative-text fallback configuration.
///
/// The timeout must stay comfortably below the transport layer's own
/// response deadline; a late reply makes the provider retry the whole
/// webhook delivery.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GenerativeConfig {
    /// Enable the generative fallback stage. Opt-in.
    #[serde(default)]
    pub enabled: bool,

    /// API key for the generative service. `None` disables the stage.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the generative completion endpoint. `None` disables
    /// the stage.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Model identifier to request.
    #[serde(default = "default_generative_model")]
    pub model: String,

    /// Request timeout in milliseconds (default 8000).
    #[serde(default = "default_generative_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum output tokens per completion.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            endpoint: None,
            model: default_generative_model(),
            timeout_ms: default_generative_timeout_ms(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_generative_model() -> String {
    "concise-chat-1".to_string()
}

fn default_generative_timeout_ms() -> u64 {
    8000
}

fn default_max_output_tokens() -> u32 {
    320
}

fn default_temperature() -> f32 {
    0.2
}

/// Conversation state configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConversationConfig {
    /// Seconds of inactivity after which a conversation context expires
    /// (default 1800 = 30 minutes).
    #[serde(default = "default_context_timeout_secs")]
    pub context_timeout_secs: u64,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            context_timeout_secs: default_context_timeout_secs(),
        }
    }
}

fn default_context_timeout_secs() -> u64 {
    1800
}

/// Lead store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LeadsConfig {
    /// Path to the JSON lead store file.
    #[serde(default = "default_store_path")]
    pub store_path: String,
}

impl Default for LeadsConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

fn default_store_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("trimflow").join("franchise-leads.json"))
        .unwrap_or_else(|| std::path::PathBuf::from("franchise-leads.json"))
        .to_string_lossy()
        .into_owned()
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    3000
}
