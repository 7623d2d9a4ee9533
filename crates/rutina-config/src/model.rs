// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Rutina diary bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Rutina configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RutinaConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Telegram bot integration settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// OpenAI API settings for remote classification and transcription.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Reminder scheduler settings.
    #[serde(default)]
    pub reminder: ReminderConfig,
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
    "rutina".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. `None` disables the Telegram channel.
    #[serde(default)]
    pub bot_token: Option<String>,
}

/// OpenAI API configuration.
///
/// An absent `api_key` disables both remote classification and voice
/// transcription; the bot then runs entirely on keyword heuristics.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// OpenAI API key. `None` disables the remote layer entirely.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat model used for classification.
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// Model used for voice transcription.
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,

    /// API base URL, overridable for proxies and tests.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_openai_model(),
            transcription_model: default_transcription_model(),
            base_url: default_openai_base_url(),
        }
    }
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("rutina").join("rutina.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("rutina.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Reminder scheduler configuration.
///
/// Trigger times are `HH:MM` wall-clock strings; an unparseable value falls
/// back to 21:00 with a warning rather than failing startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReminderConfig {
    /// Daily digest trigger time.
    #[serde(default = "default_trigger_time")]
    pub daily_time: String,

    /// Weekly digest trigger time.
    #[serde(default = "default_trigger_time")]
    pub weekly_time: String,

    /// Monthly digest trigger time.
    #[serde(default = "default_trigger_time")]
    pub monthly_time: String,

    /// Day of week the weekly digest fires on.
    #[serde(default = "default_weekly_day")]
    pub weekly_day: String,

    /// Scheduler tick interval in seconds.
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,

    /// Maximum number of goals per digest.
    #[serde(default = "default_digest_limit")]
    pub digest_limit: u32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            daily_time: default_trigger_time(),
            weekly_time: default_trigger_time(),
            monthly_time: default_trigger_time(),
            weekly_day: default_weekly_day(),
            tick_interval_secs: default_tick_interval_secs(),
            digest_limit: default_digest_limit(),
        }
    }
}

fn default_trigger_time() -> String {
    "21:00".to_string()
}

fn default_weekly_day() -> String {
    "sunday".to_string()
}

fn default_tick_interval_secs() -> u64 {
    60
}

fn default_digest_limit() -> u32 {
    20
}
