// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./rutina.toml` > `~/.config/rutina/rutina.toml` >
//! `/etc/rutina/rutina.toml` with environment variable overrides via the
//! `RUTINA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::RutinaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/rutina/rutina.toml` (system-wide)
/// 3. `~/.config/rutina/rutina.toml` (user XDG config)
/// 4. `./rutina.toml` (local directory)
/// 5. `RUTINA_*` environment variables
pub fn load_config() -> Result<RutinaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RutinaConfig::default()))
        .merge(Toml::file("/etc/rutina/rutina.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("rutina/rutina.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("rutina.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Useful for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<RutinaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RutinaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RutinaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RutinaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `RUTINA_TELEGRAM_BOT_TOKEN` must map to
/// `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("RUTINA_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        // Example: RUTINA_TELEGRAM_BOT_TOKEN -> "telegram_bot_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("reminder_", "reminder.", 1);
        mapped.into()
    })
}
