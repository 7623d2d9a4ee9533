// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. Trigger *times* are deliberately not validated here: an
//! unparseable `HH:MM` falls back to the 21:00 default at scheduler startup
//! instead of failing the process.

use chrono::Weekday;

use crate::diagnostic::ConfigError;
use crate::model::RutinaConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &RutinaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.reminder.tick_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "reminder.tick_interval_secs must be at least 1".to_string(),
        });
    }

    if config.reminder.digest_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "reminder.digest_limit must be at least 1".to_string(),
        });
    }

    if config.reminder.weekly_day.parse::<Weekday>().is_err() {
        errors.push(ConfigError::Validation {
            message: format!(
                "reminder.weekly_day `{}` is not a day of the week",
                config.reminder.weekly_day
            ),
        });
    }

    if let Some(key) = &config.openai.api_key
        && key.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "openai.api_key must not be empty when set".to_string(),
        });
    }

    if config.openai.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "openai.base_url must not be empty".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
