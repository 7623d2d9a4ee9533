// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Rutina diary bot.
//!
//! This crate provides the shared vocabulary (periods, record kinds, reminder
//! scopes), domain models, error type, and the collaborator traits the
//! classifier and reminder scheduler are wired against. Adapter crates
//! (storage, Telegram, OpenAI) implement the traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RutinaError;
pub use types::{
    Classification, Goal, NewGoal, NewNote, NewUserProfile, Note, PlanPeriod, RecordKind,
    ReminderLog, ReminderScope, RemoteClassification, UserProfile,
};

// Re-export collaborator traits at crate root.
pub use traits::{GoalQuery, Notifier, RemoteClassifier, Storage, Transcriber};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_period_maps_to_at_most_one_scope() {
        assert_eq!(PlanPeriod::Urgent.scope(), Some(ReminderScope::Daily));
        assert_eq!(PlanPeriod::ThroughDay.scope(), Some(ReminderScope::Daily));
        assert_eq!(PlanPeriod::Daily.scope(), Some(ReminderScope::Daily));
        assert_eq!(PlanPeriod::Weekly.scope(), Some(ReminderScope::Weekly));
        assert_eq!(PlanPeriod::Monthly.scope(), Some(ReminderScope::Monthly));
        assert_eq!(PlanPeriod::Life.scope(), None);
    }

    #[test]
    fn scope_periods_round_trip() {
        for scope in ReminderScope::ALL {
            for period in scope.periods() {
                assert_eq!(period.scope(), Some(scope));
            }
        }
    }

    #[test]
    fn rutina_error_has_all_variants() {
        let _config = RutinaError::Config("test".into());
        let _storage = RutinaError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _channel = RutinaError::Channel {
            message: "test".into(),
            source: None,
        };
        let _provider = RutinaError::Provider {
            message: "test".into(),
            source: None,
        };
        let _timeout = RutinaError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = RutinaError::Internal("test".into());
    }
}
