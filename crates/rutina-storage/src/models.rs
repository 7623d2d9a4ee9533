// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types and column conversion helpers.
//!
//! The canonical types are defined in `rutina-core::types` for use across
//! collaborator trait boundaries; this module re-exports them for
//! convenience within the storage crate, together with the timestamp and
//! enum-token conversions used by the query modules.
//!
//! Timestamps are stored as RFC3339 UTC text with millisecond precision
//! (`2026-01-01T21:00:00.000Z`), so lexicographic comparison in SQL agrees
//! with time order.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;

pub use rutina_core::types::{
    Goal, NewGoal, NewNote, NewUserProfile, Note, PlanPeriod, ReminderLog, ReminderScope,
    UserProfile,
};

/// Formats a timestamp for storage.
pub(crate) fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a stored timestamp column.
pub(crate) fn read_ts(idx: usize, value: String) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parses a stored period token column.
pub(crate) fn read_period(idx: usize, value: String) -> Result<PlanPeriod, rusqlite::Error> {
    PlanPeriod::parse(&value).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown period token `{value}`").into(),
        )
    })
}

/// Parses a stored reminder scope token column.
pub(crate) fn read_scope(idx: usize, value: String) -> Result<ReminderScope, rusqlite::Error> {
    value.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown scope token `{value}`").into(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_round_trips_with_millis() {
        let ts = DateTime::parse_from_rfc3339("2026-03-11T21:00:00.500Z")
            .unwrap()
            .with_timezone(&Utc);
        let formatted = format_ts(ts);
        assert_eq!(formatted, "2026-03-11T21:00:00.500Z");
        assert_eq!(read_ts(0, formatted).unwrap(), ts);
    }

    #[test]
    fn formatted_timestamps_compare_lexicographically() {
        let earlier = DateTime::parse_from_rfc3339("2026-03-11T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let later = DateTime::parse_from_rfc3339("2026-03-11T21:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert!(format_ts(earlier) < format_ts(later));
    }

    #[test]
    fn period_and_scope_tokens_read_back() {
        assert_eq!(
            read_period(0, "through_day".into()).unwrap(),
            PlanPeriod::ThroughDay
        );
        assert!(read_period(0, "bogus".into()).is_err());
        assert_eq!(read_scope(0, "weekly".into()).unwrap(), ReminderScope::Weekly);
        assert!(read_scope(0, "yearly".into()).is_err());
    }
}
