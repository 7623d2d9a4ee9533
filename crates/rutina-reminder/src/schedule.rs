// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trigger times, due checks, and period boundary math.
//!
//! All math runs on `DateTime<Utc>`: UTC is the bot's wall clock. Dedup in
//! the scheduler compares against explicit period starts rather than "did we
//! send today", so a tick that runs late still infers correctly whether the
//! current period already had a send.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use rutina_config::model::ReminderConfig;
use rutina_core::ReminderScope;
use tracing::warn;

/// Fallback trigger time when a configured `HH:MM` does not parse.
const DEFAULT_TRIGGER: NaiveTime = match NaiveTime::from_hms_opt(21, 0, 0) {
    Some(t) => t,
    None => NaiveTime::MIN,
};

/// Resolved reminder schedule, immutable after startup.
#[derive(Debug, Clone)]
pub struct ReminderSchedule {
    pub daily_time: NaiveTime,
    pub weekly_time: NaiveTime,
    pub monthly_time: NaiveTime,
    /// Day the weekly digest fires on.
    pub weekly_day: Weekday,
    /// Day the weekly *period* starts on. The Sunday digest covers the week
    /// begun the previous Monday.
    pub week_start: Weekday,
    pub tick_interval: std::time::Duration,
    pub digest_limit: u32,
}

impl Default for ReminderSchedule {
    fn default() -> Self {
        Self {
            daily_time: DEFAULT_TRIGGER,
            weekly_time: DEFAULT_TRIGGER,
            monthly_time: DEFAULT_TRIGGER,
            weekly_day: Weekday::Sun,
            week_start: Weekday::Mon,
            tick_interval: std::time::Duration::from_secs(60),
            digest_limit: 20,
        }
    }
}

impl ReminderSchedule {
    /// Resolves a schedule from raw configuration strings.
    ///
    /// Malformed trigger times and weekdays fall back to their defaults with
    /// a warning rather than failing startup.
    pub fn from_config(config: &ReminderConfig) -> Self {
        let weekly_day = config.weekly_day.parse().unwrap_or_else(|_| {
            warn!(
                value = config.weekly_day.as_str(),
                "unparseable reminder.weekly_day, falling back to sunday"
            );
            Weekday::Sun
        });

        Self {
            daily_time: parse_trigger_time("reminder.daily_time", &config.daily_time),
            weekly_time: parse_trigger_time("reminder.weekly_time", &config.weekly_time),
            monthly_time: parse_trigger_time("reminder.monthly_time", &config.monthly_time),
            weekly_day,
            week_start: Weekday::Mon,
            tick_interval: std::time::Duration::from_secs(config.tick_interval_secs),
            digest_limit: config.digest_limit,
        }
    }

    /// The configured wall-clock trigger for a scope.
    pub fn trigger_time(&self, scope: ReminderScope) -> NaiveTime {
        match scope {
            ReminderScope::Daily => self.daily_time,
            ReminderScope::Weekly => self.weekly_time,
            ReminderScope::Monthly => self.monthly_time,
        }
    }

    /// Whether a scope is candidate-due at `now`.
    ///
    /// Due means `now` is at or past today's trigger time, and the calendar
    /// gate for the scope holds: weekly only on the configured weekday,
    /// monthly only on the last day of the month.
    pub fn is_due(&self, scope: ReminderScope, now: DateTime<Utc>) -> bool {
        let scheduled = now
            .date_naive()
            .and_time(self.trigger_time(scope))
            .and_utc();
        if now < scheduled {
            return false;
        }

        match scope {
            ReminderScope::Daily => true,
            ReminderScope::Weekly => now.weekday() == self.weekly_day,
            ReminderScope::Monthly => now.day() == last_day_of_month(now),
        }
    }

    /// The start of the period instance `now` falls in.
    pub fn period_start(&self, scope: ReminderScope, now: DateTime<Utc>) -> DateTime<Utc> {
        match scope {
            ReminderScope::Daily => start_of_day(now),
            ReminderScope::Weekly => start_of_week(now, self.week_start),
            ReminderScope::Monthly => start_of_month(now),
        }
    }
}

/// Parses an `HH:MM` (or `HH:MM:SS`) trigger time, falling back to 21:00.
fn parse_trigger_time(key: &str, value: &str) -> NaiveTime {
    for format in ["%H:%M", "%H:%M:%S"] {
        if let Ok(time) = NaiveTime::parse_from_str(value.trim(), format) {
            return time;
        }
    }
    warn!(key, value, "unparseable trigger time, falling back to 21:00");
    DEFAULT_TRIGGER
}

/// Midnight at the start of `now`'s date.
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Midnight of the most recent `week_start` day (inclusive).
pub fn start_of_week(now: DateTime<Utc>, week_start: Weekday) -> DateTime<Utc> {
    let diff = (7 + now.weekday().num_days_from_monday() as i64
        - week_start.num_days_from_monday() as i64)
        % 7;
    start_of_day(now) - Duration::days(diff)
}

/// Midnight of the first day of `now`'s month.
pub fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    let date = now.date_naive();
    date.with_day(1)
        .unwrap_or(date)
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// The day-of-month number of the last day of `now`'s month.
pub fn last_day_of_month(now: DateTime<Utc>) -> u32 {
    let date = now.date_naive();
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}
