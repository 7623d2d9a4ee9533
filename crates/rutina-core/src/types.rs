// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared vocabulary and domain models for the Rutina diary bot.
//!
//! The period/kind/scope enums are the common language between the classifier
//! and the reminder scheduler. Wire tokens (`through_day`, `weekly`, ...) are
//! the canonical spelling used in storage, configuration, and the remote
//! classification contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Time horizon attached to a goal.
///
/// Ordering carries no meaning; membership decides which reminder scope a
/// goal feeds into (see [`PlanPeriod::scope`]). `Life` goals are never
/// reminded.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum PlanPeriod {
    Urgent,
    #[strum(serialize = "through day", to_string = "through_day")]
    ThroughDay,
    Daily,
    Weekly,
    Monthly,
    Life,
}

impl PlanPeriod {
    /// Parses a period token, accepting `through day` as well as `through_day`.
    ///
    /// Anything unrecognized is `None`, never an error -- both the remote
    /// classification result and manual `/goal` arguments go through here.
    pub fn parse(input: &str) -> Option<Self> {
        input.trim().parse().ok()
    }

    /// The reminder scope this period's goals are digested under.
    pub fn scope(self) -> Option<ReminderScope> {
        match self {
            PlanPeriod::Urgent | PlanPeriod::ThroughDay | PlanPeriod::Daily => {
                Some(ReminderScope::Daily)
            }
            PlanPeriod::Weekly => Some(ReminderScope::Weekly),
            PlanPeriod::Monthly => Some(ReminderScope::Monthly),
            PlanPeriod::Life => None,
        }
    }
}

/// What a classified message is filed as.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Goal,
    Note,
}

/// Reminder cadence bucket the scheduler evaluates per user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum ReminderScope {
    Daily,
    Weekly,
    Monthly,
}

impl ReminderScope {
    /// All scopes, in the order a tick evaluates them.
    pub const ALL: [ReminderScope; 3] = [
        ReminderScope::Daily,
        ReminderScope::Weekly,
        ReminderScope::Monthly,
    ];

    /// The plan periods whose goals appear in this scope's digest.
    pub const fn periods(self) -> &'static [PlanPeriod] {
        match self {
            ReminderScope::Daily => &[
                PlanPeriod::Urgent,
                PlanPeriod::ThroughDay,
                PlanPeriod::Daily,
            ],
            ReminderScope::Weekly => &[PlanPeriod::Weekly],
            ReminderScope::Monthly => &[PlanPeriod::Monthly],
        }
    }
}

/// Outcome of classifying one inbound message.
///
/// Invariant: `kind == Goal` always carries a period; `kind == Note` never
/// does. `text` is the normalized payload to persist (trimmed, explicit note
/// markers stripped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: RecordKind,
    pub period: Option<PlanPeriod>,
    pub text: String,
}

impl Classification {
    pub fn note(text: impl Into<String>) -> Self {
        Self {
            kind: RecordKind::Note,
            period: None,
            text: text.into(),
        }
    }

    pub fn goal(period: PlanPeriod, text: impl Into<String>) -> Self {
        Self {
            kind: RecordKind::Goal,
            period: Some(period),
            text: text.into(),
        }
    }
}

/// The JSON object a remote classification collaborator replies with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteClassification {
    #[serde(rename = "isGoal")]
    pub is_goal: bool,
    pub period: Option<String>,
    pub text: String,
}

/// A known user, keyed by their Telegram identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i64,
    pub telegram_user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating or refreshing a user profile.
#[derive(Debug, Clone)]
pub struct NewUserProfile {
    pub telegram_user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// A persisted goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    pub id: i64,
    pub user_profile_id: i64,
    pub period: PlanPeriod,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a goal.
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub user_profile_id: i64,
    pub period: PlanPeriod,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A persisted note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub user_profile_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a note.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub user_profile_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Durable record of the last digest sent for a (user, scope) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderLog {
    pub id: i64,
    pub user_profile_id: i64,
    pub scope: ReminderScope,
    pub last_sent_at: DateTime<Utc>,
}
