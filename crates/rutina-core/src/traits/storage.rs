// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence collaborator trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::RutinaError;
use crate::types::{
    Goal, NewGoal, NewNote, NewUserProfile, Note, PlanPeriod, ReminderLog, ReminderScope,
    UserProfile,
};

/// Filter for listing a user's goals, newest first.
#[derive(Debug, Clone)]
pub struct GoalQuery {
    pub user_profile_id: i64,
    /// Only goals created at or after this instant.
    pub created_since: Option<DateTime<Utc>>,
    /// Only goals whose period is in this set. `None` means all periods.
    pub periods: Option<Vec<PlanPeriod>>,
    pub limit: u32,
}

/// Persistence backend for profiles, goals, notes, and reminder logs.
///
/// Implementations manage their own connection lifecycle via
/// [`initialize`](Storage::initialize) and [`close`](Storage::close).
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the backend (migrations, connection, pragmas).
    async fn initialize(&self) -> Result<(), RutinaError>;

    /// Closes the backend, flushing pending writes.
    async fn close(&self) -> Result<(), RutinaError>;

    /// Creates the profile for a Telegram user, or refreshes the stored
    /// username/name fields if it already exists. Returns the profile.
    async fn upsert_user_profile(
        &self,
        profile: &NewUserProfile,
    ) -> Result<UserProfile, RutinaError>;

    /// Lists every known user profile.
    async fn list_user_profiles(&self) -> Result<Vec<UserProfile>, RutinaError>;

    /// Inserts a goal and returns it with its assigned id.
    async fn insert_goal(&self, goal: &NewGoal) -> Result<Goal, RutinaError>;

    /// Inserts a note and returns it with its assigned id.
    async fn insert_note(&self, note: &NewNote) -> Result<Note, RutinaError>;

    /// Lists goals matching the query, newest first, capped at `query.limit`.
    async fn list_goals(&self, query: &GoalQuery) -> Result<Vec<Goal>, RutinaError>;

    /// Lists a user's notes, newest first, capped at `limit`.
    async fn list_notes(&self, user_profile_id: i64, limit: u32)
    -> Result<Vec<Note>, RutinaError>;

    /// Fetches the reminder log for a (user, scope) pair, if one exists.
    async fn get_reminder_log(
        &self,
        user_profile_id: i64,
        scope: ReminderScope,
    ) -> Result<Option<ReminderLog>, RutinaError>;

    /// Records that a digest was sent for a (user, scope) pair at `sent_at`,
    /// creating the log row on first send.
    async fn upsert_reminder_log(
        &self,
        user_profile_id: i64,
        scope: ReminderScope,
        sent_at: DateTime<Utc>,
    ) -> Result<(), RutinaError>;
}
