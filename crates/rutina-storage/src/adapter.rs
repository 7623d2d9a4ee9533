// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the core `Storage` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;
use tracing::debug;

use rutina_config::model::StorageConfig;
use rutina_core::{
    Goal, GoalQuery, NewGoal, NewNote, NewUserProfile, Note, ReminderLog, ReminderScope,
    RutinaError, Storage, UserProfile,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`Storage::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`Storage::initialize`]
    /// is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, RutinaError> {
        self.db.get().ok_or_else(|| RutinaError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn initialize(&self) -> Result<(), RutinaError> {
        let db =
            Database::open_with_options(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| RutinaError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), RutinaError> {
        self.db()?.close().await
    }

    async fn upsert_user_profile(
        &self,
        profile: &NewUserProfile,
    ) -> Result<UserProfile, RutinaError> {
        queries::users::upsert_user_profile(self.db()?, profile).await
    }

    async fn list_user_profiles(&self) -> Result<Vec<UserProfile>, RutinaError> {
        queries::users::list_user_profiles(self.db()?).await
    }

    async fn insert_goal(&self, goal: &NewGoal) -> Result<Goal, RutinaError> {
        queries::goals::insert_goal(self.db()?, goal).await
    }

    async fn insert_note(&self, note: &NewNote) -> Result<Note, RutinaError> {
        queries::notes::insert_note(self.db()?, note).await
    }

    async fn list_goals(&self, query: &GoalQuery) -> Result<Vec<Goal>, RutinaError> {
        queries::goals::list_goals(self.db()?, query).await
    }

    async fn list_notes(
        &self,
        user_profile_id: i64,
        limit: u32,
    ) -> Result<Vec<Note>, RutinaError> {
        queries::notes::list_notes(self.db()?, user_profile_id, limit).await
    }

    async fn get_reminder_log(
        &self,
        user_profile_id: i64,
        scope: ReminderScope,
    ) -> Result<Option<ReminderLog>, RutinaError> {
        queries::reminder_logs::get_reminder_log(self.db()?, user_profile_id, scope).await
    }

    async fn upsert_reminder_log(
        &self,
        user_profile_id: i64,
        scope: ReminderScope,
        sent_at: DateTime<Utc>,
    ) -> Result<(), RutinaError> {
        queries::reminder_logs::upsert_reminder_log(self.db()?, user_profile_id, scope, sent_at)
            .await
    }
}
