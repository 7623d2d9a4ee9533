// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory collaborator doubles shared by scheduler and end-to-end tests.
//!
//! [`MemoryStorage`] implements the full [`Storage`] trait over plain vectors,
//! and [`RecordingNotifier`] captures every digest instead of delivering it,
//! with optional per-user failure injection.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use rutina_core::{
    Goal, GoalQuery, NewGoal, NewNote, NewUserProfile, Note, Notifier, PlanPeriod, ReminderLog,
    ReminderScope, RutinaError, Storage, UserProfile,
};

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    profiles: Vec<UserProfile>,
    goals: Vec<Goal>,
    notes: Vec<Note>,
    logs: Vec<ReminderLog>,
}

impl MemoryState {
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Vector-backed [`Storage`] implementation.
#[derive(Default)]
pub struct MemoryStorage {
    state: Mutex<MemoryState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a profile directly and returns it.
    pub async fn seed_profile(&self, telegram_user_id: i64) -> UserProfile {
        let mut state = self.state.lock().await;
        let id = state.assign_id();
        let profile = UserProfile {
            id,
            telegram_user_id,
            username: None,
            first_name: None,
            last_name: None,
            created_at: Utc::now(),
        };
        state.profiles.push(profile.clone());
        profile
    }

    /// Seeds a goal with an explicit creation time and returns it.
    pub async fn seed_goal(
        &self,
        user_profile_id: i64,
        period: PlanPeriod,
        text: &str,
        created_at: DateTime<Utc>,
    ) -> Goal {
        let mut state = self.state.lock().await;
        let id = state.assign_id();
        let goal = Goal {
            id,
            user_profile_id,
            period,
            text: text.to_string(),
            created_at,
        };
        state.goals.push(goal.clone());
        goal
    }

    /// Seeds a reminder log row directly.
    pub async fn seed_reminder_log(
        &self,
        user_profile_id: i64,
        scope: ReminderScope,
        last_sent_at: DateTime<Utc>,
    ) {
        let mut state = self.state.lock().await;
        let id = state.assign_id();
        state.logs.push(ReminderLog {
            id,
            user_profile_id,
            scope,
            last_sent_at,
        });
    }

    pub async fn goals(&self) -> Vec<Goal> {
        self.state.lock().await.goals.clone()
    }

    pub async fn notes(&self) -> Vec<Note> {
        self.state.lock().await.notes.clone()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn initialize(&self) -> Result<(), RutinaError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), RutinaError> {
        Ok(())
    }

    async fn upsert_user_profile(
        &self,
        profile: &NewUserProfile,
    ) -> Result<UserProfile, RutinaError> {
        let mut state = self.state.lock().await;
        if let Some(existing) = state
            .profiles
            .iter_mut()
            .find(|p| p.telegram_user_id == profile.telegram_user_id)
        {
            existing.username = profile.username.clone();
            existing.first_name = profile.first_name.clone();
            existing.last_name = profile.last_name.clone();
            return Ok(existing.clone());
        }
        let id = state.assign_id();
        let created = UserProfile {
            id,
            telegram_user_id: profile.telegram_user_id,
            username: profile.username.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            created_at: Utc::now(),
        };
        state.profiles.push(created.clone());
        Ok(created)
    }

    async fn list_user_profiles(&self) -> Result<Vec<UserProfile>, RutinaError> {
        Ok(self.state.lock().await.profiles.clone())
    }

    async fn insert_goal(&self, goal: &NewGoal) -> Result<Goal, RutinaError> {
        let mut state = self.state.lock().await;
        let id = state.assign_id();
        let created = Goal {
            id,
            user_profile_id: goal.user_profile_id,
            period: goal.period,
            text: goal.text.clone(),
            created_at: goal.created_at,
        };
        state.goals.push(created.clone());
        Ok(created)
    }

    async fn insert_note(&self, note: &NewNote) -> Result<Note, RutinaError> {
        let mut state = self.state.lock().await;
        let id = state.assign_id();
        let created = Note {
            id,
            user_profile_id: note.user_profile_id,
            text: note.text.clone(),
            created_at: note.created_at,
        };
        state.notes.push(created.clone());
        Ok(created)
    }

    async fn list_goals(&self, query: &GoalQuery) -> Result<Vec<Goal>, RutinaError> {
        let state = self.state.lock().await;
        let mut goals: Vec<Goal> = state
            .goals
            .iter()
            .filter(|g| g.user_profile_id == query.user_profile_id)
            .filter(|g| query.created_since.is_none_or(|since| g.created_at >= since))
            .filter(|g| {
                query
                    .periods
                    .as_ref()
                    .is_none_or(|periods| periods.contains(&g.period))
            })
            .cloned()
            .collect();
        goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        goals.truncate(query.limit as usize);
        Ok(goals)
    }

    async fn list_notes(
        &self,
        user_profile_id: i64,
        limit: u32,
    ) -> Result<Vec<Note>, RutinaError> {
        let state = self.state.lock().await;
        let mut notes: Vec<Note> = state
            .notes
            .iter()
            .filter(|n| n.user_profile_id == user_profile_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notes.truncate(limit as usize);
        Ok(notes)
    }

    async fn get_reminder_log(
        &self,
        user_profile_id: i64,
        scope: ReminderScope,
    ) -> Result<Option<ReminderLog>, RutinaError> {
        let state = self.state.lock().await;
        Ok(state
            .logs
            .iter()
            .find(|l| l.user_profile_id == user_profile_id && l.scope == scope)
            .cloned())
    }

    async fn upsert_reminder_log(
        &self,
        user_profile_id: i64,
        scope: ReminderScope,
        sent_at: DateTime<Utc>,
    ) -> Result<(), RutinaError> {
        let mut state = self.state.lock().await;
        if let Some(log) = state
            .logs
            .iter_mut()
            .find(|l| l.user_profile_id == user_profile_id && l.scope == scope)
        {
            log.last_sent_at = sent_at;
            return Ok(());
        }
        let id = state.assign_id();
        state.logs.push(ReminderLog {
            id,
            user_profile_id,
            scope,
            last_sent_at: sent_at,
        });
        Ok(())
    }
}

/// Captures outbound digests; can be told to fail for specific users.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(i64, String)>>,
    fail_for: Mutex<HashSet<i64>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send() call for this user will fail until cleared.
    pub async fn fail_for(&self, telegram_user_id: i64) {
        self.fail_for.lock().await.insert(telegram_user_id);
    }

    pub async fn clear_failures(&self) {
        self.fail_for.lock().await.clear();
    }

    /// All `(telegram_user_id, text)` pairs delivered so far.
    pub async fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, telegram_user_id: i64, text: &str) -> Result<(), RutinaError> {
        if self.fail_for.lock().await.contains(&telegram_user_id) {
            return Err(RutinaError::Channel {
                message: format!("injected send failure for {telegram_user_id}"),
                source: None,
            });
        }
        self.sent
            .lock()
            .await
            .push((telegram_user_id, text.to_string()));
        Ok(())
    }
}
