// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder scheduler for the Rutina diary bot.
//!
//! The [`ReminderScheduler`] runs a single timer-driven loop. Once per tick
//! it evaluates every known user against the daily/weekly/monthly scopes,
//! decides whether each scope's digest is due, loads the outstanding goals
//! for the period, sends the digest, and records the send in the reminder
//! log. Dedup compares the log against the explicit period start, so at most
//! one digest goes out per (user, scope, period) even across restarts and
//! missed ticks.

pub mod digest;
pub mod schedule;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rutina_core::{GoalQuery, Notifier, ReminderScope, RutinaError, Storage, UserProfile};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub use schedule::ReminderSchedule;

/// Outcome of one attempted digest delivery during a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendAttempt {
    pub telegram_user_id: i64,
    pub scope: ReminderScope,
    /// Number of goals in the composed digest.
    pub goals: usize,
    /// Whether the notifier accepted the message. Undelivered digests are
    /// retried naturally on a later tick since the log was not advanced.
    pub delivered: bool,
}

/// Timer-driven reminder loop over storage and notification collaborators.
///
/// Holds no mutable state: the schedule is immutable after startup and all
/// durable state lives in the storage collaborator.
pub struct ReminderScheduler {
    schedule: ReminderSchedule,
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
}

impl ReminderScheduler {
    pub fn new(
        schedule: ReminderSchedule,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            schedule,
            storage,
            notifier,
        }
    }

    /// Runs the scheduler until the cancellation token is triggered.
    ///
    /// Ticks never overlap: each tick is awaited to completion before the
    /// next interval fires, and cancellation is observed between ticks only,
    /// never mid-tick.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.schedule.tick_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        info!(
            interval_secs = self.schedule.tick_interval.as_secs(),
            "reminder loop running"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let attempts = self.tick(Utc::now()).await;
                    let delivered = attempts.iter().filter(|a| a.delivered).count();
                    if delivered > 0 {
                        info!(delivered, "reminder tick complete");
                    }
                }
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping reminder loop");
                    break;
                }
            }
        }
    }

    /// Evaluates every (user, scope) pair once and returns the attempted
    /// sends. Failures for one pair are logged and do not abort the rest.
    pub async fn tick(&self, now: DateTime<Utc>) -> Vec<SendAttempt> {
        let profiles = match self.storage.list_user_profiles().await {
            Ok(profiles) => profiles,
            Err(e) => {
                error!(error = %e, "failed to list user profiles, skipping tick");
                return Vec::new();
            }
        };

        let mut attempts = Vec::new();
        for profile in &profiles {
            // Sequential per user: goal/log writes for the same user are
            // never in flight concurrently.
            for scope in ReminderScope::ALL {
                match self.process_scope(profile, scope, now).await {
                    Ok(Some(attempt)) => attempts.push(attempt),
                    Ok(None) => {}
                    Err(e) => {
                        warn!(
                            user = profile.telegram_user_id,
                            %scope,
                            error = %e,
                            "reminder processing failed for this scope"
                        );
                    }
                }
            }
        }
        attempts
    }

    /// One (user, scope) evaluation: due check, dedup, content selection,
    /// compose, send, record.
    async fn process_scope(
        &self,
        profile: &UserProfile,
        scope: ReminderScope,
        now: DateTime<Utc>,
    ) -> Result<Option<SendAttempt>, RutinaError> {
        if !self.schedule.is_due(scope, now) {
            return Ok(None);
        }

        let period_start = self.schedule.period_start(scope, now);

        if let Some(log) = self.storage.get_reminder_log(profile.id, scope).await?
            && log.last_sent_at >= period_start
        {
            debug!(
                user = profile.telegram_user_id,
                %scope,
                "digest already sent this period"
            );
            return Ok(None);
        }

        let goals = self
            .storage
            .list_goals(&GoalQuery {
                user_profile_id: profile.id,
                created_since: Some(period_start),
                periods: Some(scope.periods().to_vec()),
                limit: self.schedule.digest_limit,
            })
            .await?;

        if goals.is_empty() {
            // An empty period must not consume the dedup slot: a goal added
            // later in the same period still gets its digest.
            debug!(user = profile.telegram_user_id, %scope, "no goals this period");
            return Ok(None);
        }

        let message = digest::compose_digest(scope, &goals);

        if let Err(e) = self.notifier.send(profile.telegram_user_id, &message).await {
            warn!(
                user = profile.telegram_user_id,
                %scope,
                error = %e,
                "digest delivery failed, will retry next tick"
            );
            return Ok(Some(SendAttempt {
                telegram_user_id: profile.telegram_user_id,
                scope,
                goals: goals.len(),
                delivered: false,
            }));
        }

        // Send, then record: a crash in between means a duplicate digest on
        // the next tick, never a silently lost one.
        if let Err(e) = self
            .storage
            .upsert_reminder_log(profile.id, scope, now)
            .await
        {
            warn!(
                user = profile.telegram_user_id,
                %scope,
                error = %e,
                "digest sent but reminder log update failed"
            );
        }

        info!(
            user = profile.telegram_user_id,
            %scope,
            goals = goals.len(),
            "reminder digest sent"
        );

        Ok(Some(SendAttempt {
            telegram_user_id: profile.telegram_user_id,
            scope,
            goals: goals.len(),
            delivered: true,
        }))
    }
}
