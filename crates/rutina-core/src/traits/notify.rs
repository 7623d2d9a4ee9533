// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification collaborator trait.

use async_trait::async_trait;

use crate::error::RutinaError;

/// Delivers a message to a user on their messaging platform.
///
/// Failure must surface so the scheduler can skip advancing the reminder log
/// and retry the digest on a later tick.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `text` to the user identified by their external platform id.
    async fn send(&self, telegram_user_id: i64, text: &str) -> Result<(), RutinaError>;
}
