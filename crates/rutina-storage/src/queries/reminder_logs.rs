// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reminder log operations.
//!
//! One row per (user, scope) pair, created lazily on the first send and
//! updated in place afterwards.

use chrono::{DateTime, Utc};
use rusqlite::params;
use rutina_core::{ReminderScope, RutinaError};

use crate::database::Database;
use crate::models::{self, ReminderLog};

fn row_to_log(row: &rusqlite::Row<'_>) -> Result<ReminderLog, rusqlite::Error> {
    Ok(ReminderLog {
        id: row.get(0)?,
        user_profile_id: row.get(1)?,
        scope: models::read_scope(2, row.get(2)?)?,
        last_sent_at: models::read_ts(3, row.get(3)?)?,
    })
}

/// Fetches the reminder log for a (user, scope) pair, if one exists.
pub async fn get_reminder_log(
    db: &Database,
    user_profile_id: i64,
    scope: ReminderScope,
) -> Result<Option<ReminderLog>, RutinaError> {
    let scope_token = scope.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_profile_id, scope, last_sent_at
                 FROM reminder_logs WHERE user_profile_id = ?1 AND scope = ?2",
            )?;
            let result = stmt.query_row(params![user_profile_id, scope_token], row_to_log);
            match result {
                Ok(log) => Ok(Some(log)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Records a digest send, creating the log row on first send per pair.
pub async fn upsert_reminder_log(
    db: &Database,
    user_profile_id: i64,
    scope: ReminderScope,
    sent_at: DateTime<Utc>,
) -> Result<(), RutinaError> {
    let scope_token = scope.to_string();
    let sent_at = models::format_ts(sent_at);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO reminder_logs (user_profile_id, scope, last_sent_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(user_profile_id, scope) DO UPDATE SET
                     last_sent_at = excluded.last_sent_at",
                params![user_profile_id, scope_token, sent_at],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::users::upsert_user_profile;
    use chrono::{NaiveDate, Utc};
    use rutina_core::NewUserProfile;
    use tempfile::tempdir;

    fn dt(d: u32, h: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2026, 3, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
            .and_utc()
    }

    async fn setup_db_with_user() -> (Database, i64, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        let profile = upsert_user_profile(
            &db,
            &NewUserProfile {
                telegram_user_id: 100,
                username: None,
                first_name: None,
                last_name: None,
            },
        )
        .await
        .unwrap();
        (db, profile.id, dir)
    }

    #[tokio::test]
    async fn missing_log_reads_as_none() {
        let (db, user, _dir) = setup_db_with_user().await;
        let log = get_reminder_log(&db, user, ReminderScope::Daily).await.unwrap();
        assert!(log.is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn upsert_creates_then_updates_in_place() {
        let (db, user, _dir) = setup_db_with_user().await;

        upsert_reminder_log(&db, user, ReminderScope::Daily, dt(10, 21))
            .await
            .unwrap();
        let first = get_reminder_log(&db, user, ReminderScope::Daily)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.last_sent_at, dt(10, 21));

        upsert_reminder_log(&db, user, ReminderScope::Daily, dt(11, 21))
            .await
            .unwrap();
        let second = get_reminder_log(&db, user, ReminderScope::Daily)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.id, first.id, "row is updated, not duplicated");
        assert_eq!(second.last_sent_at, dt(11, 21));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn scopes_are_tracked_independently() {
        let (db, user, _dir) = setup_db_with_user().await;
        upsert_reminder_log(&db, user, ReminderScope::Daily, dt(11, 21))
            .await
            .unwrap();

        assert!(get_reminder_log(&db, user, ReminderScope::Weekly)
            .await
            .unwrap()
            .is_none());
        assert!(get_reminder_log(&db, user, ReminderScope::Monthly)
            .await
            .unwrap()
            .is_none());
        db.close().await.unwrap();
    }
}
