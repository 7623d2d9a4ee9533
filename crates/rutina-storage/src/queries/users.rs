// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User profile operations.

use chrono::Utc;
use rusqlite::params;
use rutina_core::RutinaError;

use crate::database::Database;
use crate::models::{self, NewUserProfile, UserProfile};

fn row_to_profile(row: &rusqlite::Row<'_>) -> Result<UserProfile, rusqlite::Error> {
    Ok(UserProfile {
        id: row.get(0)?,
        telegram_user_id: row.get(1)?,
        username: row.get(2)?,
        first_name: row.get(3)?,
        last_name: row.get(4)?,
        created_at: models::read_ts(5, row.get(5)?)?,
    })
}

/// Creates the profile for a Telegram user, or refreshes the stored
/// username/name fields if one already exists. Returns the current row.
pub async fn upsert_user_profile(
    db: &Database,
    profile: &NewUserProfile,
) -> Result<UserProfile, RutinaError> {
    let profile = profile.clone();
    let now = models::format_ts(Utc::now());
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO user_profiles (telegram_user_id, username, first_name, last_name, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(telegram_user_id) DO UPDATE SET
                     username = excluded.username,
                     first_name = excluded.first_name,
                     last_name = excluded.last_name",
                params![
                    profile.telegram_user_id,
                    profile.username,
                    profile.first_name,
                    profile.last_name,
                    now,
                ],
            )?;

            let mut stmt = conn.prepare(
                "SELECT id, telegram_user_id, username, first_name, last_name, created_at
                 FROM user_profiles WHERE telegram_user_id = ?1",
            )?;
            let row = stmt.query_row(params![profile.telegram_user_id], row_to_profile)?;
            Ok(row)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Lists every known user profile in creation order.
pub async fn list_user_profiles(db: &Database) -> Result<Vec<UserProfile>, RutinaError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, telegram_user_id, username, first_name, last_name, created_at
                 FROM user_profiles ORDER BY id ASC",
            )?;
            let rows = stmt.query_map([], row_to_profile)?;
            let mut profiles = Vec::new();
            for row in rows {
                profiles.push(row?);
            }
            Ok(profiles)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn make_profile(telegram_user_id: i64, username: Option<&str>) -> NewUserProfile {
        NewUserProfile {
            telegram_user_id,
            username: username.map(|s| s.to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        }
    }

    #[tokio::test]
    async fn first_upsert_creates_the_profile() {
        let (db, _dir) = setup_db().await;
        let profile = upsert_user_profile(&db, &make_profile(100, Some("alice")))
            .await
            .unwrap();
        assert!(profile.id > 0);
        assert_eq!(profile.telegram_user_id, 100);
        assert_eq!(profile.username.as_deref(), Some("alice"));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn second_upsert_refreshes_fields_and_keeps_id() {
        let (db, _dir) = setup_db().await;
        let first = upsert_user_profile(&db, &make_profile(100, Some("alice")))
            .await
            .unwrap();
        let second = upsert_user_profile(&db, &make_profile(100, Some("alice_renamed")))
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.username.as_deref(), Some("alice_renamed"));

        let all = list_user_profiles(&db).await.unwrap();
        assert_eq!(all.len(), 1);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_returns_all_profiles_in_creation_order() {
        let (db, _dir) = setup_db().await;
        upsert_user_profile(&db, &make_profile(100, Some("alice")))
            .await
            .unwrap();
        upsert_user_profile(&db, &make_profile(200, Some("bob")))
            .await
            .unwrap();

        let all = list_user_profiles(&db).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].telegram_user_id, 100);
        assert_eq!(all[1].telegram_user_id, 200);
        db.close().await.unwrap();
    }
}
