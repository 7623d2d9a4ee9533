// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Note operations.

use rusqlite::params;
use rutina_core::RutinaError;

use crate::database::Database;
use crate::models::{self, NewNote, Note};

fn row_to_note(row: &rusqlite::Row<'_>) -> Result<Note, rusqlite::Error> {
    Ok(Note {
        id: row.get(0)?,
        user_profile_id: row.get(1)?,
        text: row.get(2)?,
        created_at: models::read_ts(3, row.get(3)?)?,
    })
}

/// Inserts a note and returns it with its assigned id.
pub async fn insert_note(db: &Database, note: &NewNote) -> Result<Note, RutinaError> {
    let note = note.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO notes (user_profile_id, text, created_at)
                 VALUES (?1, ?2, ?3)",
                params![
                    note.user_profile_id,
                    note.text,
                    models::format_ts(note.created_at),
                ],
            )?;
            let id = conn.last_insert_rowid();
            Ok(Note {
                id,
                user_profile_id: note.user_profile_id,
                text: note.text,
                created_at: note.created_at,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Lists a user's notes, newest first, capped at `limit`.
pub async fn list_notes(
    db: &Database,
    user_profile_id: i64,
    limit: u32,
) -> Result<Vec<Note>, RutinaError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_profile_id, text, created_at
                 FROM notes WHERE user_profile_id = ?1
                 ORDER BY created_at DESC, id DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![user_profile_id, limit], row_to_note)?;
            let mut notes = Vec::new();
            for row in rows {
                notes.push(row?);
            }
            Ok(notes)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::users::upsert_user_profile;
    use chrono::{DateTime, NaiveDate, Utc};
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
    async fn insert_and_list_round_trips() {
        let (db, user, _dir) = setup_db_with_user().await;
        let inserted = insert_note(
            &db,
            &NewNote {
                user_profile_id: user,
                text: "сегодня было солнечно".to_string(),
                created_at: dt(11, 10),
            },
        )
        .await
        .unwrap();
        assert!(inserted.id > 0);

        let notes = list_notes(&db, user, 20).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0], inserted);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_is_newest_first_with_limit() {
        let (db, user, _dir) = setup_db_with_user().await;
        for (day, text) in [(9, "oldest"), (10, "middle"), (11, "newest")] {
            insert_note(
                &db,
                &NewNote {
                    user_profile_id: user,
                    text: text.to_string(),
                    created_at: dt(day, 9),
                },
            )
            .await
            .unwrap();
        }

        let notes = list_notes(&db, user, 2).await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text, "newest");
        assert_eq!(notes[1].text, "middle");
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn empty_list_for_user_without_notes() {
        let (db, user, _dir) = setup_db_with_user().await;
        let notes = list_notes(&db, user, 20).await.unwrap();
        assert!(notes.is_empty());
        db.close().await.unwrap();
    }
}
