// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goal operations.

use rusqlite::{ToSql, params};
use rutina_core::{GoalQuery, RutinaError};

use crate::database::Database;
use crate::models::{self, Goal, NewGoal};

fn row_to_goal(row: &rusqlite::Row<'_>) -> Result<Goal, rusqlite::Error> {
    Ok(Goal {
        id: row.get(0)?,
        user_profile_id: row.get(1)?,
        period: models::read_period(2, row.get(2)?)?,
        text: row.get(3)?,
        created_at: models::read_ts(4, row.get(4)?)?,
    })
}

/// Inserts a goal and returns it with its assigned id.
pub async fn insert_goal(db: &Database, goal: &NewGoal) -> Result<Goal, RutinaError> {
    let goal = goal.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO goals (user_profile_id, period, text, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    goal.user_profile_id,
                    goal.period.to_string(),
                    goal.text,
                    models::format_ts(goal.created_at),
                ],
            )?;
            let id = conn.last_insert_rowid();
            Ok(Goal {
                id,
                user_profile_id: goal.user_profile_id,
                period: goal.period,
                text: goal.text,
                created_at: goal.created_at,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Lists goals matching the query, newest first, capped at `query.limit`.
///
/// The WHERE clause is assembled from the optional filters; ties on
/// `created_at` are broken by id so "newest first" means newest insert first.
pub async fn list_goals(db: &Database, query: &GoalQuery) -> Result<Vec<Goal>, RutinaError> {
    let query = query.clone();
    db.connection()
        .call(move |conn| {
            let mut sql = String::from(
                "SELECT id, user_profile_id, period, text, created_at
                 FROM goals WHERE user_profile_id = ?",
            );
            let mut values: Vec<Box<dyn ToSql>> = vec![Box::new(query.user_profile_id)];

            if let Some(since) = query.created_since {
                sql.push_str(" AND created_at >= ?");
                values.push(Box::new(models::format_ts(since)));
            }

            if let Some(periods) = &query.periods {
                let placeholders = vec!["?"; periods.len()].join(", ");
                sql.push_str(&format!(" AND period IN ({placeholders})"));
                for period in periods {
                    values.push(Box::new(period.to_string()));
                }
            }

            sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT ?");
            values.push(Box::new(query.limit));

            let params: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(&params[..], row_to_goal)?;
            let mut goals = Vec::new();
            for row in rows {
                goals.push(row?);
            }
            Ok(goals)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
