// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end flow: classify inbound messages, persist them, and run the
//! reminder scheduler against the persisted state.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use rutina_classifier::Classifier;
use rutina_config::model::StorageConfig;
use rutina_core::{
    NewGoal, NewNote, NewUserProfile, RecordKind, ReminderScope, Storage, UserProfile,
};
use rutina_reminder::{ReminderSchedule, ReminderScheduler};
use rutina_storage::SqliteStorage;
use rutina_test_utils::{MemoryStorage, RecordingNotifier};

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
        .and_utc()
}

/// Classifies a message and persists it the way the ingestion path does.
async fn ingest(
    storage: &dyn Storage,
    classifier: &Classifier,
    profile: &UserProfile,
    text: &str,
    at: DateTime<Utc>,
) {
    let classification = classifier.classify(text).await;
    match (classification.kind, classification.period) {
        (RecordKind::Goal, Some(period)) => {
            storage
                .insert_goal(&NewGoal {
                    user_profile_id: profile.id,
                    period,
                    text: classification.text,
                    created_at: at,
                })
                .await
                .unwrap();
        }
        _ => {
            storage
                .insert_note(&NewNote {
                    user_profile_id: profile.id,
                    text: classification.text,
                    created_at: at,
                })
                .await
                .unwrap();
        }
    }
}

fn new_profile(telegram_user_id: i64) -> NewUserProfile {
    NewUserProfile {
        telegram_user_id,
        username: Some("alice".into()),
        first_name: Some("Alice".into()),
        last_name: None,
    }
}

#[tokio::test]
async fn classify_persist_and_digest_in_memory() {
    let storage = Arc::new(MemoryStorage::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let classifier = Classifier::new();

    let profile = storage.upsert_user_profile(&new_profile(100)).await.unwrap();

    // Sunday morning, 2026-03-15.
    let morning = dt(2026, 3, 15, 10, 0);
    for text in [
        "нужно купить молоко",
        "weekly budget review",
        "note: отличный день",
        "the coffee place on 5th is decent",
    ] {
        ingest(storage.as_ref(), &classifier, &profile, text, morning).await;
    }

    assert_eq!(storage.goals().await.len(), 2);
    assert_eq!(storage.notes().await.len(), 2);

    let scheduler = ReminderScheduler::new(
        ReminderSchedule::default(),
        storage.clone(),
        notifier.clone(),
    );

    // Sunday evening: daily and weekly digests both fire.
    let attempts = scheduler.tick(dt(2026, 3, 15, 21, 5)).await;
    assert_eq!(attempts.len(), 2);
    assert!(attempts.iter().all(|a| a.delivered));

    let sent = notifier.sent().await;
    assert_eq!(sent.len(), 2);
    let daily = &sent[0].1;
    let weekly = &sent[1].1;
    assert!(daily.contains("нужно купить молоко"));
    assert!(!daily.contains("budget review"));
    assert!(weekly.contains("weekly budget review"));
    // Notes never show up in digests.
    assert!(!daily.contains("отличный день"));
    assert!(!weekly.contains("отличный день"));

    // Same evening, later tick: nothing new goes out.
    let attempts = scheduler.tick(dt(2026, 3, 15, 21, 35)).await;
    assert!(attempts.is_empty());
    assert_eq!(notifier.sent().await.len(), 2);
}

#[tokio::test]
async fn classify_persist_and_digest_over_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("e2e.db");
    let storage = Arc::new(SqliteStorage::new(StorageConfig {
        database_path: db_path.to_str().unwrap().to_string(),
        wal_mode: true,
    }));
    storage.initialize().await.unwrap();

    let notifier = Arc::new(RecordingNotifier::new());
    let classifier = Classifier::new();

    let profile = storage.upsert_user_profile(&new_profile(100)).await.unwrap();

    // Wednesday 2026-03-11: goals land during the day.
    ingest(
        storage.as_ref(),
        &classifier,
        &profile,
        "urgent: оплатить счет",
        dt(2026, 3, 11, 9, 0),
    )
    .await;
    ingest(
        storage.as_ref(),
        &classifier,
        &profile,
        "сегодня сходить в банк",
        dt(2026, 3, 11, 10, 0),
    )
    .await;
    ingest(
        storage.as_ref(),
        &classifier,
        &profile,
        "заметка: настроение отличное",
        dt(2026, 3, 11, 11, 0),
    )
    .await;

    let scheduler = ReminderScheduler::new(
        ReminderSchedule::default(),
        storage.clone(),
        notifier.clone(),
    );

    // Wednesday evening: one daily digest with both goals, newest first.
    let attempts = scheduler.tick(dt(2026, 3, 11, 21, 5)).await;
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].scope, ReminderScope::Daily);
    assert_eq!(attempts[0].goals, 2);

    let sent = notifier.sent().await;
    assert_eq!(sent.len(), 1);
    let message = &sent[0].1;
    assert!(message.contains("• [urgent] urgent: оплатить счет"));
    assert!(message.contains("• [through_day] сегодня сходить в банк"));
    assert!(!message.contains("настроение"));
    assert!(
        message.find("сходить в банк").unwrap() < message.find("оплатить счет").unwrap(),
        "newest goal comes first"
    );

    // The reminder log advanced; a later tick stays quiet.
    let log = storage
        .get_reminder_log(profile.id, ReminderScope::Daily)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(log.last_sent_at, dt(2026, 3, 11, 21, 5));

    let attempts = scheduler.tick(dt(2026, 3, 11, 22, 0)).await;
    assert!(attempts.is_empty());

    storage.close().await.unwrap();
}
