// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `rutina serve` command implementation.
//!
//! Wires the SQLite storage, the optional OpenAI remote layer, the Telegram
//! channel, and the reminder scheduler, then runs until ctrl-c. Shutdown is
//! cooperative: the scheduler stops between ticks, the poller between
//! updates, and storage is checkpointed last.

use std::sync::Arc;

use rutina_classifier::Classifier;
use rutina_config::RutinaConfig;
use rutina_core::{Notifier, RemoteClassifier, RutinaError, Storage, Transcriber};
use rutina_openai::OpenAiClient;
use rutina_reminder::{ReminderSchedule, ReminderScheduler};
use rutina_storage::SqliteStorage;
use rutina_telegram::{BotService, TelegramNotifier};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs the `rutina serve` command.
pub async fn run_serve(config: RutinaConfig) -> Result<(), RutinaError> {
    init_tracing(&config.agent.log_level);
    info!(name = config.agent.name.as_str(), "starting rutina serve");

    // Storage.
    let storage: Arc<dyn Storage> = {
        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;
        Arc::new(storage)
    };

    // Optional remote layer: one client serves both classification and
    // transcription.
    let (classifier, transcriber) = match OpenAiClient::from_config(&config.openai)? {
        Some(client) => {
            info!(model = client.model(), "remote classification enabled");
            let client = Arc::new(client);
            let remote: Arc<dyn RemoteClassifier> = client.clone();
            let transcriber: Arc<dyn Transcriber> = client;
            (Classifier::with_remote(remote), Some(transcriber))
        }
        None => {
            info!("no OpenAI key configured, running on heuristics alone");
            (Classifier::new(), None)
        }
    };

    // Telegram channel: ingestion service plus digest notifier.
    let bot_service = BotService::new(&config.telegram, storage.clone(), classifier, transcriber)?;
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(bot_service.bot().clone()));

    // Reminder scheduler.
    let schedule = ReminderSchedule::from_config(&config.reminder);
    let scheduler = ReminderScheduler::new(schedule, storage.clone(), notifier);

    let cancel = CancellationToken::new();

    let reminder_task = {
        let cancel = cancel.clone();
        tokio::spawn(async move { scheduler.run(cancel).await })
    };
    let bot_task = tokio::spawn(bot_service.dispatch());

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| RutinaError::Internal(format!("failed to listen for ctrl-c: {e}")))?;
    info!("ctrl-c received, shutting down");

    // The scheduler observes the token and exits between ticks.
    cancel.cancel();
    let _ = reminder_task.await;

    // Long polling has no cooperative stop; abort between updates.
    bot_task.abort();
    let _ = bot_task.await;

    storage.close().await?;
    info!("rutina stopped");
    Ok(())
}

/// Initializes the tracing subscriber from `agent.log_level`, with
/// `RUST_LOG` taking precedence when set.
fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
