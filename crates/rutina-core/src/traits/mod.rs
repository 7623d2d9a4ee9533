// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! The classifier and scheduler never talk to SQLite, Telegram, or OpenAI
//! directly; they are handed these traits explicitly at construction. All
//! traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod notify;
pub mod provider;
pub mod storage;

// Re-export all traits at the traits module level for convenience.
pub use notify::Notifier;
pub use provider::{RemoteClassifier, Transcriber};
pub use storage::{GoalQuery, Storage};
