// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI provider adapter for Rutina.
//!
//! Implements the core [`RemoteClassifier`](rutina_core::RemoteClassifier)
//! and [`Transcriber`](rutina_core::Transcriber) traits over the OpenAI
//! `chat/completions` and `audio/transcriptions` endpoints. All requests
//! carry a bounded timeout; callers treat any error as "no remote result".

pub mod client;
pub mod types;

pub use client::OpenAiClient;
