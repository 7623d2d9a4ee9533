// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optional remote AI collaborator traits.
//!
//! Both collaborators are best-effort: callers treat any error as "no remote
//! result" and degrade to their deterministic path. Implementations must
//! bound every request with a timeout.

use async_trait::async_trait;

use crate::error::RutinaError;
use crate::types::RemoteClassification;

/// Remote goal/note classification via an LLM endpoint.
#[async_trait]
pub trait RemoteClassifier: Send + Sync {
    /// Sends one prompt/response exchange and returns the parsed
    /// `{isGoal, period, text}` reply.
    async fn classify(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<RemoteClassification, RutinaError>;
}

/// Remote speech-to-text for inbound voice messages.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribes the given audio bytes. `Ok(None)` means the service
    /// answered but produced no text.
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        filename: &str,
    ) -> Result<Option<String>, RutinaError>;
}
