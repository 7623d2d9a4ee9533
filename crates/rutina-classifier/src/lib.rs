// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goal/note classification engine.
//!
//! Decides, from ambiguous free text (English or Russian, any register),
//! whether a message is a goal or a note, and for goals which time horizon it
//! belongs to. An optional remote LLM layer sits on top of a deterministic
//! keyword heuristic; the heuristic alone is a complete classifier, so the
//! bot stays fully functional offline.

pub mod heuristics;

use std::sync::Arc;

use rutina_core::{Classification, PlanPeriod, RemoteClassifier, RutinaError};
use tracing::{debug, warn};

pub use heuristics::heuristic_classify;

/// System prompt for the remote classification exchange.
const CLASSIFY_SYSTEM_PROMPT: &str = "You are a planner assistant for a diary bot. \
Classify messages into goal or note by context, including Russian text. \
If it is a goal, pick one period: urgent, through_day, daily, weekly, monthly, life. \
Infer the period from context (today, this week, monthly, etc). \
If no explicit period is present but it is clearly a goal, default to through_day. \
Return compact JSON with keys: isGoal (bool), period (string|null), text (string).";

/// Message classifier with an optional remote layer.
///
/// Stateless apart from the remote collaborator handle; safe to share.
#[derive(Clone, Default)]
pub struct Classifier {
    remote: Option<Arc<dyn RemoteClassifier>>,
}

impl Classifier {
    /// Creates a purely heuristic classifier.
    pub fn new() -> Self {
        Self { remote: None }
    }

    /// Creates a classifier that consults `remote` before the heuristics.
    pub fn with_remote(remote: Arc<dyn RemoteClassifier>) -> Self {
        Self {
            remote: Some(remote),
        }
    }

    /// Classifies one message.
    ///
    /// Never fails and never blocks unboundedly: the remote collaborator
    /// carries its own timeout, and any remote error or unusable reply falls
    /// through to [`heuristic_classify`]. Empty input is a note with empty
    /// text.
    pub async fn classify(&self, raw: &str) -> Classification {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Classification::note("");
        }

        // Explicit markers always win, even over the remote layer.
        if let Some(rest) = heuristics::strip_note_marker(trimmed) {
            return Classification::note(rest);
        }

        if let Some(remote) = &self.remote
            && let Some(result) = self.try_remote(remote.as_ref(), trimmed).await
        {
            return result;
        }

        heuristic_classify(trimmed)
    }

    /// One remote exchange; `None` means "no usable remote result".
    async fn try_remote(
        &self,
        remote: &dyn RemoteClassifier,
        input: &str,
    ) -> Option<Classification> {
        let reply = match remote.classify(CLASSIFY_SYSTEM_PROMPT, input).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "remote classification failed, falling back to heuristics");
                return None;
            }
        };

        let text = reply.text.trim();
        if text.is_empty() {
            warn!("remote classification returned empty text, falling back to heuristics");
            return None;
        }

        if reply.is_goal {
            // An unparseable or missing period on a goal defaults to the
            // implicit-goal horizon.
            let period = reply
                .period
                .as_deref()
                .and_then(PlanPeriod::parse)
                .unwrap_or(PlanPeriod::ThroughDay);
            debug!(%period, "remote classified message as goal");
            Some(Classification::goal(period, text))
        } else {
            debug!("remote classified message as note");
            Some(Classification::note(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rutina_core::{RecordKind, RemoteClassification};

    struct FixedRemote(RemoteClassification);

    #[async_trait]
    impl RemoteClassifier for FixedRemote {
        async fn classify(
            &self,
            _system_prompt: &str,
            _user_text: &str,
        ) -> Result<RemoteClassification, RutinaError> {
            Ok(self.0.clone())
        }
    }

    struct FailingRemote;

    #[async_trait]
    impl RemoteClassifier for FailingRemote {
        async fn classify(
            &self,
            _system_prompt: &str,
            _user_text: &str,
        ) -> Result<RemoteClassification, RutinaError> {
            Err(RutinaError::Provider {
                message: "boom".into(),
                source: None,
            })
        }
    }

    #[tokio::test]
    async fn empty_input_is_an_empty_note() {
        let c = Classifier::new();
        let result = c.classify("").await;
        assert_eq!(result, Classification::note(""));
        let result = c.classify("   ").await;
        assert_eq!(result, Classification::note(""));
    }

    #[tokio::test]
    async fn note_marker_wins_over_remote() {
        // Remote would call this a goal, but the explicit marker is decisive.
        let remote = Arc::new(FixedRemote(RemoteClassification {
            is_goal: true,
            period: Some("daily".into()),
            text: "buy milk".into(),
        }));
        let c = Classifier::with_remote(remote);
        let result = c.classify("note: buy milk").await;
        assert_eq!(result, Classification::note("buy milk"));
    }

    #[tokio::test]
    async fn remote_goal_result_is_accepted() {
        let remote = Arc::new(FixedRemote(RemoteClassification {
            is_goal: true,
            period: Some("weekly".into()),
            text: "finish the report".into(),
        }));
        let c = Classifier::with_remote(remote);
        let result = c.classify("gotta wrap up that report sometime").await;
        assert_eq!(
            result,
            Classification::goal(PlanPeriod::Weekly, "finish the report")
        );
    }

    #[tokio::test]
    async fn remote_goal_without_period_defaults_to_through_day() {
        let remote = Arc::new(FixedRemote(RemoteClassification {
            is_goal: true,
            period: None,
            text: "call mom".into(),
        }));
        let c = Classifier::with_remote(remote);
        let result = c.classify("call mom").await;
        assert_eq!(result.period, Some(PlanPeriod::ThroughDay));
    }

    #[tokio::test]
    async fn remote_unknown_period_token_defaults_to_through_day() {
        let remote = Arc::new(FixedRemote(RemoteClassification {
            is_goal: true,
            period: Some("someday".into()),
            text: "learn piano".into(),
        }));
        let c = Classifier::with_remote(remote);
        let result = c.classify("learn piano").await;
        assert_eq!(result.period, Some(PlanPeriod::ThroughDay));
    }

    #[tokio::test]
    async fn remote_empty_text_falls_back_to_heuristics() {
        let remote = Arc::new(FixedRemote(RemoteClassification {
            is_goal: true,
            period: Some("daily".into()),
            text: "  ".into(),
        }));
        let c = Classifier::with_remote(remote);
        let result = c.classify("нужно купить молоко").await;
        // Heuristic path: implicit goal default.
        assert_eq!(result.kind, RecordKind::Goal);
        assert_eq!(result.period, Some(PlanPeriod::ThroughDay));
        assert_eq!(result.text, "нужно купить молоко");
    }

    #[tokio::test]
    async fn remote_error_falls_back_to_heuristics() {
        let c = Classifier::with_remote(Arc::new(FailingRemote));
        let result = c.classify("weekly review of the budget").await;
        assert_eq!(result.kind, RecordKind::Goal);
        assert_eq!(result.period, Some(PlanPeriod::Weekly));
    }

    #[tokio::test]
    async fn remote_note_result_is_accepted() {
        let remote = Arc::new(FixedRemote(RemoteClassification {
            is_goal: false,
            period: None,
            text: "slept badly".into(),
        }));
        let c = Classifier::with_remote(remote);
        let result = c.classify("slept badly").await;
        assert_eq!(result, Classification::note("slept badly"));
    }
}
