// SPDX-FileCopyrightText: 2026 Rutina Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI API.
//!
//! Provides [`OpenAiClient`] which handles request construction,
//! authentication, and response parsing for classification and voice
//! transcription. Requests are bounded by a 30 second timeout so a slow
//! endpoint can never stall message ingestion.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use rutina_config::model::OpenAiConfig;
use rutina_core::{RemoteClassification, RemoteClassifier, RutinaError, Transcriber};
use tracing::{debug, warn};

use crate::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatResponseFormat,
    TranscriptionResponse,
};

/// Request timeout for both endpoints.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for OpenAI API communication.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    model: String,
    transcription_model: String,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a client from configuration.
    ///
    /// Returns `None` when no API key is configured: the remote layer is
    /// disabled entirely and callers run on heuristics alone.
    pub fn from_config(config: &OpenAiConfig) -> Result<Option<Self>, RutinaError> {
        let Some(api_key) = config.api_key.as_deref() else {
            return Ok(None);
        };
        Ok(Some(Self::new(
            api_key,
            &config.model,
            &config.transcription_model,
            &config.base_url,
        )?))
    }

    /// Creates an OpenAI API client.
    pub fn new(
        api_key: &str,
        model: &str,
        transcription_model: &str,
        base_url: &str,
    ) -> Result<Self, RutinaError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| RutinaError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RutinaError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model: model.to_string(),
            transcription_model: transcription_model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the configured chat model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl RemoteClassifier for OpenAiClient {
    async fn classify(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<RemoteClassification, RutinaError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_text),
            ],
            response_format: ChatResponseFormat::json_object(),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| RutinaError::Provider {
                message: format!("classification request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "OpenAI classification failed");
            return Err(RutinaError::Provider {
                message: format!("classification API returned {status}: {body}"),
                source: None,
            });
        }

        let payload: ChatCompletionResponse =
            response.json().await.map_err(|e| RutinaError::Provider {
                message: format!("failed to parse classification response: {e}"),
                source: Some(Box::new(e)),
            })?;

        let content = payload
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .ok_or_else(|| RutinaError::Provider {
                message: "classification response carried no content".into(),
                source: None,
            })?;

        debug!(len = content.len(), "classification reply received");

        serde_json::from_str(content).map_err(|e| RutinaError::Provider {
            message: format!("classification reply is not the expected JSON object: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl Transcriber for OpenAiClient {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        filename: &str,
    ) -> Result<Option<String>, RutinaError> {
        let part = reqwest::multipart::Part::bytes(audio)
            .file_name(filename.to_string())
            .mime_str("audio/ogg")
            .map_err(|e| RutinaError::Provider {
                message: format!("failed to build audio part: {e}"),
                source: Some(Box::new(e)),
            })?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.transcription_model.clone());

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| RutinaError::Provider {
                message: format!("transcription request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "OpenAI transcription failed");
            return Err(RutinaError::Provider {
                message: format!("transcription API returned {status}: {body}"),
                source: None,
            });
        }

        let payload: TranscriptionResponse =
            response.json().await.map_err(|e| RutinaError::Provider {
                message: format!("failed to parse transcription response: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(payload
            .text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }
}
