//! Assistant client: mood text in, display string out.
//!
//! The contract toward the session core is that `recommend` always resolves
//! to something printable.  Missing credentials, transport failures, bad
//! statuses and empty answers are logged here and turned into fixed fallback
//! lines; nothing propagates.

use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt};
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::config::AssistantConfig;

pub const FALLBACK_NO_KEY: &str = "Sorry, I can't access my brain right now to make a playlist.";
pub const FALLBACK_EMPTY: &str = "Couldn't generate a playlist at the moment.";
pub const FALLBACK_UNREACHABLE: &str =
    "I'm having trouble connecting to the musical cosmos right now.";

/// Anything that can answer a mood query.
pub trait Assistant: Send + Sync {
    fn recommend<'a>(&'a self, mood: &'a str) -> BoxFuture<'a, String>;
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("API key is missing")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("service returned no text")]
    EmptyResponse,
}

impl AssistantError {
    /// The line shown to the user in place of a recommendation.
    pub fn fallback(&self) -> &'static str {
        match self {
            Self::MissingApiKey => FALLBACK_NO_KEY,
            Self::EmptyResponse => FALLBACK_EMPTY,
            Self::Http(_) | Self::Status(_) => FALLBACK_UNREACHABLE,
        }
    }
}

pub fn build_prompt(mood: &str) -> String {
    format!(
        "You are an expert DJ for a music app called RhythmoTune.\n\
         The user is asking for: \"{}\".\n\
         Suggest 5 song titles and artists that fit this mood perfectly.\n\
         Format the output as a simple numbered list. Do not add markdown bolding.\n\
         Keep it brief and cool.",
        mood
    )
}

// ── Gemini generateContent ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let joined: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        let trimmed = joined.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

pub struct GeminiAssistant {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl GeminiAssistant {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout: {}", e);
                reqwest::Client::new()
            });
        Self {
            client,
            api_key,
            model: model.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            warn!(
                "Assistant: ${} is not set, recommendations will be unavailable",
                config.api_key_env
            );
        }
        Self::new(
            api_key,
            config.model.clone(),
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn request_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    /// One request, one response.  Errors are typed so callers can tell the
    /// failure kinds apart; `recommend` folds them into fallback text.
    pub async fn generate(&self, mood: &str) -> Result<String, AssistantError> {
        let api_key = self.api_key.as_deref().ok_or(AssistantError::MissingApiKey)?;

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": build_prompt(mood) }] }]
        });

        debug!("Assistant: POST {}", self.request_url());
        let response = self
            .client
            .post(self.request_url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AssistantError::Status(response.status()));
        }

        let data: GenerateResponse = response.json().await?;
        data.text().ok_or(AssistantError::EmptyResponse)
    }
}

impl Assistant for GeminiAssistant {
    fn recommend<'a>(&'a self, mood: &'a str) -> BoxFuture<'a, String> {
        async move {
            match self.generate(mood).await {
                Ok(text) => {
                    info!("Assistant: got {} chars for {:?}", text.len(), mood);
                    text
                }
                Err(e @ AssistantError::MissingApiKey) | Err(e @ AssistantError::EmptyResponse) => {
                    warn!("Assistant: {}", e);
                    e.fallback().to_string()
                }
                Err(e) => {
                    error!("Assistant error: {}", e);
                    e.fallback().to_string()
                }
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_raw_mood() {
        let prompt = build_prompt("upbeat gym mix");
        assert!(prompt.contains("\"upbeat gym mix\""));
        assert!(prompt.contains("RhythmoTune"));
        assert!(prompt.contains("numbered list"));
    }

    #[test]
    fn response_text_joins_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"1. A - B\n"},{"text":"2. C - D  "}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text().as_deref(), Some("1. A - B\n2. C - D"));
    }

    #[test]
    fn blank_or_missing_candidates_have_no_text() {
        for raw in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{"finishReason":"SAFETY"}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":"   "}]}}]}"#,
        ] {
            let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed.text(), None, "{}", raw);
        }
    }

    #[test]
    fn request_url_tolerates_trailing_slash() {
        let a = GeminiAssistant::new(None, "m", "http://localhost:1/", Duration::from_secs(1));
        assert_eq!(
            a.request_url(),
            "http://localhost:1/v1beta/models/m:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_resolves_to_fallback_without_request() {
        // Port 9 (discard) is never contacted: the key check happens first.
        let a = GeminiAssistant::new(None, "m", "http://127.0.0.1:9", Duration::from_secs(1));
        assert!(matches!(
            a.generate("anything").await,
            Err(AssistantError::MissingApiKey)
        ));
        assert_eq!(a.recommend("anything").await, FALLBACK_NO_KEY);
    }
}
