//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use tick_config::GeminiConfig;

use crate::classifier::IntentClassifier;
use crate::error::ClassifierError;
use crate::http::{check_response, transport_error};
use crate::prompt::build_prompt;

/// Classifies transcripts with a Gemini model.
pub struct GeminiClassifier {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

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

impl GeminiClassifier {
    /// # Errors
    ///
    /// Returns `ClassifierError::NotConfigured` without an API key, or
    /// `ClassifierError::Http` if the HTTP client cannot be built.
    pub fn from_config(config: &GeminiConfig) -> Result<Self, ClassifierError> {
        if !config.is_configured() {
            return Err(ClassifierError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("tickler/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl IntentClassifier for GeminiClassifier {
    async fn classify(&self, transcript: &str, today: NaiveDate) -> Result<String, ClassifierError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": build_prompt(transcript, today) }] }],
            "generationConfig": { "temperature": 0 },
        });

        let resp = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let resp = check_response(resp).await?;

        let reply: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| ClassifierError::Parse(e.to_string()))?;

        let text = reply
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
            .ok_or_else(|| ClassifierError::Parse("response has no candidate text".into()))?;

        tracing::debug!(model = %self.model, reply = %text, "classifier reply");
        Ok(text.trim().to_string())
    }
}
