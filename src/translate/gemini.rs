//! Gemini completion client used as the last remote fallback.
//! Prompt-based; languages are named in English, never by code. A random
//! delay precedes every translation call to spread bursts against the quota.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use super::{ProviderError, TranslationProvider};
use crate::language::Language;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub endpoint: String,
    pub model: String,
    /// Absent or blank means the provider is unavailable.
    pub api_key: Option<String>,
    /// Upper bound of the pre-request jitter.
    pub max_jitter: Duration,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            model: DEFAULT_MODEL.into(),
            api_key: None,
            max_jitter: Duration::from_millis(500),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Outcome of the startup credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    Valid,
    Invalid,
    Missing,
}

pub struct GeminiProvider {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    max_jitter: Duration,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(2)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let api_key = config.api_key.filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            warn!("Gemini API key not configured, provider disabled");
        }

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model,
            api_key,
            max_jitter: config.max_jitter,
        })
    }

    /// Check whether the configured credential is accepted, with a minimal
    /// completion. Meant for startup, not the per-request path.
    pub async fn probe(&self) -> CredentialStatus {
        let Some(key) = self.api_key.as_deref() else {
            return CredentialStatus::Missing;
        };
        match self.generate(key, "Hello").await {
            Ok(_) => {
                info!("Gemini credential valid");
                CredentialStatus::Valid
            }
            Err(e) => {
                warn!(error = %e, "Gemini credential check failed");
                CredentialStatus::Invalid
            }
        }
    }

    async fn jitter(&self) {
        let max_ms = self.max_jitter.as_millis() as u64;
        if max_ms == 0 {
            return;
        }
        let wait = rand::thread_rng().gen_range(0..=max_ms);
        tokio::time::sleep(Duration::from_millis(wait)).await;
    }

    /// One completion request. Returns the trimmed response text.
    async fn generate(&self, key: &str, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": 0.1 }
        });

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            debug!(
                status = status.as_u16(),
                body = %body_text.chars().take(200).collect::<String>(),
                "Gemini error response"
            );
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Instruction sent to the model. The text is embedded literally.
pub fn build_prompt(text: &str, from: Language, to: Language) -> String {
    format!(
        "Translate the following text from {} to {}. Return ONLY the translated text \
         without any explanations, quotation marks, or additional commentary: \"{}\"",
        from.name(),
        to.name(),
        text
    )
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// Concatenate the first candidate's text parts. Blank output is an error.
pub fn parse_response(body: &str) -> Result<String, ProviderError> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Err(ProviderError::Empty);
    }
    Ok(text.to_string())
}

#[async_trait]
impl TranslationProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String, ProviderError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(ProviderError::Unavailable("Gemini API key not configured".into()));
        };
        self.jitter().await;
        self.generate(key, &build_prompt(text, from, to)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn config(api_key: Option<&str>) -> GeminiConfig {
        GeminiConfig {
            // Nothing listens here; any request attempt fails fast.
            endpoint: "http://127.0.0.1:9/v1".into(),
            api_key: api_key.map(str::to_string),
            max_jitter: Duration::ZERO,
            timeout: Duration::from_secs(2),
            ..GeminiConfig::default()
        }
    }

    #[test]
    fn prompt_names_languages() {
        let prompt = build_prompt("Quanto custa a canga?", Language::PtBr, Language::EsEs);
        assert!(prompt.contains("from Portuguese to Spanish"));
        assert!(prompt.contains("\"Quanto custa a canga?\""));
        assert!(!prompt.contains("pt-BR"));
    }

    #[test]
    fn parses_candidate_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"  How much is the sarong?\n"}],"role":"model"}}]}"#;
        assert_eq!(parse_response(body).unwrap(), "How much is the sarong?");
    }

    #[test]
    fn joins_multiple_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Cold "},{"text":"beer"}]}}]}"#;
        assert_eq!(parse_response(body).unwrap(), "Cold beer");
    }

    #[test]
    fn empty_or_missing_text_is_an_error() {
        assert_eq!(parse_response(r#"{"candidates":[]}"#), Err(ProviderError::Empty));
        assert_eq!(
            parse_response(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#),
            Err(ProviderError::Empty)
        );
        assert_eq!(
            parse_response(r#"{"candidates":[{"content":{"parts":[{"text":"   "}]}}]}"#),
            Err(ProviderError::Empty)
        );
        assert!(matches!(parse_response("nope"), Err(ProviderError::Malformed(_))));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let provider = GeminiProvider::new(config(Some("   "))).unwrap();
        assert!(!provider.is_available());
        let provider = GeminiProvider::new(config(Some("key"))).unwrap();
        assert!(provider.is_available());
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let provider = GeminiProvider::new(GeminiConfig {
            max_jitter: Duration::from_secs(5),
            ..config(None)
        })
        .unwrap();
        let started = Instant::now();
        let result = provider.translate("Oi", Language::PtBr, Language::EnUs).await;
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
        // No jitter was applied either.
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(provider.probe().await, CredentialStatus::Missing);
    }

    #[tokio::test]
    async fn probe_reports_invalid_when_unreachable() {
        let provider = GeminiProvider::new(config(Some("key"))).unwrap();
        assert_eq!(provider.probe().await, CredentialStatus::Invalid);
    }

    #[test]
    fn debug_masks_key() {
        let provider = GeminiProvider::new(config(Some("secret-key"))).unwrap();
        let debug_str = format!("{provider:?}");
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains("secret-key"));
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test --ignored
    async fn real_api_translation() {
        let Ok(key) = std::env::var("GEMINI_API_KEY") else {
            eprintln!("Skipping: GEMINI_API_KEY not set");
            return;
        };
        let provider = GeminiProvider::new(GeminiConfig {
            api_key: Some(key),
            ..GeminiConfig::default()
        })
        .unwrap();
        let result = provider
            .translate("Água de coco gelada", Language::PtBr, Language::EnUs)
            .await
            .unwrap();
        assert!(!result.is_empty());
    }
}
