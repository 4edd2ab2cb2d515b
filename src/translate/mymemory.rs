//! MyMemory community translation client.
//! One GET per request. Success is signalled by `responseStatus == 200`
//! inside the JSON body, not by the HTTP status line.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{ProviderError, TranslationProvider};
use crate::language::Language;

pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

pub struct MyMemoryProvider {
    http: reqwest::Client,
    endpoint: String,
}

impl MyMemoryProvider {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

/// `from|to` in the provider's own codes.
pub fn langpair(from: Language, to: Language) -> String {
    format!("{}|{}", from.mymemory_code(), to.mymemory_code())
}

/// Extract the translation from a response body.
/// `responseStatus` arrives as a number or, on some errors, as a string.
pub fn parse_response(body: &str) -> Result<String, ProviderError> {
    let json: Value =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;

    let status = match &json["responseStatus"] {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| ProviderError::Malformed("missing responseStatus".into()))?;

    if status != 200 {
        let detail = json["responseDetails"].as_str().unwrap_or_default().to_string();
        return Err(ProviderError::Rejected { status, detail });
    }

    let text = json["responseData"]["translatedText"]
        .as_str()
        .ok_or_else(|| ProviderError::Malformed("missing responseData.translatedText".into()))?
        .trim();
    if text.is_empty() {
        return Err(ProviderError::Empty);
    }
    Ok(text.to_string())
}

#[async_trait]
impl TranslationProvider for MyMemoryProvider {
    fn name(&self) -> &'static str {
        "mymemory"
    }

    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String, ProviderError> {
        let pair = langpair(from, to);
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("q", text), ("langpair", pair.as_str())])
            .send()
            .await?;

        let http_status = response.status();
        let body = response.text().await?;
        debug!(status = http_status.as_u16(), bytes = body.len(), "mymemory response");

        match parse_response(&body) {
            Err(ProviderError::Malformed(_)) if http_status.as_u16() == 429 => {
                Err(ProviderError::RateLimited)
            }
            Err(ProviderError::Malformed(_)) if !http_status.is_success() => {
                Err(ProviderError::Status {
                    status: http_status.as_u16(),
                })
            }
            other => other,
        }
    }
}
