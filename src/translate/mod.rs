//! Translation resolution: cache, phrase dictionary, remote providers and
//! the policy that chains them.

pub mod cache;
pub mod engine;
pub mod gemini;
pub mod mymemory;
mod phrase_data;
pub mod phrases;
pub mod store;

use std::fmt;

use async_trait::async_trait;

use crate::language::Language;

pub use cache::{CacheStats, TranslationCache};
pub use engine::{Resolution, TranslationEngine};
pub use phrases::PhraseDictionary;

/// A remote translation backend. The engine walks an ordered list of these.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Short identifier used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Structural availability (e.g. a credential is configured). An
    /// unavailable provider is skipped without being called.
    fn is_available(&self) -> bool {
        true
    }

    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String, ProviderError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// No credential configured. Never sent over the wire.
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    #[error("rate limited")]
    RateLimited,
    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },
    /// The body was well-formed but reported failure.
    #[error("provider rejected request with status {status}: {detail}")]
    Rejected { status: i64, detail: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("empty translation")]
    Empty,
}

impl ProviderError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ProviderError::Unavailable(_))
    }

    pub fn degraded_reason(&self) -> DegradedReason {
        match self {
            ProviderError::Transport(_) | ProviderError::Timeout => DegradedReason::Connection,
            ProviderError::RateLimited => DegradedReason::Quota,
            ProviderError::Status { status: 429 } => DegradedReason::Quota,
            // MyMemory reports its daily quota inside the body.
            ProviderError::Rejected { status: 429, .. } => DegradedReason::Quota,
            _ => DegradedReason::Other,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else if e.is_decode() {
            ProviderError::Malformed(e.to_string())
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}

/// Which fixed message a degraded resolution shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradedReason {
    Connection,
    Quota,
    Other,
}

/// User-facing text returned when every stage failed. Written in the
/// language the reader expected the translation in.
pub fn degraded_message(lang: Language, reason: DegradedReason) -> &'static str {
    use DegradedReason::*;
    match (lang, reason) {
        (Language::PtBr, Connection) => "Erro de conexão.",
        (Language::PtBr, Quota) => "Limite atingido. Tente mais tarde.",
        (Language::PtBr, Other) => "Erro na tradução.",
        (Language::EnUs, Connection) => "Connection error.",
        (Language::EnUs, Quota) => "Limit reached. Try again later.",
        (Language::EnUs, Other) => "Translation error.",
        (Language::EsEs, Connection) => "Error de conexión.",
        (Language::EsEs, Quota) => "Límite alcanzado. Inténtalo más tarde.",
        (Language::EsEs, Other) => "Error en la traducción.",
    }
}

/// Where in the chain a resolution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// `from == to` or blank input; no layer touched.
    Passthrough,
    Cache,
    Dictionary,
    Provider(&'static str),
    Degraded,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Passthrough => write!(f, "passthrough"),
            Stage::Cache => write!(f, "cache"),
            Stage::Dictionary => write!(f, "dictionary"),
            Stage::Provider(name) => write!(f, "provider:{name}"),
            Stage::Degraded => write!(f, "degraded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_reason_classification() {
        assert_eq!(ProviderError::Timeout.degraded_reason(), DegradedReason::Connection);
        assert_eq!(
            ProviderError::Transport("dns".into()).degraded_reason(),
            DegradedReason::Connection
        );
        assert_eq!(ProviderError::Status { status: 429 }.degraded_reason(), DegradedReason::Quota);
        assert_eq!(
            ProviderError::Rejected { status: 429, detail: "quota".into() }.degraded_reason(),
            DegradedReason::Quota
        );
        assert_eq!(
            ProviderError::Rejected { status: 403, detail: "bad pair".into() }.degraded_reason(),
            DegradedReason::Other
        );
        assert_eq!(ProviderError::Empty.degraded_reason(), DegradedReason::Other);
        assert_eq!(
            ProviderError::Unavailable("no key".into()).degraded_reason(),
            DegradedReason::Other
        );
    }

    #[test]
    fn degraded_messages_follow_language() {
        assert_eq!(degraded_message(Language::PtBr, DegradedReason::Other), "Erro na tradução.");
        assert_eq!(degraded_message(Language::EnUs, DegradedReason::Connection), "Connection error.");
        assert!(degraded_message(Language::EsEs, DegradedReason::Quota).starts_with("Límite"));
    }

    #[test]
    fn stage_display() {
        assert_eq!(Stage::Provider("mymemory").to_string(), "provider:mymemory");
        assert_eq!(Stage::Cache.to_string(), "cache");
    }
}
