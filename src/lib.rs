//! Bitssun: conversational translator for street vendors.
//! Library root: component wiring, tracing setup, shared helpers.

pub mod config;
pub mod conversation;
pub mod language;
pub mod metrics;
pub mod translate;

use std::sync::Arc;

use tracing::{info, warn};

use config::{AppConfig, ProviderKind};
use metrics::MetricsRegistry;
use translate::gemini::{CredentialStatus, GeminiProvider};
use translate::mymemory::MyMemoryProvider;
use translate::store::{MemorySlotStore, SlotStore, SqliteSlotStore};
use translate::{PhraseDictionary, ProviderError, TranslationCache, TranslationEngine, TranslationProvider};

/// Current wall-clock time in unix milliseconds.
pub fn now_unix_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Install the global subscriber on stderr. `RUST_LOG` overrides the
/// default filter.
pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bitssun=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    // A second call keeps the first subscriber.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Wired components shared by every front end.
pub struct App {
    pub config: AppConfig,
    pub engine: Arc<TranslationEngine>,
    pub metrics: Arc<MetricsRegistry>,
    gemini: Option<Arc<GeminiProvider>>,
}

impl App {
    /// Build every component from `config`. Storage and phrase-file problems
    /// are logged and degrade to in-memory or built-in defaults.
    pub fn build(config: AppConfig) -> Result<Self, ProviderError> {
        let metrics = Arc::new(MetricsRegistry::new());

        let store: Arc<dyn SlotStore> = match SqliteSlotStore::open(&config.cache_path) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!(error = %e, path = %config.cache_path.display(), "cache store unavailable, using memory only");
                Arc::new(MemorySlotStore::new())
            }
        };
        let cache = Arc::new(TranslationCache::open(store, config.cache_ttl()));

        let dictionary = match &config.phrase_overlay_path {
            Some(path) => PhraseDictionary::with_overlay_file(path).unwrap_or_else(|e| {
                warn!(error = %e, "phrase overlay load failed, using built-in phrases");
                PhraseDictionary::builtin()
            }),
            None => PhraseDictionary::builtin(),
        };

        let mut gemini = None;
        let mut providers: Vec<Arc<dyn TranslationProvider>> = Vec::new();
        for kind in &config.providers {
            match kind {
                ProviderKind::MyMemory => {
                    providers.push(Arc::new(MyMemoryProvider::new(
                        config.mymemory_endpoint.clone(),
                        config.mymemory_timeout(),
                    )?));
                }
                ProviderKind::Gemini => {
                    let provider = Arc::new(GeminiProvider::new(config.gemini())?);
                    gemini = Some(Arc::clone(&provider));
                    providers.push(provider);
                }
            }
        }

        let engine = Arc::new(TranslationEngine::new(
            cache,
            Arc::new(dictionary),
            providers,
            Arc::clone(&metrics),
        ));
        info!(providers = ?engine.provider_names(), "translation engine ready");

        Ok(Self {
            config,
            engine,
            metrics,
            gemini,
        })
    }

    /// Startup credential check for the model provider.
    pub async fn probe_credentials(&self) -> CredentialStatus {
        match &self.gemini {
            Some(gemini) => gemini.probe().await,
            None => CredentialStatus::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use std::path::PathBuf;

    fn offline_config(dir: &tempfile::TempDir) -> AppConfig {
        AppConfig {
            cache_path: dir.path().join("cache.db"),
            providers: Vec::new(),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn cache_survives_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        {
            let app = App::build(offline_config(&dir)).unwrap();
            assert_eq!(app.engine.resolve("Obrigado", Language::PtBr, Language::EnUs).await, "Thank you");
        }
        let app = App::build(offline_config(&dir)).unwrap();
        assert_eq!(app.engine.cache_stats().size, 1);
        // Served from the cache even though the dictionary is case-sensitive.
        assert_eq!(app.engine.resolve("OBRIGADO", Language::PtBr, Language::EnUs).await, "Thank you");
    }

    #[tokio::test]
    async fn unopenable_store_falls_back_to_memory() {
        let config = AppConfig {
            cache_path: PathBuf::from("/nonexistent/dir/cache.db"),
            providers: Vec::new(),
            ..AppConfig::default()
        };
        let app = App::build(config).unwrap();
        assert_eq!(app.engine.resolve("Obrigado", Language::PtBr, Language::EnUs).await, "Thank you");
        assert_eq!(app.engine.cache_stats().size, 1);
    }

    #[tokio::test]
    async fn providers_follow_configured_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            providers: vec![ProviderKind::Gemini, ProviderKind::MyMemory],
            gemini_api_key: None,
            ..offline_config(&dir)
        };
        let app = App::build(config).unwrap();
        assert_eq!(app.engine.provider_names(), vec!["gemini", "mymemory"]);
        assert_eq!(app.probe_credentials().await, CredentialStatus::Missing);
    }

    #[test]
    fn clock_is_sane() {
        // 2020-01-01 in unix ms.
        assert!(now_unix_ms() > 1_577_836_800_000);
    }
}
