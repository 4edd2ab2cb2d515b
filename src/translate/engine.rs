//! Resolution policy: Cache → Dictionary → providers (in order) → Degraded.
//! Each stage is tried at most once per call and the first hit wins.
//! Hits from any stage but the cache are written back before returning.
//! Failures never escape: the worst case is a fixed degraded message.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use super::cache::{cache_key, CacheStats, TranslationCache};
use super::phrases::PhraseDictionary;
use super::{degraded_message, DegradedReason, ProviderError, Stage, TranslationProvider};
use crate::language::Language;
use crate::metrics::{metric_names, MetricsRegistry};

/// Translated text plus the stage that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub text: String,
    pub stage: Stage,
}

pub struct TranslationEngine {
    cache: Arc<TranslationCache>,
    dictionary: Arc<PhraseDictionary>,
    providers: Vec<Arc<dyn TranslationProvider>>,
    metrics: Arc<MetricsRegistry>,
}

impl TranslationEngine {
    /// `providers` are tried in the given order.
    pub fn new(
        cache: Arc<TranslationCache>,
        dictionary: Arc<PhraseDictionary>,
        providers: Vec<Arc<dyn TranslationProvider>>,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            cache,
            dictionary,
            providers,
            metrics,
        }
    }

    /// Translate `text`. Always returns a displayable string.
    pub async fn resolve(&self, text: &str, from: Language, to: Language) -> String {
        self.resolve_detailed(text, from, to).await.text
    }

    pub async fn resolve_detailed(&self, text: &str, from: Language, to: Language) -> Resolution {
        if from == to {
            return Resolution {
                text: text.to_string(),
                stage: Stage::Passthrough,
            };
        }
        if text.trim().is_empty() {
            return Resolution {
                text: String::new(),
                stage: Stage::Passthrough,
            };
        }

        let request_id = uuid::Uuid::new_v4();
        let span = info_span!("resolve", %request_id, %from, %to);
        let timing = self.metrics.span(metric_names::RESOLVE);
        let resolution = self.run_chain(text, from, to).instrument(span).await;
        timing.finish();
        self.metrics.increment(stage_metric(resolution.stage));
        resolution
    }

    async fn run_chain(&self, text: &str, from: Language, to: Language) -> Resolution {
        let key = cache_key(from, to, text);

        if let Some(hit) = self.cache.get(&key) {
            debug!("cache hit");
            return Resolution {
                text: hit,
                stage: Stage::Cache,
            };
        }

        if let Some(hit) = self.dictionary.lookup(text, from, to) {
            debug!("dictionary hit");
            self.cache.set(&key, &hit);
            return Resolution {
                text: hit,
                stage: Stage::Dictionary,
            };
        }

        let mut last_error: Option<ProviderError> = None;
        let mut last_stage = Stage::Dictionary;
        for provider in &self.providers {
            if !provider.is_available() {
                debug!(provider = provider.name(), "provider unavailable, skipped");
                continue;
            }
            last_stage = Stage::Provider(provider.name());

            let timing = self.metrics.span(metric_names::PROVIDER_CALL);
            let outcome = provider.translate(text, from, to).await;
            timing.finish();

            match outcome {
                Ok(translation) => {
                    info!(provider = provider.name(), "remote translation");
                    self.cache.set(&key, &translation);
                    return Resolution {
                        text: translation,
                        stage: last_stage,
                    };
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "provider failed, falling through");
                    if !e.is_unavailable() {
                        last_error = Some(e);
                    }
                }
            }
        }

        let reason = last_error
            .as_ref()
            .map(ProviderError::degraded_reason)
            .unwrap_or(DegradedReason::Other);
        warn!(degraded_from = %last_stage, ?reason, "all translation stages failed");
        Resolution {
            text: degraded_message(to, reason).to_string(),
            stage: Stage::Degraded,
        }
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn dictionary(&self) -> &PhraseDictionary {
        &self.dictionary
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

fn stage_metric(stage: Stage) -> &'static str {
    match stage {
        Stage::Passthrough => metric_names::STAGE_PASSTHROUGH,
        Stage::Cache => metric_names::STAGE_CACHE,
        Stage::Dictionary => metric_names::STAGE_DICTIONARY,
        Stage::Provider(_) => metric_names::STAGE_PROVIDER,
        Stage::Degraded => metric_names::STAGE_DEGRADED,
    }
}
