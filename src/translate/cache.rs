//! Persistent translation cache with TTL.
//! Key: `from:to:normalized_text` where normalization is trim + lowercase.
//! Every mutation rewrites the whole snapshot into one slot of the backing
//! store. Expired entries are evicted lazily, on read.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::store::{PersistenceError, SlotStore};
use crate::language::Language;

/// Slot the snapshot lives in.
pub const CACHE_SLOT: &str = "bitssun_translations_v1";

/// Default TTL: 30 days.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 24 * 3600);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub value: String,
    /// Unix milliseconds.
    #[serde(rename = "timestamp")]
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub size: usize,
    /// Creation time (unix ms) of the oldest entry, if any.
    pub oldest_timestamp: Option<i64>,
}

/// Lowercased, trimmed form of `text` used inside cache keys.
pub fn normalize_key_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Compute the cache key for a translation request.
pub fn cache_key(from: Language, to: Language, text: &str) -> String {
    format!("{}:{}:{}", from.code(), to.code(), normalize_key_text(text))
}

pub struct TranslationCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    store: Arc<dyn SlotStore>,
    ttl: Duration,
    /// Cleared after the first persistence failure; the session then runs
    /// memory-only.
    persistent: AtomicBool,
}

impl TranslationCache {
    /// Build the cache and load any snapshot left by a previous session.
    /// An unreadable or corrupt snapshot yields an empty cache.
    pub fn open(store: Arc<dyn SlotStore>, ttl: Duration) -> Self {
        let cache = Self {
            entries: Mutex::new(HashMap::new()),
            store,
            ttl,
            persistent: AtomicBool::new(true),
        };
        cache.load();
        cache
    }

    fn load(&self) {
        let raw = match self.store.read(CACHE_SLOT) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no cache snapshot found");
                return;
            }
            Err(e) => {
                self.disable_persistence(&e);
                return;
            }
        };

        match serde_json::from_str::<Vec<(String, CacheEntry)>>(&raw) {
            Ok(pairs) => {
                let now = crate::now_unix_ms();
                let total = pairs.len();
                let mut entries = self.entries.lock();
                entries.extend(
                    pairs
                        .into_iter()
                        .filter(|(_, entry)| entry.created_at > 0 && entry.created_at <= now),
                );
                if entries.len() < total {
                    warn!(dropped = total - entries.len(), "cache entries with invalid timestamps dropped");
                }
                info!(entries = entries.len(), "translation cache loaded");
            }
            Err(e) => {
                warn!(error = %e, "corrupt cache snapshot, starting empty");
            }
        }
    }

    /// Look up a cached translation. Returns None if absent or expired;
    /// an expired entry is removed.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock();
        let entry = entries.get(key)?;
        if crate::now_unix_ms().saturating_sub(entry.created_at) <= self.ttl_ms() {
            return Some(entry.value.clone());
        }
        entries.remove(key);
        debug!(key, "cache entry expired");
        self.persist(&entries);
        None
    }

    /// Insert or overwrite a translation.
    pub fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock();
        entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                created_at: crate::now_unix_ms(),
            },
        );
        self.persist(&entries);
    }

    /// Drop every entry, in memory and in the backing store. The store is
    /// cleared even in memory-only mode so an old snapshot cannot come back
    /// on the next start.
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        entries.clear();
        if let Err(e) = self.store.remove(CACHE_SLOT) {
            warn!(error = %e, "failed to remove cache snapshot");
            self.disable_persistence(&e);
        }
        info!("translation cache cleared");
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock();
        CacheStats {
            size: entries.len(),
            oldest_timestamp: entries.values().map(|e| e.created_at).min(),
        }
    }

    /// Whether snapshots are still being written.
    pub fn is_persistent(&self) -> bool {
        self.persistent.load(Ordering::Relaxed)
    }

    fn ttl_ms(&self) -> i64 {
        i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX)
    }

    /// Write the full snapshot. Caller holds the entries lock so the
    /// snapshot matches what `get` can observe.
    fn persist(&self, entries: &HashMap<String, CacheEntry>) {
        if !self.persistent.load(Ordering::Relaxed) {
            return;
        }
        let pairs: Vec<(&String, &CacheEntry)> = entries.iter().collect();
        let result = serde_json::to_string(&pairs)
            .map_err(PersistenceError::from)
            .and_then(|json| self.store.write(CACHE_SLOT, &json));
        if let Err(e) = result {
            self.disable_persistence(&e);
        }
    }

    fn disable_persistence(&self, error: &PersistenceError) {
        if self.persistent.swap(false, Ordering::Relaxed) {
            warn!(error = %error, "cache persistence failed, continuing in memory only");
        }
    }
}
