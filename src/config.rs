//! Application configuration.
//! Defaults, then an optional TOML file, then environment overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::language::Language;
use crate::translate::gemini::{self, GeminiConfig};
use crate::translate::mymemory;

pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Name used by the web build; accepted for compatibility.
pub const ENV_GEMINI_API_KEY_LEGACY: &str = "VITE_GEMINI_API_KEY";
pub const ENV_CACHE_PATH: &str = "BITSSUN_CACHE_PATH";
pub const ENV_TRAVELER_LANGUAGE: &str = "BITSSUN_TRAVELER_LANGUAGE";

/// Ten years.
pub const MAX_CACHE_TTL_DAYS: u64 = 3650;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("vendor and traveler language are both {0}")]
    SameLanguage(Language),
    #[error("unknown provider {0:?} (expected \"mymemory\" or \"gemini\")")]
    UnknownProvider(String),
    #[error("cache_ttl_days must be between 1 and {max}, got {value}")]
    InvalidTtl { value: u64, max: u64 },
    #[error("invalid value for {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    MyMemory,
    Gemini,
}

impl std::str::FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mymemory" => Ok(ProviderKind::MyMemory),
            "gemini" => Ok(ProviderKind::Gemini),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub vendor_language: Language,
    pub traveler_language: Language,
    pub cache_path: PathBuf,
    pub cache_ttl_days: u64,
    pub mymemory_endpoint: String,
    pub mymemory_timeout_secs: u64,
    pub gemini_endpoint: String,
    pub gemini_model: String,
    pub gemini_api_key: Option<String>,
    pub gemini_max_jitter_ms: u64,
    pub gemini_timeout_secs: u64,
    pub phrase_overlay_path: Option<PathBuf>,
    /// Remote providers, tried in this order.
    pub providers: Vec<ProviderKind>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            vendor_language: Language::PtBr,
            traveler_language: Language::EnUs,
            cache_path: PathBuf::from("bitssun-cache.db"),
            cache_ttl_days: 30,
            mymemory_endpoint: mymemory::DEFAULT_ENDPOINT.into(),
            mymemory_timeout_secs: 10,
            gemini_endpoint: gemini::DEFAULT_ENDPOINT.into(),
            gemini_model: gemini::DEFAULT_MODEL.into(),
            gemini_api_key: None,
            gemini_max_jitter_ms: 500,
            gemini_timeout_secs: 30,
            phrase_overlay_path: None,
            providers: vec![ProviderKind::MyMemory, ProviderKind::Gemini],
        }
    }
}

impl AppConfig {
    /// Load from `path` if given, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let config = Self::from_file(path)?;
                info!(path = %path.display(), "config loaded");
                config
            }
            None => Self::default(),
        };
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Overrides from a variable lookup, `std::env::var` in production.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) =
            non_blank(ENV_GEMINI_API_KEY).or_else(|| non_blank(ENV_GEMINI_API_KEY_LEGACY))
        {
            self.gemini_api_key = Some(key);
        }
        if let Some(path) = non_blank(ENV_CACHE_PATH) {
            self.cache_path = PathBuf::from(path);
        }
        if let Some(lang) = non_blank(ENV_TRAVELER_LANGUAGE) {
            self.traveler_language = lang.parse().map_err(|e: crate::language::UnknownLanguage| {
                ConfigError::InvalidEnv {
                    var: ENV_TRAVELER_LANGUAGE,
                    reason: e.to_string(),
                }
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vendor_language == self.traveler_language {
            return Err(ConfigError::SameLanguage(self.vendor_language));
        }
        if self.cache_ttl_days == 0 || self.cache_ttl_days > MAX_CACHE_TTL_DAYS {
            return Err(ConfigError::InvalidTtl {
                value: self.cache_ttl_days,
                max: MAX_CACHE_TTL_DAYS,
            });
        }
        if self.providers.is_empty() {
            warn!("no remote providers configured, only cache and dictionary will answer");
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_days.saturating_mul(24 * 3600))
    }

    pub fn mymemory_timeout(&self) -> Duration {
        Duration::from_secs(self.mymemory_timeout_secs)
    }

    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            endpoint: self.gemini_endpoint.clone(),
            model: self.gemini_model.clone(),
            api_key: self.gemini_api_key.clone().filter(|k| !k.trim().is_empty()),
            max_jitter: Duration::from_millis(self.gemini_max_jitter_ms),
            timeout: Duration::from_secs(self.gemini_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.vendor_language, Language::PtBr);
        assert_eq!(config.traveler_language, Language::EnUs);
        assert_eq!(config.cache_ttl(), Duration::from_secs(30 * 24 * 3600));
        assert_eq!(config.providers, vec![ProviderKind::MyMemory, ProviderKind::Gemini]);
        assert!(config.gemini().api_key.is_none());
        assert_eq!(config.gemini().max_jitter, Duration::from_millis(500));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            traveler_language = "es-ES"
            gemini_max_jitter_ms = 0
            providers = ["gemini", "mymemory"]
            "#,
        )
        .unwrap();
        assert_eq!(config.traveler_language, Language::EsEs);
        assert_eq!(config.vendor_language, Language::PtBr);
        assert_eq!(config.gemini().max_jitter, Duration::ZERO);
        assert_eq!(config.providers, vec![ProviderKind::Gemini, ProviderKind::MyMemory]);
        assert_eq!(config.cache_ttl_days, 30);
    }

    #[test]
    fn bad_toml_is_reported() {
        assert!(matches!(
            AppConfig::from_toml("providers = [\"deepl\"]"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            AppConfig::from_toml("traveler_language = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cache_path = \"/tmp/elsewhere.db\"").unwrap();
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.cache_path, PathBuf::from("/tmp/elsewhere.db"));
        assert!(matches!(
            AppConfig::from_file(Path::new("/nonexistent/bitssun.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env_overrides(env(&[
                (ENV_GEMINI_API_KEY, "abc"),
                (ENV_CACHE_PATH, "/var/cache/bitssun.db"),
                (ENV_TRAVELER_LANGUAGE, "Spanish"),
            ]))
            .unwrap();
        assert_eq!(config.gemini_api_key.as_deref(), Some("abc"));
        assert_eq!(config.cache_path, PathBuf::from("/var/cache/bitssun.db"));
        assert_eq!(config.traveler_language, Language::EsEs);
    }

    #[test]
    fn legacy_key_name_and_blank_values() {
        let mut config = AppConfig::default();
        config
            .apply_env_overrides(env(&[
                (ENV_GEMINI_API_KEY, "  "),
                (ENV_GEMINI_API_KEY_LEGACY, "legacy"),
            ]))
            .unwrap();
        assert_eq!(config.gemini_api_key.as_deref(), Some("legacy"));

        let mut config = AppConfig {
            gemini_api_key: Some("".into()),
            ..AppConfig::default()
        };
        config.apply_env_overrides(env(&[])).unwrap();
        assert!(config.gemini().api_key.is_none());
    }

    #[test]
    fn invalid_env_language() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env_overrides(env(&[(ENV_TRAVELER_LANGUAGE, "Klingon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: ENV_TRAVELER_LANGUAGE, .. }));
    }

    #[test]
    fn same_languages_rejected() {
        let config = AppConfig {
            traveler_language: Language::PtBr,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::SameLanguage(Language::PtBr))));
    }

    #[test]
    fn implausible_ttl_rejected() {
        let config = AppConfig::from_toml("cache_ttl_days = 300000000000000").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTtl { value: 300000000000000, .. })
        ));
        // Computing the duration never panics.
        assert!(config.cache_ttl() > Duration::from_secs(0));

        let config = AppConfig {
            cache_ttl_days: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTtl { value: 0, .. })));
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn provider_kind_parsing() {
        assert_eq!("MyMemory".parse::<ProviderKind>().unwrap(), ProviderKind::MyMemory);
        assert!(matches!(
            "deepl".parse::<ProviderKind>(),
            Err(ConfigError::UnknownProvider(_))
        ));
    }
}
