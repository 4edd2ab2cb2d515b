//! Supported languages and their per-backend identifiers.
//! The set is closed: adding a language means a new variant here plus rows in
//! the phrase tables, never a runtime value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One of the three languages the vendor and traveler can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "es-ES")]
    EsEs,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::PtBr, Language::EnUs, Language::EsEs];

    /// Internal identifier, also used inside cache keys.
    pub fn code(self) -> &'static str {
        match self {
            Language::PtBr => "pt-BR",
            Language::EnUs => "en-US",
            Language::EsEs => "es-ES",
        }
    }

    /// English name. The completion model is addressed with this, never a code.
    pub fn name(self) -> &'static str {
        match self {
            Language::PtBr => "Portuguese",
            Language::EnUs => "English",
            Language::EsEs => "Spanish",
        }
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Language::PtBr => "Português",
            Language::EnUs => "English",
            Language::EsEs => "Español",
        }
    }

    /// BCP 47 tag handed to speech recognition / synthesis.
    pub fn speech_code(self) -> &'static str {
        self.code()
    }

    /// Code understood by the community MT endpoint's `langpair` parameter.
    pub fn mymemory_code(self) -> &'static str {
        match self {
            Language::PtBr => "pt-BR",
            Language::EnUs => "en",
            Language::EsEs => "es",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Language::PtBr => "🇧🇷",
            Language::EnUs => "🇺🇸",
            Language::EsEs => "🇪🇸",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Accepts internal codes, bare ISO 639-1 codes and English or native names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let base = lower.split(['-', '_']).next().unwrap_or("");
        Language::ALL
            .into_iter()
            .find(|lang| {
                lang.code().to_lowercase() == lower
                    || lang.name().to_lowercase() == lower
                    || lang.native_name().to_lowercase() == lower
                    || &lang.code()[..2] == base
            })
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Best-effort guess of which supported language `text` is written in.
/// Not part of the resolution chain. Falls back to English when the detector
/// is unsure, which includes very short inputs.
pub fn detect_language(text: &str) -> Language {
    use whatlang::Lang;

    let detector = whatlang::Detector::with_allowlist(vec![Lang::Por, Lang::Eng, Lang::Spa]);
    let Some(info) = detector.detect(text) else {
        return Language::EnUs;
    };
    if !info.is_reliable() {
        debug!(lang = ?info.lang(), confidence = info.confidence(), "unreliable detection");
        return Language::EnUs;
    }
    match info.lang() {
        Lang::Por => Language::PtBr,
        Lang::Spa => Language::EsEs,
        _ => Language::EnUs,
    }
}
