//! Static phrase dictionary.
//! Exact-match lookups over the curated catalogue and the flat phrase table,
//! optionally extended by a JSON overlay file loaded at startup.
//! Matching trims surrounding whitespace but is case-sensitive.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use super::phrase_data::{CATALOGUE, ENGLISH_ROWS, PORTUGUESE_ROWS, SPANISH_ROWS};
use crate::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Greetings,
    Prices,
    Products,
    Questions,
    Thanks,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Greetings,
        Category::Prices,
        Category::Products,
        Category::Questions,
        Category::Thanks,
    ];

    /// Label shown to the vendor.
    pub fn label(self) -> &'static str {
        match self {
            Category::Greetings => "Saudações",
            Category::Prices => "Preços",
            Category::Products => "Produtos",
            Category::Questions => "Perguntas",
            Category::Thanks => "Agradecimentos",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Greetings => "👋",
            Category::Prices => "💰",
            Category::Products => "🥥",
            Category::Questions => "❓",
            Category::Thanks => "🙏",
        }
    }
}

/// Curated phrase with a translation for every supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseEntry {
    pub id: &'static str,
    pub category: Category,
    pub(super) pt: &'static str,
    pub(super) en: &'static str,
    pub(super) es: &'static str,
}

impl PhraseEntry {
    pub fn translation(&self, lang: Language) -> &'static str {
        match lang {
            Language::PtBr => self.pt,
            Language::EnUs => self.en,
            Language::EsEs => self.es,
        }
    }
}

/// source language -> exact source text -> target language -> translation
type FlatTable = HashMap<Language, HashMap<String, HashMap<Language, String>>>;

#[derive(Debug, thiserror::Error)]
pub enum PhraseFileError {
    #[error("phrase file IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("phrase file parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub struct PhraseDictionary {
    flat: FlatTable,
    /// source language -> source text -> index into CATALOGUE
    catalogue_index: HashMap<Language, HashMap<&'static str, usize>>,
}

impl PhraseDictionary {
    /// Dictionary with the built-in tables only.
    pub fn builtin() -> Self {
        let mut flat = FlatTable::new();
        let sources = [
            (Language::PtBr, PORTUGUESE_ROWS, [Language::EnUs, Language::EsEs]),
            (Language::EnUs, ENGLISH_ROWS, [Language::PtBr, Language::EsEs]),
            (Language::EsEs, SPANISH_ROWS, [Language::PtBr, Language::EnUs]),
        ];
        for (from, rows, [first, second]) in sources {
            let table = flat.entry(from).or_default();
            for &(source, a, b) in rows {
                let targets = table.entry(source.to_string()).or_default();
                targets.insert(first, a.to_string());
                targets.insert(second, b.to_string());
            }
        }

        let mut catalogue_index: HashMap<Language, HashMap<&'static str, usize>> = HashMap::new();
        for (idx, entry) in CATALOGUE.iter().enumerate() {
            for lang in Language::ALL {
                catalogue_index
                    .entry(lang)
                    .or_default()
                    .entry(entry.translation(lang))
                    .or_insert(idx);
            }
        }

        Self {
            flat,
            catalogue_index,
        }
    }

    /// Built-in tables extended with rows from a JSON file shaped like
    /// `{"pt-BR": {"Oi": {"en-US": "Hi"}}}`. File rows win on conflict.
    pub fn with_overlay_file(path: &Path) -> Result<Self, PhraseFileError> {
        let content = std::fs::read_to_string(path)?;
        let overlay: FlatTable = serde_json::from_str(&content)?;
        let mut dict = Self::builtin();
        let mut added = 0usize;
        for (from, rows) in overlay {
            let table = dict.flat.entry(from).or_default();
            for (source, targets) in rows {
                added += targets.len();
                table.entry(source).or_default().extend(targets);
            }
        }
        info!(path = %path.display(), added, "phrase overlay loaded");
        Ok(dict)
    }

    /// Exact lookup of `text` (trimmed) authored in `from`, translated to `to`.
    pub fn lookup(&self, text: &str, from: Language, to: Language) -> Option<String> {
        let text = text.trim();
        if let Some(hit) = self
            .flat
            .get(&from)
            .and_then(|rows| rows.get(text))
            .and_then(|targets| targets.get(&to))
        {
            return Some(hit.clone());
        }
        self.catalogue_index
            .get(&from)
            .and_then(|index| index.get(text))
            .map(|&idx| CATALOGUE[idx].translation(to).to_string())
    }

    /// All flat-table pairs available for a language pair.
    pub fn all_for_pair(&self, from: Language, to: Language) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .flat
            .get(&from)
            .into_iter()
            .flat_map(|rows| rows.iter())
            .filter_map(|(source, targets)| targets.get(&to).map(|t| (source.clone(), t.clone())))
            .collect();
        pairs.sort();
        pairs
    }

    pub fn catalogue(&self) -> &'static [PhraseEntry] {
        CATALOGUE
    }

    pub fn by_category(&self, category: Category) -> Vec<&'static PhraseEntry> {
        CATALOGUE.iter().filter(|p| p.category == category).collect()
    }

    pub fn by_id(&self, id: &str) -> Option<&'static PhraseEntry> {
        CATALOGUE.iter().find(|p| p.id == id)
    }

    /// Case-insensitive substring search over one language column.
    pub fn search(&self, query: &str, lang: Language) -> Vec<&'static PhraseEntry> {
        let query = query.to_lowercase();
        CATALOGUE
            .iter()
            .filter(|p| p.translation(lang).to_lowercase().contains(&query))
            .collect()
    }
}

impl Default for PhraseDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}
