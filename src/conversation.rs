//! Conversation transcript between the vendor and a traveler.
//! Every message is translated through the engine on the way in. Speech
//! recognition feeds `on_speech`; only final transcripts become messages.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::language::Language;
use crate::translate::TranslationEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Vendor,
    Tourist,
}

/// One line of the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub original_text: String,
    pub translated_text: String,
    pub from_language: Language,
    pub to_language: Language,
    /// Unix milliseconds.
    pub timestamp: i64,
    pub from_common_phrase: bool,
}

/// Result delivered by a speech recognizer.
#[derive(Debug, Clone)]
pub struct SpeechEvent {
    pub transcript: String,
    pub is_final: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversationError {
    #[error("traveler language cannot be the vendor language ({0})")]
    SameLanguage(Language),
    #[error("unknown common phrase: {0}")]
    UnknownPhrase(String),
}

pub struct Conversation {
    engine: Arc<TranslationEngine>,
    vendor_language: Language,
    traveler_language: Language,
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(
        engine: Arc<TranslationEngine>,
        vendor_language: Language,
        traveler_language: Language,
    ) -> Result<Self, ConversationError> {
        if vendor_language == traveler_language {
            return Err(ConversationError::SameLanguage(vendor_language));
        }
        Ok(Self {
            engine,
            vendor_language,
            traveler_language,
            messages: Vec::new(),
        })
    }

    pub fn vendor_language(&self) -> Language {
        self.vendor_language
    }

    pub fn traveler_language(&self) -> Language {
        self.traveler_language
    }

    /// Switch the traveler language. Earlier messages keep their languages.
    pub fn set_traveler_language(&mut self, lang: Language) -> Result<(), ConversationError> {
        if lang == self.vendor_language {
            return Err(ConversationError::SameLanguage(lang));
        }
        if lang != self.traveler_language {
            info!(from = %self.traveler_language, to = %lang, "traveler language changed");
            self.traveler_language = lang;
        }
        Ok(())
    }

    /// (source, target) for a message written by `sender`.
    pub fn direction(&self, sender: Sender) -> (Language, Language) {
        match sender {
            Sender::Vendor => (self.vendor_language, self.traveler_language),
            Sender::Tourist => (self.traveler_language, self.vendor_language),
        }
    }

    /// Translate and append a message. Blank text is ignored.
    pub async fn say(&mut self, sender: Sender, text: &str) -> Option<&Message> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let (from, to) = self.direction(sender);
        let translated = self.engine.resolve(text, from, to).await;
        Some(self.push(sender, text.to_string(), translated, false))
    }

    /// Interim recognizer results are dropped.
    pub async fn on_speech(&mut self, sender: Sender, event: SpeechEvent) -> Option<&Message> {
        if !event.is_final {
            debug!(chars = event.transcript.len(), "interim transcript ignored");
            return None;
        }
        self.say(sender, &event.transcript).await
    }

    /// Append a catalogue phrase using its curated translation directly.
    pub fn use_common_phrase(&mut self, id: &str, sender: Sender) -> Result<&Message, ConversationError> {
        let phrase = self
            .engine
            .dictionary()
            .by_id(id)
            .ok_or_else(|| ConversationError::UnknownPhrase(id.to_string()))?;
        let (from, to) = self.direction(sender);
        let original = phrase.translation(from).to_string();
        let translated = phrase.translation(to).to_string();
        Ok(self.push(sender, original, translated, true))
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    fn push(&mut self, sender: Sender, original_text: String, translated_text: String, from_common_phrase: bool) -> &Message {
        let (from_language, to_language) = self.direction(sender);
        self.messages.push(Message {
            id: uuid::Uuid::new_v4().to_string(),
            sender,
            original_text,
            translated_text,
            from_language,
            to_language,
            timestamp: crate::now_unix_ms(),
            from_common_phrase,
        });
        &self.messages[self.messages.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsRegistry;
    use crate::translate::cache::DEFAULT_TTL;
    use crate::translate::store::MemorySlotStore;
    use crate::translate::{PhraseDictionary, TranslationCache};

    /// Engine with no remote providers: dictionary hits or degraded text.
    fn conversation(traveler: Language) -> Conversation {
        let engine = TranslationEngine::new(
            Arc::new(TranslationCache::open(Arc::new(MemorySlotStore::new()), DEFAULT_TTL)),
            Arc::new(PhraseDictionary::builtin()),
            Vec::new(),
            Arc::new(MetricsRegistry::new()),
        );
        Conversation::new(Arc::new(engine), Language::PtBr, traveler).unwrap()
    }

    #[tokio::test]
    async fn vendor_and_tourist_directions() {
        let mut conv = conversation(Language::EnUs);

        let msg = conv.say(Sender::Vendor, "Obrigado").await.unwrap();
        assert_eq!(msg.translated_text, "Thank you");
        assert_eq!((msg.from_language, msg.to_language), (Language::PtBr, Language::EnUs));
        assert!(!msg.from_common_phrase);

        let msg = conv.say(Sender::Tourist, " Hello ").await.unwrap();
        assert_eq!(msg.original_text, "Hello");
        assert_eq!(msg.translated_text, "Olá");
        assert_eq!(msg.sender, Sender::Tourist);

        assert_eq!(conv.messages().len(), 2);
    }

    #[tokio::test]
    async fn blank_text_adds_nothing() {
        let mut conv = conversation(Language::EnUs);
        assert!(conv.say(Sender::Vendor, "   ").await.is_none());
        assert!(conv.messages().is_empty());
    }

    #[tokio::test]
    async fn only_final_speech_is_recorded() {
        let mut conv = conversation(Language::EsEs);
        let interim = SpeechEvent {
            transcript: "Obri".into(),
            is_final: false,
        };
        assert!(conv.on_speech(Sender::Vendor, interim).await.is_none());

        let done = SpeechEvent {
            transcript: "Obrigado".into(),
            is_final: true,
        };
        let msg = conv.on_speech(Sender::Vendor, done).await.unwrap();
        assert_eq!(msg.translated_text, "Gracias");
        assert_eq!(conv.messages().len(), 1);
    }

    #[tokio::test]
    async fn untranslatable_text_shows_degraded_message() {
        let mut conv = conversation(Language::EnUs);
        let msg = conv.say(Sender::Tourist, "Where is the bus stop?").await.unwrap();
        assert_eq!(msg.translated_text, "Erro na tradução.");
    }

    #[test]
    fn common_phrase_uses_catalogue() {
        let mut conv = conversation(Language::EnUs);
        let msg = conv.use_common_phrase("product_beer", Sender::Vendor).unwrap();
        assert_eq!(msg.translated_text, "Cold beer");
        assert!(msg.from_common_phrase);

        let msg = conv.use_common_phrase("product_beer", Sender::Tourist).unwrap();
        assert_eq!(msg.original_text, "Cold beer");

        assert_eq!(
            conv.use_common_phrase("nope", Sender::Vendor).unwrap_err(),
            ConversationError::UnknownPhrase("nope".into())
        );
        assert_eq!(conv.messages().len(), 2);
    }

    #[tokio::test]
    async fn traveler_language_switch() {
        let mut conv = conversation(Language::EnUs);
        conv.say(Sender::Vendor, "Obrigado").await;

        assert_eq!(
            conv.set_traveler_language(Language::PtBr),
            Err(ConversationError::SameLanguage(Language::PtBr))
        );
        conv.set_traveler_language(Language::EsEs).unwrap();
        let msg = conv.say(Sender::Vendor, "Obrigado").await.unwrap();
        assert_eq!(msg.translated_text, "Gracias");
        // History keeps the language it was written in.
        assert_eq!(conv.messages()[0].to_language, Language::EnUs);
    }

    #[test]
    fn same_languages_rejected() {
        let engine = TranslationEngine::new(
            Arc::new(TranslationCache::open(Arc::new(MemorySlotStore::new()), DEFAULT_TTL)),
            Arc::new(PhraseDictionary::builtin()),
            Vec::new(),
            Arc::new(MetricsRegistry::new()),
        );
        assert!(matches!(
            Conversation::new(Arc::new(engine), Language::EsEs, Language::EsEs),
            Err(ConversationError::SameLanguage(Language::EsEs))
        ));
    }
}
