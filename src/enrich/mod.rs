//! Optional machine-learning features layered over parsed messages.
//!
//! Translation, emotion tagging and reply suggestions are black boxes behind
//! the [`Translator`], [`EmotionClassifier`] and [`ReplyGenerator`] traits.
//! [`Enricher`] applies the fallback policy on top of them and caches every
//! result per message, so a backend failure degrades to a usable value
//! instead of an error and parsed messages are never modified.
//!
//! # Module Structure
//!
//! - [`command`] - Backend that runs an external program
//! - [`language`] - Supported translation targets
//! - [`state`] - Per-message result cache

pub mod command;
mod error;
pub mod language;
mod state;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::transcript::Message;

pub use command::CommandBackend;
pub use error::{EnrichError, EnrichResult};
pub use language::{find_language, resolve_language, Language, SUPPORTED_LANGUAGES};
pub use state::{MessageState, MessageStates};

/// Reply used when generation fails or returns nothing.
pub const FALLBACK_REPLY: &str = "Thanks for your message!";

/// Label used when classification fails or the model label is unknown.
pub const NEUTRAL: &str = "neutral";

/// Raw output of a sentiment/emotion model.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub score: f32,
}

/// Emotion attached to a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emotion {
    pub label: String,
    pub confidence: f32,
}

impl Emotion {
    pub fn neutral() -> Self {
        Self {
            label: NEUTRAL.to_string(),
            confidence: 0.0,
        }
    }

    /// Map a model label onto the emotion vocabulary.
    pub fn from_classification(classification: Classification) -> Self {
        let label = match classification.label.as_str() {
            "POSITIVE" => "happy",
            "NEGATIVE" => "sad",
            _ => NEUTRAL,
        };
        Self {
            label: label.to_string(),
            confidence: classification.score,
        }
    }

    /// Emoji shown next to the label.
    pub fn emoji(&self) -> &'static str {
        match self.label.as_str() {
            "happy" => "😊",
            "sad" => "😢",
            "angry" => "😠",
            _ => "😐",
        }
    }
}

/// Translates message text into a target language.
pub trait Translator {
    fn translate(&self, text: &str, target: &Language) -> EnrichResult<String>;
}

/// Classifies the sentiment of message text.
pub trait EmotionClassifier {
    fn classify(&self, text: &str) -> EnrichResult<Classification>;
}

/// Generates a reply from a prompt.
pub trait ReplyGenerator {
    fn generate(&self, prompt: &str) -> EnrichResult<String>;
}

/// Build the reply-generation prompt for a message and its emotion.
pub fn reply_prompt(text: &str, emotion: &str) -> String {
    format!(
        "You are having a WhatsApp conversation. The previous message was: \"{}\" and the emotion detected is {}. \
         Generate a brief, natural reply that matches this emotional tone. Keep it conversational and under 50 words.",
        text, emotion
    )
}

/// Runs enrichment backends with fallbacks and per-message caching.
pub struct Enricher {
    translator: Box<dyn Translator>,
    classifier: Box<dyn EmotionClassifier>,
    replier: Box<dyn ReplyGenerator>,
    states: MessageStates,
}

impl Enricher {
    pub fn new(
        translator: Box<dyn Translator>,
        classifier: Box<dyn EmotionClassifier>,
        replier: Box<dyn ReplyGenerator>,
    ) -> Self {
        Self {
            translator,
            classifier,
            replier,
            states: MessageStates::new(),
        }
    }

    /// Use one backend for all three features.
    pub fn with_backend<B>(backend: B) -> Self
    where
        B: Translator + EmotionClassifier + ReplyGenerator + Clone + 'static,
    {
        Self::new(
            Box::new(backend.clone()),
            Box::new(backend.clone()),
            Box::new(backend),
        )
    }

    pub fn states(&self) -> &MessageStates {
        &self.states
    }

    /// Translate a message, returning the original text if translation fails.
    pub fn translate(&mut self, message: &Message, target: &Language) -> String {
        if let Some(cached) = self.states.translation(&message.id, target.code) {
            return cached.to_string();
        }

        let translated = match self.translator.translate(&message.text, target) {
            Ok(text) => text,
            Err(e) => {
                warn!(id = %message.id, error = %e, "translation failed, keeping original text");
                message.text.clone()
            }
        };

        self.states
            .entry(&message.id)
            .translations
            .insert(target.code.to_string(), translated.clone());
        translated
    }

    /// Detect a message's emotion, falling back to neutral.
    pub fn detect_emotion(&mut self, message: &Message) -> Emotion {
        if let Some(cached) = self.states.emotion(&message.id) {
            return cached.clone();
        }

        let emotion = match self.classifier.classify(&message.text) {
            Ok(classification) => Emotion::from_classification(classification),
            Err(e) => {
                warn!(id = %message.id, error = %e, "emotion detection failed");
                Emotion::neutral()
            }
        };

        self.states.entry(&message.id).emotion = Some(emotion.clone());
        emotion
    }

    /// Suggest a reply matching the message's emotion.
    ///
    /// Detects the emotion first when it is not cached yet.
    pub fn generate_reply(&mut self, message: &Message) -> String {
        if let Some(cached) = self.states.reply(&message.id) {
            return cached.to_string();
        }

        let emotion = self.detect_emotion(message);
        let prompt = reply_prompt(&message.text, &emotion.label);

        let reply = match self.replier.generate(&prompt) {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => FALLBACK_REPLY.to_string(),
            Err(e) => {
                warn!(id = %message.id, error = %e, "reply generation failed");
                FALLBACK_REPLY.to_string()
            }
        };

        self.states.entry(&message.id).reply = Some(reply.clone());
        reply
    }
}
