//! Per-message enrichment results.

use std::collections::HashMap;

use super::Emotion;
use crate::transcript::MessageId;

/// Everything computed for one message so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageState {
    /// Translations keyed by target language code.
    pub translations: HashMap<String, String>,
    pub emotion: Option<Emotion>,
    pub reply: Option<String>,
}

/// Cache of enrichment results for one loaded transcript.
#[derive(Debug, Clone, Default)]
pub struct MessageStates {
    states: HashMap<MessageId, MessageState>,
}

impl MessageStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &MessageId) -> Option<&MessageState> {
        self.states.get(id)
    }

    pub fn entry(&mut self, id: &MessageId) -> &mut MessageState {
        self.states.entry(id.clone()).or_default()
    }

    pub fn translation(&self, id: &MessageId, code: &str) -> Option<&str> {
        self.get(id)
            .and_then(|state| state.translations.get(code))
            .map(String::as_str)
    }

    pub fn emotion(&self, id: &MessageId) -> Option<&Emotion> {
        self.get(id).and_then(|state| state.emotion.as_ref())
    }

    pub fn reply(&self, id: &MessageId) -> Option<&str> {
        self.get(id).and_then(|state| state.reply.as_deref())
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
