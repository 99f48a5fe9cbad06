//! Resolution of media references against exported files.

use std::collections::HashMap;

use tracing::debug;

use super::extract_media;
use crate::transcript::{MediaAttachment, Message};

/// Map from exported filename to a locator (path or URL) for its bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaLookup {
    files: HashMap<String, String>,
}

impl MediaLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, filename: impl Into<String>, locator: impl Into<String>) {
        self.files.insert(filename.into(), locator.into());
    }

    pub fn get(&self, filename: &str) -> Option<&str> {
        self.files.get(filename).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MediaLookup {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut lookup = Self::new();
        for (filename, locator) in iter {
            lookup.insert(filename, locator);
        }
        lookup
    }
}

/// Attach media to every message whose extracted filename is in `lookup`.
///
/// Messages without a match are left untouched, even when flagged as media
/// references. Returns the number of messages that received media.
pub fn resolve_media(messages: &mut [Message], lookup: &MediaLookup) -> usize {
    if lookup.is_empty() {
        return 0;
    }

    let mut resolved = 0;
    for message in messages.iter_mut() {
        let Some(media) = extract_media(&message.text) else {
            continue;
        };
        if media.filename.is_empty() {
            continue;
        }
        if let Some(locator) = lookup.get(&media.filename) {
            message.media = Some(MediaAttachment {
                locator: locator.to_string(),
                kind: media.kind,
            });
            resolved += 1;
        }
    }

    debug!(resolved, available = lookup.len(), "resolved media references");
    resolved
}
