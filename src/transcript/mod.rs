//! Chat transcript model and parser.
//!
//! An exported transcript is a sequence of lines. Each message starts with a
//! header line of the form `<date>, <time> - <sender>: <body>` and may continue
//! over any number of following lines.
//!
//! # Module Structure
//!
//! - [`header`] - Tokenizer for a single header line
//! - [`parser`] - Line-by-line state machine assembling messages

pub mod header;
mod parser;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::media::MediaKind;

pub use header::HeaderLine;
pub use parser::{parse, IdSource, Parser, SequentialIds};

/// Identifier of a message, unique within one parse run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Media file resolved for a message.
///
/// Locator and kind travel together so a message can never carry one without the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttachment {
    #[serde(rename = "mediaLocator")]
    pub locator: String,
    #[serde(rename = "mediaKind")]
    pub kind: MediaKind,
}

/// A single chat message recovered from a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    /// Date exactly as written in the header (not validated).
    pub date: String,
    /// Time exactly as written in the header, including seconds or meridiem if present.
    pub time: String,
    pub sender: String,
    /// Message body; continuation lines are joined with `\n`.
    pub text: String,
    /// Whether the body textually mentions an attachment.
    pub is_media_reference: bool,
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaAttachment>,
}

impl Message {
    /// Rebuild the header line this message was parsed from, followed by its body.
    pub fn to_transcript_lines(&self) -> String {
        format!("{}, {} - {}: {}", self.date, self.time, self.sender, self.text)
    }

    /// Media locator, if a file was resolved for this message.
    pub fn media_locator(&self) -> Option<&str> {
        self.media.as_ref().map(|m| m.locator.as_str())
    }

    /// Media kind, if a file was resolved for this message.
    pub fn media_kind(&self) -> Option<MediaKind> {
        self.media.as_ref().map(|m| m.kind)
    }
}

/// Find a message by id.
pub fn find<'a>(messages: &'a [Message], id: &MessageId) -> Option<&'a Message> {
    messages.iter().find(|m| &m.id == id)
}
