//! Media reference detection and extraction.
//!
//! Two independent checks run on message bodies:
//!
//! - [`is_media_reference`] - cheap substring heuristic used by the parser
//! - [`extract_media`] - finds a filename token by extension and classifies it
//!
//! Both are driven by the tables below; adding an extension does not touch
//! control flow.

mod resolve;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use resolve::{resolve_media, MediaLookup};

/// Kind of media a filename refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Substrings marking a body as a media placeholder (case-sensitive).
pub const MEDIA_MARKERS: &[&str] = &["<attached:", "(file attached)", ".jpg", ".png", ".mp4"];

/// Extension sets per media kind, in priority order.
pub const MEDIA_CATEGORIES: &[(MediaKind, &[&str])] = &[
    (MediaKind::Image, &["jpg", "jpeg", "png", "gif", "webp"]),
    (MediaKind::Video, &["mp4", "mov", "avi"]),
    (MediaKind::Audio, &["mp3", "wav", "ogg", "opus"]),
];

/// A filename recognized in a message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    pub kind: MediaKind,
    /// Filename token; empty when the extension matched without a usable name.
    pub filename: String,
}

/// Whether `body` mentions an attachment.
pub fn is_media_reference(body: &str) -> bool {
    MEDIA_MARKERS.iter().any(|marker| body.contains(marker))
}

/// Classify the first media kind whose extensions appear in `body`.
///
/// The filename token is taken from the first whitespace-delimited run that
/// holds `<name>.<ext>`, extending to the last such extension in that run.
pub fn extract_media(body: &str) -> Option<MediaRef> {
    for &(kind, extensions) in MEDIA_CATEGORIES {
        if !contains_extension(body, extensions) {
            continue;
        }

        let filename = body
            .split(char::is_whitespace)
            .find_map(|run| filename_token(run, extensions))
            .unwrap_or_default();

        return Some(MediaRef {
            kind,
            filename: filename.to_string(),
        });
    }
    None
}

/// Length of the extension following the dot at `dot`, if it is one of `extensions`.
fn extension_at(text: &str, dot: usize, extensions: &[&str]) -> Option<usize> {
    let after = &text.as_bytes()[dot + 1..];
    extensions
        .iter()
        .find(|ext| {
            after.len() >= ext.len() && after[..ext.len()].eq_ignore_ascii_case(ext.as_bytes())
        })
        .map(|ext| ext.len())
}

fn contains_extension(body: &str, extensions: &[&str]) -> bool {
    body.match_indices('.')
        .any(|(dot, _)| extension_at(body, dot, extensions).is_some())
}

/// Longest prefix of `run` ending in `.<ext>` with at least one character before the dot.
fn filename_token<'a>(run: &'a str, extensions: &[&str]) -> Option<&'a str> {
    run.rmatch_indices('.')
        .filter(|&(dot, _)| dot > 0)
        .find_map(|(dot, _)| extension_at(run, dot, extensions).map(|len| &run[..dot + 1 + len]))
}
