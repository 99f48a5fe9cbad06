//! chatview - chat export viewer
//!
//! Parses exported chat transcripts into structured messages, resolves the
//! media files they reference and layers optional translation, emotion and
//! reply features on top.
//!
//! ```
//! let messages = chatview::parse("12/5/23, 10:01 AM - Alice: Hello\nhow are you?");
//! assert_eq!(messages[0].sender, "Alice");
//! assert_eq!(messages[0].text, "Hello\nhow are you?");
//! ```

pub mod cli;
pub mod config;
pub mod enrich;
pub mod intake;
pub mod media;
pub mod render;
pub mod transcript;

pub use config::Config;
pub use media::{extract_media, is_media_reference, resolve_media, MediaKind, MediaLookup, MediaRef};
pub use transcript::{parse, Message, MessageId, Parser};
