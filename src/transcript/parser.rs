//! Line-by-line transcript parser.
//!
//! The parser is a two-state machine:
//!
//! - `AwaitingHeader`: no message started yet; non-header lines are dropped
//! - `AssemblingMessage`: a message is open; non-blank non-header lines are
//!   appended to its body, a header line closes it and opens the next one
//!
//! A header line always starts a new message, even inside what looks like a
//! pasted multi-line body.

use tracing::{debug, trace};

use super::header::HeaderLine;
use super::{Message, MessageId};
use crate::media::is_media_reference;

/// Source of message identifiers for one parse run.
pub trait IdSource {
    /// Produce the id for a message whose header is at `line_index` (0-based).
    fn next_id(&mut self, line_index: usize) -> MessageId;
}

/// Deterministic ids of the form `<line-index>-<sequence>`.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, line_index: usize) -> MessageId {
        let id = MessageId::new(format!("{}-{}", line_index, self.next));
        self.next += 1;
        id
    }
}

enum State {
    AwaitingHeader,
    AssemblingMessage(Message),
}

/// Transcript parser with an injectable id source.
pub struct Parser<I: IdSource = SequentialIds> {
    ids: I,
    state: State,
    messages: Vec<Message>,
    dropped_lines: usize,
}

impl Parser<SequentialIds> {
    /// Create a parser using [`SequentialIds`].
    pub fn new() -> Self {
        Self::with_id_source(SequentialIds::new())
    }
}

impl Default for Parser<SequentialIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdSource> Parser<I> {
    /// Create a parser drawing ids from `ids`.
    pub fn with_id_source(ids: I) -> Self {
        Self {
            ids,
            state: State::AwaitingHeader,
            messages: Vec::new(),
            dropped_lines: 0,
        }
    }

    /// Parse a complete transcript into messages in source order.
    pub fn parse(mut self, content: &str) -> Vec<Message> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        for (index, line) in content.lines().enumerate() {
            self.feed_line(index, line);
        }

        self.finish()
    }

    fn feed_line(&mut self, index: usize, line: &str) {
        if let Some(header) = HeaderLine::parse(line) {
            let message = Message {
                id: self.ids.next_id(index),
                date: header.date.to_string(),
                time: header.time.to_string(),
                sender: header.sender.to_string(),
                text: header.body.to_string(),
                is_media_reference: is_media_reference(header.body),
                media: None,
            };
            self.emit_pending();
            self.state = State::AssemblingMessage(message);
            return;
        }

        match &mut self.state {
            State::AssemblingMessage(message) if !line.trim().is_empty() => {
                message.text.push('\n');
                message.text.push_str(line);
            }
            State::AssemblingMessage(_) => {}
            State::AwaitingHeader => {
                if !line.trim().is_empty() {
                    trace!(line = index + 1, "dropping line before first message header");
                    self.dropped_lines += 1;
                }
            }
        }
    }

    fn emit_pending(&mut self) {
        if let State::AssemblingMessage(message) =
            std::mem::replace(&mut self.state, State::AwaitingHeader)
        {
            self.messages.push(message);
        }
    }

    fn finish(mut self) -> Vec<Message> {
        self.emit_pending();
        debug!(
            messages = self.messages.len(),
            dropped_lines = self.dropped_lines,
            "parsed transcript"
        );
        self.messages
    }
}

/// Parse a transcript with sequential ids.
pub fn parse(content: &str) -> Vec<Message> {
    Parser::new().parse(content)
}
