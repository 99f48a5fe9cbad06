//! Conversation rendering for the terminal.
//!
//! Messages are printed in transcript order. The current user's messages are
//! marked with `>` and tagged `(you)`; everyone else's carry their sender
//! name in the accent color.

pub mod theme;

use std::collections::HashMap;

use crate::transcript::Message;

pub use theme::{current_theme, Theme};

/// Indent for other participants' message bodies.
const BODY_INDENT: &str = "    ";

/// Indent for the current user's message bodies.
const OWN_BODY_INDENT: &str = "  > ";

/// Most frequent sender, treated as the person who exported the chat.
///
/// On a tie the sender seen later (by first appearance) wins.
pub fn current_user(messages: &[Message]) -> Option<&str> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for message in messages {
        let count = counts.entry(message.sender.as_str()).or_insert(0);
        if *count == 0 {
            order.push(message.sender.as_str());
        }
        *count += 1;
    }

    order
        .into_iter()
        .map(|sender| (sender, counts[sender]))
        .reduce(|best, next| if best.1 > next.1 { best } else { next })
        .map(|(sender, _)| sender)
}

/// Render one message.
pub fn render_message(message: &Message, is_own: bool, theme: &Theme) -> String {
    let mut out = String::new();

    let stamp = theme.secondary_text(&format!("{}, {}", message.date, message.time));
    let sender = if is_own {
        theme.own_text(&format!("{} (you)", message.sender))
    } else {
        theme.accent_text(&message.sender)
    };
    out.push_str(&format!("{}  {}\n", stamp, sender));

    let indent = if is_own { OWN_BODY_INDENT } else { BODY_INDENT };

    if let Some(media) = &message.media {
        out.push_str(indent);
        out.push_str(&theme.secondary_text(&format!("[{}: {}]", media.kind, media.locator)));
        out.push('\n');
    } else if message.is_media_reference {
        out.push_str(indent);
        out.push_str(&theme.secondary_text("[media omitted]"));
        out.push('\n');
    }

    for line in message.text.lines() {
        out.push_str(indent);
        out.push_str(&theme.primary_text(line));
        out.push('\n');
    }

    out
}

/// Render a whole conversation followed by a footer line.
pub fn render_conversation(messages: &[Message], me: Option<&str>, theme: &Theme) -> String {
    let mut out = String::new();

    for message in messages {
        let is_own = me == Some(message.sender.as_str());
        out.push_str(&render_message(message, is_own, theme));
        out.push('\n');
    }

    out.push_str(&theme.secondary_text(&footer(messages.len())));
    out.push('\n');
    out
}

/// Footer summarizing the conversation size.
pub fn footer(count: usize) -> String {
    format!("{} messages loaded", count)
}

/// Pretty JSON for a list of messages.
pub fn to_json(messages: &[Message]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(messages)
}
