//! Show command handler

use std::path::Path;

use anyhow::Result;

use chatview::config::ThemeName;
use chatview::render::{current_theme, current_user, render_conversation, to_json};
use chatview::{intake, Config};

/// Print a chat export as a conversation or as JSON.
pub fn handle(path: &Path, json: bool, theme: Option<ThemeName>, me: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let chat = intake::load(path)?;
    let messages = chat.messages();

    if json {
        println!("{}", to_json(&messages)?);
        return Ok(());
    }

    let theme = current_theme(theme.unwrap_or(config.display.theme));
    let me = me
        .or(config.display.me)
        .or_else(|| current_user(&messages).map(str::to_string));

    print!("{}", render_conversation(&messages, me.as_deref(), &theme));
    Ok(())
}
