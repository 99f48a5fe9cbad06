//! Translate, emotion and reply command handlers

use anyhow::{Context, Result};
use tracing::warn;

use chatview::cli::MessageArgs;
use chatview::enrich::{
    find_language, resolve_language, CommandBackend, Enricher, SUPPORTED_LANGUAGES,
};
use chatview::render::current_theme;
use chatview::transcript::{self, Message, MessageId};
use chatview::{intake, Config};

/// Load the export and pick the requested message.
fn load_message(args: &MessageArgs) -> Result<Message> {
    let chat = intake::load(&args.path)?;
    let messages = chat.messages();
    transcript::find(&messages, &MessageId::new(args.id.as_str()))
        .cloned()
        .with_context(|| {
            format!(
                "No message with id '{}' in {} (see `chatview show --json`)",
                args.id,
                chat.source.display()
            )
        })
}

fn enricher(config: &Config) -> Result<Enricher> {
    let backend = CommandBackend::from_config(&config.enrich)?;
    Ok(Enricher::with_backend(backend))
}

/// Print the message translated into the requested or configured language.
pub fn handle_translate(args: &MessageArgs, lang: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let code = lang.unwrap_or_else(|| config.display.language.clone());
    if find_language(&code).is_none() {
        warn!(code = %code, "unsupported language, translating to English");
    }
    let target = resolve_language(&code);

    let message = load_message(args)?;
    let mut enricher = enricher(&config)?;
    println!("{}", enricher.translate(&message, &target));
    Ok(())
}

/// Print the detected emotion of a message.
pub fn handle_emotion(args: &MessageArgs) -> Result<()> {
    let config = Config::load()?;
    let message = load_message(args)?;
    let mut enricher = enricher(&config)?;

    let emotion = enricher.detect_emotion(&message);
    println!(
        "{} {} ({:.2})",
        emotion.emoji(),
        emotion.label,
        emotion.confidence
    );
    Ok(())
}

/// Print a suggested reply for a message.
pub fn handle_reply(args: &MessageArgs) -> Result<()> {
    let config = Config::load()?;
    let message = load_message(args)?;
    let mut enricher = enricher(&config)?;
    println!("{}", enricher.generate_reply(&message));
    Ok(())
}

/// List translation targets, marking the configured default.
pub fn handle_languages() -> Result<()> {
    let config = Config::load()?;
    let theme = current_theme(config.display.theme);

    for lang in SUPPORTED_LANGUAGES {
        let line = format!("{:<4}{}", lang.code, lang.name);
        if lang.code == config.display.language {
            println!("{} {}", theme.accent_text(&line), theme.secondary_text("(default)"));
        } else {
            println!("{}", theme.primary_text(&line));
        }
    }
    Ok(())
}
