//! Config subcommands handler

use anyhow::Result;

use chatview::render::current_theme;
use chatview::Config;

/// Show current configuration as TOML.
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    let theme = current_theme(config.display.theme);
    println!("{}", theme.primary_text(&toml_str));
    Ok(())
}

/// Print where the config file lives (whether or not it exists yet).
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Change one setting and write the config file.
pub fn handle_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let theme = current_theme(config.display.theme);
    println!(
        "{}",
        theme.success_text(&format!(
            "Saved {} to {}",
            key,
            Config::config_path()?.display()
        ))
    );
    Ok(())
}
