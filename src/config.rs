//! Configuration management for chatview
//!
//! Settings live in `<config dir>/chatview/config.toml`. A missing file or
//! missing fields fall back to defaults, so a partial file is always valid.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::enrich::language::{find_language, DEFAULT_TARGET};

/// Directory name under the platform config directory.
const APP_DIR: &str = "chatview";

/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Keys accepted by [`Config::set`].
pub const SETTABLE_KEYS: &[&str] = &[
    "display.theme",
    "display.language",
    "display.me",
    "enrich.program",
    "enrich.timeout_secs",
];

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub enrich: EnrichConfig,
}

/// Color scheme for terminal output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

/// How conversations are shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub theme: ThemeName,
    /// Translation target language code.
    pub language: String,
    /// Sender treated as "you"; defaults to the most frequent sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub me: Option<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: ThemeName::Light,
            language: DEFAULT_TARGET.to_string(),
            me: None,
        }
    }
}

/// External program used for translation, emotion and reply features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    pub args: Vec<String>,
    /// Seconds before a backend invocation is killed.
    pub timeout_secs: u64,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: Vec::new(),
            timeout_secs: 120,
        }
    }
}

impl Config {
    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the config file, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config file: {:?}", path))
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config TOML")
    }

    /// Update one `section.field` value from its text form.
    ///
    /// An empty value clears `display.me` and `enrich.program`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let optional = |value: &str| (!value.is_empty()).then(|| value.to_string());

        match key {
            "display.theme" => {
                self.display.theme = <ThemeName as clap::ValueEnum>::from_str(value, true)
                    .map_err(|_| anyhow::anyhow!("Unknown theme '{}' (expected light or dark)", value))?;
            }
            "display.language" => {
                if find_language(value).is_none() {
                    bail!("Unsupported language '{}' (see `chatview languages`)", value);
                }
                self.display.language = value.to_string();
            }
            "display.me" => self.display.me = optional(value),
            "enrich.program" => self.enrich.program = optional(value),
            "enrich.timeout_secs" => {
                self.enrich.timeout_secs = value
                    .parse()
                    .with_context(|| format!("Invalid timeout '{}': expected seconds", value))?;
            }
            _ => bail!(
                "Unknown config key '{}' (expected one of: {})",
                key,
                SETTABLE_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Write the config file, creating its directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }
}
