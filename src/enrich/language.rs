//! Translation target languages.

use std::fmt;

/// A language the translator can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Short code used in config and on the command line.
    pub code: &'static str,
    pub name: &'static str,
    /// Model-specific language tag (NLLB flores-200 code).
    pub model_code: &'static str,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Transcripts are translated from English.
pub const SOURCE_LANGUAGE: Language = Language {
    code: "en",
    name: "English",
    model_code: "eng_Latn",
};

/// Languages offered for translation.
pub const SUPPORTED_LANGUAGES: &[Language] = &[
    SOURCE_LANGUAGE,
    Language {
        code: "hi",
        name: "Hindi",
        model_code: "hin_Deva",
    },
    Language {
        code: "es",
        name: "Spanish",
        model_code: "spa_Latn",
    },
    Language {
        code: "fr",
        name: "French",
        model_code: "fra_Latn",
    },
    Language {
        code: "de",
        name: "German",
        model_code: "deu_Latn",
    },
    Language {
        code: "zh",
        name: "Chinese",
        model_code: "zho_Hans",
    },
];

/// Default translation target.
pub const DEFAULT_TARGET: &str = "hi";

/// Look up a supported language by code (case-insensitive).
pub fn find_language(code: &str) -> Option<Language> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| lang.code.eq_ignore_ascii_case(code))
        .copied()
}

/// Target language for a code, falling back to English for unknown codes.
pub fn resolve_language(code: &str) -> Language {
    find_language(code).unwrap_or(SOURCE_LANGUAGE)
}
