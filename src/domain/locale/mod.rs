//! Locale context for user-facing strings.
//!
//! The chat client renders labels and its one error string in the user's
//! language. The active [`Locale`] is an explicit value handed to whoever
//! needs it; there is no process-wide language setting.

mod translations;

pub use translations::{Translations, ENGLISH, RUSSIAN};

use serde::{Deserialize, Serialize};

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {
    /// The other language.
    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Ru,
            Self::Ru => Self::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }
}

/// Session-scoped language selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Locale {
    language: Language,
}

impl Locale {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn toggle(&mut self) {
        self.language = self.language.toggled();
    }

    pub fn translations(&self) -> &'static Translations {
        match self.language {
            Language::En => &ENGLISH,
            Language::Ru => &RUSSIAN,
        }
    }
}
