//! # Locale
//!
//! The two supported languages and their durable storage codes.

use serde::{Deserialize, Serialize};

/// Active interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (primary)
    #[default]
    En,
    /// Hindi (secondary)
    Hi,
}

impl Locale {
    /// Both locales in selector order
    pub fn all() -> &'static [Locale] {
        &[Locale::En, Locale::Hi]
    }

    /// Storage code written to the settings store
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Hi => "hi",
        }
    }

    /// Parse a storage code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Locale> {
        match code.trim() {
            "en" => Some(Locale::En),
            "hi" => Some(Locale::Hi),
            _ => None,
        }
    }

    /// Name shown in the language selector
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Hi => "हिंदी",
        }
    }

    /// Language description embedded in AI prompts
    pub fn prompt_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Hi => "Hindi (हिंदी)",
        }
    }

    /// The other locale (used by the header toggle)
    pub fn toggled(&self) -> Locale {
        match self {
            Locale::En => Locale::Hi,
            Locale::Hi => Locale::En,
        }
    }

    /// Pick between an English and a Hindi string
    pub fn pick<'a>(&self, en: &'a str, hi: &'a str) -> &'a str {
        match self {
            Locale::En => en,
            Locale::Hi => hi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_codes_parse_back() {
        for locale in Locale::all() {
            assert_eq!(Locale::from_code(locale.code()), Some(*locale));
        }
        assert_eq!(Locale::from_code("fr"), None);
        assert_eq!(Locale::from_code(" hi "), Some(Locale::Hi));
    }

    #[test]
    fn test_toggle_and_pick() {
        assert_eq!(Locale::En.toggled(), Locale::Hi);
        assert_eq!(Locale::Hi.toggled().toggled(), Locale::Hi);
        assert_eq!(Locale::Hi.pick("Farm", "खेत"), "खेत");
    }
}
