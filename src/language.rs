//! Supported dashboard languages.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// Language codes rendered right-to-left.
const RTL_CODES: &[&str] = &["ar", "he", "fa", "ur"];

/// The closed set of languages the dashboard ships dictionaries for.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Armenian
    Hy,
    /// English
    #[default]
    En,
    /// Russian
    Ru,
}

impl Language {
    /// Every supported language, in dictionary load order.
    pub const ALL: [Self; 3] = [Self::Hy, Self::En, Self::Ru];

    /// Two-letter code used in storage, file names and the `lang` attribute.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Hy => "hy",
            Self::En => "en",
            Self::Ru => "ru",
        }
    }

    /// BCP-47 locale tag used for formatting.
    #[must_use]
    pub const fn locale_tag(self) -> &'static str {
        match self {
            Self::Hy => "hy-AM",
            Self::En => "en-US",
            Self::Ru => "ru-RU",
        }
    }

    /// Parses an exact language code (case-insensitive).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL.into_iter().find(|lang| lang.code().eq_ignore_ascii_case(code))
    }

    /// Intersects a locale tag such as `ru-RU` or `en_GB.UTF-8` with the supported set.
    #[must_use]
    pub fn from_locale(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_', '.']).next().unwrap_or_default();
        Self::from_code(primary)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Writing direction of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Value for the HTML `dir` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

/// Returns the writing direction for an arbitrary language code.
#[must_use]
pub fn direction_of(code: &str) -> TextDirection {
    if RTL_CODES.iter().any(|rtl| rtl.eq_ignore_ascii_case(code.trim())) {
        TextDirection::Rtl
    } else {
        TextDirection::Ltr
    }
}
