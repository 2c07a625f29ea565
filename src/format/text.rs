use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use rand::seq::IndexedRandom;
use regex::{
    Captures,
    Regex,
};

use super::LocaleFormat;
use crate::dom::escape_text;
use crate::language::Language;

/// `{name}` placeholders.
#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder regex should compile"));

/// Dotted identifier segments, each starting with a letter.
#[allow(clippy::expect_used)]
static TRANSLATION_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*(\.[a-zA-Z][a-zA-Z0-9_]*)*$")
        .expect("translation key regex should compile")
});

/// `local@domain.tld` with no whitespace.
#[allow(clippy::expect_used)]
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should compile")
});

/// Optional `+`, then up to 16 digits without a leading zero.
#[allow(clippy::expect_used)]
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone regex should compile"));

/// Characters used by [`generate_id`].
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of a generated identifier.
const ID_LENGTH: usize = 9;

/// Picks the plural form for `count`.
///
/// `en` and `hy` distinguish one from many. `ru` uses three buckets: singular for
/// 1, 21, 31, ...; `plural` for 2-4, 22-24, ...; `plural` + `ов` for the rest,
/// including 11-14.
#[must_use]
pub fn pluralize(count: u64, singular: &str, plural: &str, language: Language) -> String {
    match language {
        Language::En | Language::Hy => {
            let form = if count == 1 { singular } else { plural };
            form.to_string()
        }
        Language::Ru => {
            let (last, last_two) = (count % 10, count % 100);
            if last == 1 && last_two != 11 {
                singular.to_string()
            } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
                plural.to_string()
            } else {
                format!("{plural}ов")
            }
        }
    }
}

/// Replaces `{name}` with `variables[name]`. Unknown names and empty values keep
/// the placeholder.
#[must_use]
pub fn interpolate<'a>(text: &'a str, variables: &HashMap<String, String>) -> Cow<'a, str> {
    PLACEHOLDER.replace_all(text, |caps: &Captures<'_>| {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        caps.get(1)
            .and_then(|name| variables.get(name.as_str()))
            .filter(|value| !value.is_empty())
            .map_or_else(|| whole.to_string(), Clone::clone)
    })
}

/// Uppercases the first character.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}

/// Cuts `text` to `max_chars` characters and appends the language's ellipsis.
#[must_use]
pub fn truncate(text: &str, max_chars: usize, language: Language) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars).collect();
    format!("{kept}{}", LocaleFormat::of(language).ellipsis)
}

#[must_use]
pub fn is_valid_translation_key(key: &str) -> bool {
    TRANSLATION_KEY.is_match(key)
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Whitespace is ignored, so `+374 10 123456` is accepted.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE.is_match(&compact)
}

/// Random lowercase base-36 identifier for generated DOM ids.
#[must_use]
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LENGTH)
        .filter_map(|_| ID_ALPHABET.choose(&mut rng).map(|b| char::from(*b)))
        .collect()
}

/// Escapes text for safe insertion as markup.
#[must_use]
pub fn escape_html(text: &str) -> String {
    escape_text(text)
}
