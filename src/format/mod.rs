//! Locale-aware formatting helpers.
//!
//! Every function is pure. Per-language conventions live in static
//! [`LocaleFormat`] tables, so nothing is rebuilt per call.
/// Per-language formatting tables
mod locale;
/// Numbers, currency and byte sizes
mod number;
/// String helpers
mod text;
/// Dates and relative times
mod time;

pub use locale::{
    CurrencyFormat,
    LocaleFormat,
    TimeUnits,
};
pub use number::{
    currency_for,
    format_currency,
    format_file_size,
    format_number,
};
pub use text::{
    capitalize,
    escape_html,
    generate_id,
    interpolate,
    is_valid_email,
    is_valid_phone,
    is_valid_translation_key,
    pluralize,
    truncate,
};
pub use time::{
    format_date,
    format_relative_time,
};
