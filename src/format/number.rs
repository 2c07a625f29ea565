use super::LocaleFormat;
use crate::language::Language;

/// Largest unit [`format_file_size`] scales to (GB).
const MAX_SIZE_UNIT: usize = 3;

/// `|value| * scale`, rounded half away from zero. Saturates on overflow.
#[allow(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn scaled_abs(value: f64, scale: u32) -> u128 {
    (value.abs() * f64::from(scale)).round() as u128
}

/// Integer digits with a separator every three places.
fn group_digits(mut value: u128, separator: &str) -> String {
    let mut groups = Vec::new();
    while value >= 1000 {
        groups.push(format!("{:03}", value % 1000));
        value /= 1000;
    }
    groups.push(value.to_string());
    groups.reverse();
    groups.join(separator)
}

/// Renders `value` (in units of `10^-digits`) with the locale's separators.
fn format_fixed(value: u128, digits: u32, trim: bool, locale: &LocaleFormat) -> String {
    let scale = 10_u128.pow(digits);
    let integer = group_digits(value / scale, locale.group_separator);
    if digits == 0 {
        return integer;
    }

    let width = usize::try_from(digits).unwrap_or_default();
    let fraction = format!("{:0width$}", value % scale);
    let fraction = if trim { fraction.trim_end_matches('0') } else { fraction.as_str() };
    if fraction.is_empty() {
        integer
    } else {
        format!("{integer}{}{fraction}", locale.decimal_separator)
    }
}

/// Non-finite values, spelled the way `Intl.NumberFormat` spells them.
fn non_finite(value: f64) -> Option<String> {
    if value.is_nan() {
        Some("NaN".to_string())
    } else if value.is_infinite() {
        Some(if value < 0.0 { "-∞" } else { "∞" }.to_string())
    } else {
        None
    }
}

/// Grouped number with up to three fraction digits (`1,234.5`, `1 234,5`).
#[must_use]
pub fn format_number(value: f64, language: Language) -> String {
    if let Some(special) = non_finite(value) {
        return special;
    }
    let locale = LocaleFormat::of(language);
    let thousandths = scaled_abs(value, 1000);
    let sign = if value < 0.0 && thousandths != 0 { "-" } else { "" };
    format!("{sign}{}", format_fixed(thousandths, 3, true, locale))
}

/// Amount in the language's currency with two fraction digits.
///
/// `en` → `$1,234.56`, `ru` → `1 234,56 ₽`, `hy` → `1 234,56 ֏`.
#[must_use]
pub fn format_currency(amount: f64, language: Language) -> String {
    if let Some(special) = non_finite(amount) {
        return special;
    }
    let locale = LocaleFormat::of(language);
    let cents = scaled_abs(amount, 100);
    let sign = if amount < 0.0 && cents != 0 { "-" } else { "" };
    let number = format_fixed(cents, 2, false, locale);
    let currency = locale.currency;

    if currency.symbol_first {
        format!("{sign}{}{number}", currency.symbol)
    } else {
        format!("{sign}{number}\u{a0}{}", currency.symbol)
    }
}

/// ISO 4217 code of the language's currency.
#[must_use]
pub const fn currency_for(language: Language) -> &'static str {
    LocaleFormat::of(language).currency.code
}

/// Zero-size label, shared by every language.
const ZERO_SIZE: &str = "0 Bytes";

/// Byte count in binary units up to GB, rounded to two decimals.
///
/// Zero is always `0 Bytes`, whatever the language.
///
/// ```
/// use estate_dashboard_shell::format::format_file_size;
/// use estate_dashboard_shell::language::Language;
///
/// assert_eq!(format_file_size(0, Language::Ru), "0 Bytes");
/// assert_eq!(format_file_size(1536, Language::Ru), "1.5 КБ");
/// ```
#[must_use]
pub fn format_file_size(bytes: u64, language: Language) -> String {
    if bytes == 0 {
        return ZERO_SIZE.to_string();
    }
    let labels = LocaleFormat::of(language).size_labels;
    let label = |unit: usize| labels.get(unit).copied().unwrap_or_default();

    let bytes = u128::from(bytes);
    let mut unit = 0;
    let mut divisor: u128 = 1;
    while unit < MAX_SIZE_UNIT && bytes >= divisor * 1024 {
        divisor *= 1024;
        unit += 1;
    }

    let hundredths = (bytes * 100 + divisor / 2) / divisor;
    let integer = hundredths / 100;
    let fraction = format!("{:02}", hundredths % 100);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{integer} {}", label(unit))
    } else {
        format!("{integer}.{fraction} {}", label(unit))
    }
}
