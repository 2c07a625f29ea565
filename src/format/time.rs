use chrono::{
    DateTime,
    Datelike,
    NaiveDateTime,
    TimeZone,
    Timelike,
};

use super::LocaleFormat;
use crate::language::Language;

/// Long date with hours and minutes, in the language's order.
///
/// `en`: `October 14, 2026 at 05:09 PM`. `ru`: `14 октября 2026 г. в 17:09`.
/// `hy`: `14 հոկտեմբերի 2026 թ., 17:09`.
#[must_use]
pub fn format_date(datetime: &NaiveDateTime, language: Language) -> String {
    let month = LocaleFormat::of(language).month(datetime.month());
    let (day, year) = (datetime.day(), datetime.year());
    let minute = datetime.minute();

    match language {
        Language::En => {
            let (pm, hour) = datetime.hour12();
            let meridiem = if pm { "PM" } else { "AM" };
            format!("{month} {day}, {year} at {hour:02}:{minute:02} {meridiem}")
        }
        Language::Ru => {
            format!("{day} {month} {year} г. в {:02}:{minute:02}", datetime.hour())
        }
        Language::Hy => {
            format!("{day} {month} {year} թ., {:02}:{minute:02}", datetime.hour())
        }
    }
}

/// `<n> <unit> <ago>` for the largest non-zero unit among days, hours, minutes and
/// seconds. Timestamps after `now` count as zero seconds ago.
#[must_use]
pub fn format_relative_time<Tz: TimeZone>(
    timestamp: &DateTime<Tz>,
    now: &DateTime<Tz>,
    language: Language,
) -> String {
    let units = LocaleFormat::of(language).time_units;
    let seconds = now.clone().signed_duration_since(timestamp).num_seconds().max(0);
    let (minutes, hours, days) = (seconds / 60, seconds / 3600, seconds / 86_400);

    let (count, unit) = if days > 0 {
        (days, units.days)
    } else if hours > 0 {
        (hours, units.hours)
    } else if minutes > 0 {
        (minutes, units.minutes)
    } else {
        (seconds, units.seconds)
    };
    format!("{count} {unit} {}", units.ago)
}
