use crate::language::Language;

/// Formatting conventions of one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleFormat {
    pub group_separator: &'static str,
    pub decimal_separator: &'static str,
    pub currency: CurrencyFormat,
    /// Month names as used in a full date (genitive where the language needs it).
    pub months: [&'static str; 12],
    pub time_units: TimeUnits,
    /// Labels for bytes, KB, MB and GB.
    pub size_labels: [&'static str; 4],
    pub ellipsis: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// ISO 4217 code
    pub code: &'static str,
    pub symbol: &'static str,
    /// `$1.00` rather than `1,00 ₽`
    pub symbol_first: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnits {
    pub seconds: &'static str,
    pub minutes: &'static str,
    pub hours: &'static str,
    pub days: &'static str,
    pub ago: &'static str,
}

/// No-break space, the grouping separator for `hy` and `ru`.
const NBSP: &str = "\u{a0}";

/// `en-US`
const ENGLISH: LocaleFormat = LocaleFormat {
    group_separator: ",",
    decimal_separator: ".",
    currency: CurrencyFormat { code: "USD", symbol: "$", symbol_first: true },
    months: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    time_units: TimeUnits {
        seconds: "seconds",
        minutes: "minutes",
        hours: "hours",
        days: "days",
        ago: "ago",
    },
    size_labels: ["Bytes", "KB", "MB", "GB"],
    ellipsis: "...",
};

/// `ru-RU`
const RUSSIAN: LocaleFormat = LocaleFormat {
    group_separator: NBSP,
    decimal_separator: ",",
    currency: CurrencyFormat { code: "RUB", symbol: "₽", symbol_first: false },
    months: [
        "января",
        "февраля",
        "марта",
        "апреля",
        "мая",
        "июня",
        "июля",
        "августа",
        "сентября",
        "октября",
        "ноября",
        "декабря",
    ],
    time_units: TimeUnits {
        seconds: "секунд",
        minutes: "минут",
        hours: "часов",
        days: "дней",
        ago: "назад",
    },
    size_labels: ["Байт", "КБ", "МБ", "ГБ"],
    ellipsis: "...",
};

/// `hy-AM`
const ARMENIAN: LocaleFormat = LocaleFormat {
    group_separator: NBSP,
    decimal_separator: ",",
    currency: CurrencyFormat { code: "AMD", symbol: "֏", symbol_first: false },
    months: [
        "հունվարի",
        "փետրվարի",
        "մարտի",
        "ապրիլի",
        "մայիսի",
        "հունիսի",
        "հուլիսի",
        "օգոստոսի",
        "սեպտեմբերի",
        "հոկտեմբերի",
        "նոյեմբերի",
        "դեկտեմբերի",
    ],
    time_units: TimeUnits {
        seconds: "վայրկյան",
        minutes: "րոպե",
        hours: "ժամ",
        days: "օր",
        ago: "առաջ",
    },
    size_labels: ["Բայթ", "ԿԲ", "ՄԲ", "ԳԲ"],
    ellipsis: "...",
};

impl LocaleFormat {
    #[must_use]
    pub const fn of(language: Language) -> &'static Self {
        match language {
            Language::Hy => &ARMENIAN,
            Language::En => &ENGLISH,
            Language::Ru => &RUSSIAN,
        }
    }

    /// Month name for a 1-based month number.
    #[must_use]
    pub fn month(&self, month: u32) -> &'static str {
        month
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .and_then(|index| self.months.get(index))
            .copied()
            .unwrap_or_default()
    }
}
