//! Display formatters for byte counts and backend timestamps.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use std::fmt;
use std::str::FromStr;

use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const BYTE_STEP: f64 = 1024.0;

/// Human-readable byte size using binary steps, e.g. `1536` → `"1.5 KB"`.
///
/// Picks the largest unit (up to TB) whose scaled value is at least 1 and
/// rounds to two decimals, dropping trailing zeros. Zero, negative and
/// non-finite input render as `"0 B"`.
#[must_use]
pub fn format_bytes(bytes: f64) -> String {
    if !bytes.is_finite() || bytes <= 0.0 {
        return "0 B".to_owned();
    }
    let mut scaled = bytes;
    let mut unit = 0;
    while scaled >= BYTE_STEP && unit < BYTE_UNITS.len() - 1 {
        scaled /= BYTE_STEP;
        unit += 1;
    }
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{rounded} {}", BYTE_UNITS[unit])
}

// =============================================================================
// LOCALES
// =============================================================================

/// Calendar layouts for [`format_time`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    /// `2024/01/05 09:03:07`
    #[default]
    ZhCn,
    /// `2024/01/05 09:03:07`
    JaJp,
    /// `01/05/2024, 09:03:07 AM`
    EnUs,
    /// `05/01/2024, 09:03:07`
    EnGb,
    /// `05.01.2024, 09:03:07`
    DeDe,
}

impl Locale {
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::JaJp => "ja-JP",
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
            Self::DeDe => "de-DE",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale `{0}` (expected zh-CN, ja-JP, en-US, en-GB or de-DE)")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    /// Accepts BCP-47 tags case-insensitively, with `-` or `_`, and bare
    /// language codes (`en` means `en-US`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "zh-cn" | "zh" => Ok(Self::ZhCn),
            "ja-jp" | "ja" => Ok(Self::JaJp),
            "en-us" | "en" => Ok(Self::EnUs),
            "en-gb" => Ok(Self::EnGb),
            "de-de" | "de" => Ok(Self::DeDe),
            _ => Err(UnknownLocale(s.to_owned())),
        }
    }
}

// =============================================================================
// TIMESTAMPS
// =============================================================================

/// Render `timestamp` in its own offset using the locale's calendar layout.
///
/// Month, day, hour, minute and second are always two digits; the year is
/// numeric.
#[must_use]
pub fn format_time(timestamp: OffsetDateTime, locale: Locale) -> String {
    let (year, month, day) = (timestamp.year(), u8::from(timestamp.month()), timestamp.day());
    let (hour, minute, second) = (timestamp.hour(), timestamp.minute(), timestamp.second());
    match locale {
        Locale::ZhCn | Locale::JaJp => format!("{year}/{month:02}/{day:02} {hour:02}:{minute:02}:{second:02}"),
        Locale::EnUs => {
            let (hour12, meridiem) = match hour {
                0 => (12, "AM"),
                1..=11 => (hour, "AM"),
                12 => (12, "PM"),
                _ => (hour - 12, "PM"),
            };
            format!("{month:02}/{day:02}/{year}, {hour12:02}:{minute:02}:{second:02} {meridiem}")
        }
        Locale::EnGb => format!("{day:02}/{month:02}/{year}, {hour:02}:{minute:02}:{second:02}"),
        Locale::DeDe => format!("{day:02}.{month:02}.{year}, {hour:02}:{minute:02}:{second:02}"),
    }
}

const NAIVE_T: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");
const NAIVE_SPACE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]");
const DATE_ONLY: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse a timestamp as the backend emits it.
///
/// Accepts RFC 3339, naive ISO-8601 date-times (`T` or space separated,
/// optional fraction), bare dates, and integer epoch milliseconds. Naive
/// forms carry no offset and are read as UTC, which is what the backend
/// writes.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(millis) = raw.parse::<i64>() {
        return OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok();
    }
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }
    for description in [NAIVE_T, NAIVE_SPACE] {
        if let Ok(naive) = PrimitiveDateTime::parse(raw, description) {
            return Some(naive.assume_utc());
        }
    }
    if let Ok(date) = Date::parse(raw, DATE_ONLY) {
        return Some(date.midnight().assume_utc());
    }
    None
}

/// Parse `raw`, shift it to `offset`, and format it for `locale`.
///
/// Returns `None` when `raw` is not a recognizable timestamp.
#[must_use]
pub fn format_timestamp(raw: &str, locale: Locale, offset: UtcOffset) -> Option<String> {
    parse_timestamp(raw).map(|ts| format_time(ts.to_offset(offset), locale))
}

/// The machine's UTC offset, or UTC when it cannot be determined (as on
/// multi-threaded Unix processes).
#[must_use]
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}
