use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Strict input formats accepted on the merge path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `MM/DD/YY`, the legacy history-file format.
    ShortYearSlash,
    /// `MM/DD/YYYY`, the format the entry form submits.
    LongYearSlash,
}

impl DateFormat {
    fn year_digits(self) -> usize {
        match self {
            Self::ShortYearSlash => 2,
            Self::LongYearSlash => 4,
        }
    }
}

/// Two-digit years pivot at 68: `00..=68` are 2000s, `69..=99` are 1900s.
fn expand_short_year(yy: i32) -> i32 {
    if yy > 68 { 1900 + yy } else { 2000 + yy }
}

/// Build a date from `M/D/Y` slash parts, expanding a short year.
fn from_slash_parts(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('/');
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    let year_raw = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let year = year_raw.parse::<i32>().ok()?;
    let year = if year_raw.len() <= 2 {
        expand_short_year(year)
    } else {
        year
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// A calendar day in canonical ISO form (`YYYY-MM-DD`).
///
/// Ordering on the wrapped date agrees with lexicographic ordering of the
/// ISO string, which is what the merge key relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalDate(NaiveDate);

#[cfg(test)]
impl CanonicalDate {
    /// Parse an already-canonical `YYYY-MM-DD` string.
    pub fn parse_iso(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if !matches_shape(raw, &[4, 2, 2], b'-') {
            return None;
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().map(Self)
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// True when `raw` is exactly digit groups of the given widths joined by `sep`.
fn matches_shape(raw: &str, widths: &[usize], sep: u8) -> bool {
    let bytes = raw.as_bytes();
    let expected = widths.iter().sum::<usize>() + widths.len() - 1;
    if bytes.len() != expected {
        return false;
    }
    let mut pos = 0usize;
    for (idx, width) in widths.iter().enumerate() {
        if idx > 0 {
            if bytes[pos] != sep {
                return false;
            }
            pos += 1;
        }
        if !bytes[pos..pos + width].iter().all(u8::is_ascii_digit) {
            return false;
        }
        pos += width;
    }
    true
}

/// Strictly convert `raw` in `format` to a canonical date.
///
/// The input must match the format exactly: zero-padded month and day, the
/// exact year width, and a real calendar day. Anything else is `None`.
pub fn to_canonical(raw: &str, format: DateFormat) -> Option<CanonicalDate> {
    let raw = raw.trim();
    if !matches_shape(raw, &[2, 2, format.year_digits()], b'/') {
        return None;
    }
    from_slash_parts(raw).map(CanonicalDate)
}

/// Render a canonical date as `DD/MM/YYYY` for spreadsheet output.
pub fn to_display(date: CanonicalDate) -> String {
    date.0.format("%d/%m/%Y").to_string()
}

const LENIENT_DATE_PATTERNS: &[&str] = &[
    "%m/%d/%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const LENIENT_DATETIME_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

fn lenient_parse(raw: &str) -> Option<NaiveDate> {
    // Short years first: `%Y` would happily read `24` as the year 24.
    if raw.rsplit_once('/').is_some_and(|(_, year)| year.len() <= 2)
        && let Some(date) = from_slash_parts(raw)
    {
        return Some(date);
    }
    for pattern in LENIENT_DATE_PATTERNS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, pattern) {
            return Some(date);
        }
    }
    let without_zone = raw.trim_end_matches('Z');
    let without_fraction = without_zone.split('.').next().unwrap_or(without_zone);
    LENIENT_DATETIME_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(without_fraction, pattern).ok())
        .map(|dt| dt.date())
}

/// Leniently parse any common calendar-date form and render it `MM/DD/YY`.
///
/// Used only when growing the history file. Unlike [`to_canonical`] this
/// accepts unpadded fields, ISO dates, and month names, so a date the merge
/// path would drop can still land in the history file.
pub fn to_short_year_slash(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let date = lenient_parse(raw)?;
    Some(format!(
        "{:02}/{:02}/{:02}",
        date.month(),
        date.day(),
        date.year().rem_euclid(100)
    ))
}
