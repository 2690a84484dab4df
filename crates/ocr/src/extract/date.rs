use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use super::re;

re!(re_date,
    r"(?i)\b(?:\d{4}[/.\-]\d{1,2}[/.\-]\d{1,2}|\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}|(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]{0,6}[\s,.\-]+\d{1,2}(?:st|nd|rd|th)?[\s,.\-]+\d{2,4}|\d{1,2}(?:st|nd|rd|th)?[\s,.\-]+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]{0,6}[\s,.\-]+\d{2,4})\b");
re!(re_ordinal, r"(?i)(\d{1,2})(?:st|nd|rd|th)\b");

/// A date found in the scan: the text as printed and its normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDate {
    pub raw: String,
    /// `YYYY-MM-DD` when a layout parsed, otherwise `raw` unchanged.
    pub value: String,
    pub parsed: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy)]
enum FieldOrder {
    MonthDayYear,
    YearMonthDay,
    DayMonthYear,
}

#[derive(Debug, Clone, Copy)]
enum LayoutKind {
    Numeric { order: FieldOrder, sep: char, short_year: bool },
    /// `month_first`: `Dec 05 2023` vs `05 Dec 2023`.
    Textual { month_first: bool, full_name: bool },
}

#[derive(Debug, Clone, Copy)]
struct DateLayout {
    label: &'static str,
    kind: LayoutKind,
}

const fn numeric(label: &'static str, order: FieldOrder, sep: char, short_year: bool) -> DateLayout {
    DateLayout { label, kind: LayoutKind::Numeric { order, sep, short_year } }
}

const fn textual(label: &'static str, month_first: bool, full_name: bool) -> DateLayout {
    DateLayout { label, kind: LayoutKind::Textual { month_first, full_name } }
}

// Tried in order; the first layout that yields a valid calendar date wins.
// Month-first numeric layouts precede day-first ones, so `05/12/2023` reads
// as May 12.
const DATE_LAYOUTS: &[DateLayout] = &[
    numeric("MM/DD/YYYY", FieldOrder::MonthDayYear, '/', false),
    numeric("MM-DD-YYYY", FieldOrder::MonthDayYear, '-', false),
    numeric("MM.DD.YYYY", FieldOrder::MonthDayYear, '.', false),
    numeric("YYYY-MM-DD", FieldOrder::YearMonthDay, '-', false),
    numeric("YYYY/MM/DD", FieldOrder::YearMonthDay, '/', false),
    numeric("YYYY.MM.DD", FieldOrder::YearMonthDay, '.', false),
    textual("Mon DD YYYY", true, false),
    textual("Month DD YYYY", true, true),
    textual("DD Mon YYYY", false, false),
    textual("DD Month YYYY", false, true),
    numeric("MM/DD/YY", FieldOrder::MonthDayYear, '/', true),
    numeric("MM-DD-YY", FieldOrder::MonthDayYear, '-', true),
    numeric("MM.DD.YY", FieldOrder::MonthDayYear, '.', true),
    numeric("DD/MM/YYYY", FieldOrder::DayMonthYear, '/', false),
    numeric("DD-MM-YYYY", FieldOrder::DayMonthYear, '-', false),
    numeric("DD.MM.YYYY", FieldOrder::DayMonthYear, '.', false),
    numeric("DD/MM/YY", FieldOrder::DayMonthYear, '/', true),
    numeric("DD-MM-YY", FieldOrder::DayMonthYear, '-', true),
    numeric("DD.MM.YY", FieldOrder::DayMonthYear, '.', true),
];

impl DateLayout {
    fn parse(&self, s: &str) -> Option<NaiveDate> {
        match self.kind {
            LayoutKind::Numeric { order, sep, short_year } => parse_numeric(s, order, sep, short_year),
            LayoutKind::Textual { month_first, full_name } => parse_textual(s, month_first, full_name),
        }
    }
}

/// Finds the first date-shaped substring in the scan text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> Option<ExtractedDate> {
        let raw = re_date().find(text)?.as_str().to_string();
        let parsed = normalize(&raw);
        let value = match parsed {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => {
                tracing::debug!(raw = %raw, "date matched but no layout parsed it");
                raw.clone()
            }
        };
        Some(ExtractedDate { raw, value, parsed })
    }

    /// Whether `line` contains anything shaped like a date.
    pub fn is_date_like(line: &str) -> bool {
        re_date().is_match(line)
    }
}

/// Strip ordinal suffixes and commas, then try each layout in turn.
fn normalize(raw: &str) -> Option<NaiveDate> {
    let cleaned = re_ordinal().replace_all(raw, "$1").replace(',', " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    DATE_LAYOUTS.iter().find_map(|layout| {
        let d = layout.parse(&cleaned)?;
        tracing::trace!(layout = layout.label, "date layout matched");
        Some(d)
    })
}

fn parse_numeric(s: &str, order: FieldOrder, sep: char, short_year: bool) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split(sep).collect();
    let [a, b, c] = parts.as_slice() else {
        return None;
    };
    if !parts.iter().all(|p| !p.is_empty() && p.bytes().all(|ch| ch.is_ascii_digit())) {
        return None;
    }
    let (y, m, d) = match order {
        FieldOrder::MonthDayYear => (*c, *a, *b),
        FieldOrder::YearMonthDay => (*a, *b, *c),
        FieldOrder::DayMonthYear => (*c, *b, *a),
    };
    let year_len = if short_year { 2 } else { 4 };
    if y.len() != year_len || m.len() > 2 || d.len() > 2 {
        return None;
    }
    let year: i32 = y.parse().ok()?;
    let year = if short_year { 2000 + year } else { year };
    NaiveDate::from_ymd_opt(year, m.parse().ok()?, d.parse().ok()?)
}

fn parse_textual(s: &str, month_first: bool, full_name: bool) -> Option<NaiveDate> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    let [first, second, year] = tokens.as_slice() else {
        return None;
    };
    let (month, day) = if month_first { (*first, *second) } else { (*second, *first) };

    let month = month.trim_end_matches('.');
    let month = if full_name { month_name_to_num(month)? } else { abbr_month_to_num(month)? };
    if day.is_empty() || day.len() > 2 || year.len() != 4 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day.parse().ok()?)
}

fn month_name_to_num(name: &str) -> Option<u32> {
    match name.to_lowercase().as_str() {
        "january" => Some(1), "february" => Some(2), "march" => Some(3),
        "april" => Some(4), "may" => Some(5), "june" => Some(6),
        "july" => Some(7), "august" => Some(8), "september" => Some(9),
        "october" => Some(10), "november" => Some(11), "december" => Some(12),
        _ => None,
    }
}

fn abbr_month_to_num(name: &str) -> Option<u32> {
    match name.to_lowercase().as_str() {
        "jan" => Some(1), "feb" => Some(2), "mar" => Some(3), "apr" => Some(4),
        "may" => Some(5), "jun" => Some(6), "jul" => Some(7), "aug" => Some(8),
        "sep" => Some(9), "oct" => Some(10), "nov" => Some(11), "dec" => Some(12),
        _ => None,
    }
}
