//! Parsing helpers for typed answers
//!
//! Pure functions (and one regex-holding parser) with no terminal I/O, so the
//! prompter can retry on `None` and tests can call them directly.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use regex::Regex;

/// Full-date formats tried in order
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%Y%m%d",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%A, %B %d, %Y",
];

/// Year-less formats; the reference year is appended before parsing
const MONTH_DAY_FORMATS: &[&str] = &["%B %d %Y", "%b %d %Y", "%d %B %Y", "%d %b %Y", "%m/%d %Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a calendar date the way a person would type it
///
/// `today` anchors relative words and dates typed without a year.
pub fn parse_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    match input.to_lowercase().as_str() {
        "today" => return Some(today),
        "yesterday" => return today.checked_sub_signed(Duration::days(1)),
        "tomorrow" => return today.checked_add_signed(Duration::days(1)),
        _ => {}
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            let with_year = format!("{} {}", input, today.year());
            MONTH_DAY_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(&with_year, fmt).ok())
        })
}

/// Round to a number of decimal places
///
/// Precision beyond what an `f64` can hold leaves the value as is.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals.min(i32::MAX as u32) as i32);
    let rounded = (value * scale).round() / scale;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

// =============================================================================
// Durations
// =============================================================================

/// Parses spoken-style durations into whole seconds
///
/// Accepted forms:
/// - `90` (seconds)
/// - `1:30` (minutes:seconds), `1:02:03` (hours:minutes:seconds)
/// - `1h30m`, `1.5 hours`, `2 hours, 10 mins`, `1w 2d and 3h`
pub struct DurationParser {
    clock: Regex,
    number: Regex,
    term: Regex,
}

impl DurationParser {
    pub fn new() -> Self {
        Self {
            clock: Regex::new(r"^(?:(\d+):)?(\d+):(\d{2}(?:\.\d+)?)$").expect("valid clock regex"),
            number: Regex::new(r"^\d+(?:\.\d+)?$").expect("valid number regex"),
            term: Regex::new(r"(\d+(?:\.\d+)?|\.\d+)\s*([a-z]+)").expect("valid term regex"),
        }
    }

    /// Parse `input`, returning `None` when it is not a duration
    pub fn parse(&self, input: &str) -> Option<u64> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return None;
        }

        if self.number.is_match(&input) {
            return input.parse::<f64>().ok().map(to_whole_seconds);
        }

        if let Some(caps) = self.clock.captures(&input) {
            let hours: f64 = caps.get(1).map_or(Ok(0.0), |m| m.as_str().parse()).ok()?;
            let minutes: f64 = caps[2].parse().ok()?;
            let seconds: f64 = caps[3].parse().ok()?;
            if minutes >= 60.0 && caps.get(1).is_some() {
                return None;
            }
            return Some(to_whole_seconds(hours * 3600.0 + minutes * 60.0 + seconds));
        }

        let mut total = 0.0;
        let mut matched = 0;
        for caps in self.term.captures_iter(&input) {
            let amount: f64 = caps[1].parse().ok()?;
            total += amount * unit_seconds(&caps[2])?;
            matched += 1;
        }
        if matched == 0 {
            return None;
        }

        // Anything outside the terms may only be separators
        let leftover = self.term.replace_all(&input, " ");
        let only_separators = leftover
            .split(|c: char| c == ',' || c.is_whitespace())
            .all(|word| word.is_empty() || word == "and");
        if !only_separators {
            return None;
        }

        Some(to_whole_seconds(total))
    }
}

impl Default for DurationParser {
    fn default() -> Self {
        Self::new()
    }
}

fn unit_seconds(unit: &str) -> Option<f64> {
    let seconds = match unit {
        "w" | "wk" | "wks" | "week" | "weeks" => 604_800.0,
        "d" | "dy" | "day" | "days" => 86_400.0,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3_600.0,
        "m" | "min" | "mins" | "minute" | "minutes" => 60.0,
        "s" | "sec" | "secs" | "second" | "seconds" => 1.0,
        _ => return None,
    };
    Some(seconds)
}

fn to_whole_seconds(seconds: f64) -> u64 {
    seconds.round() as u64
}
