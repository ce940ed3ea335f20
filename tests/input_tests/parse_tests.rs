//! Tests for date and duration parsing
//!
//! These tests verify:
//! - Common date spellings, relative words and year-less dates
//! - Clock, unit-sequence and bare-number durations
//! - Rejection of anything else

use chrono::NaiveDate;
use qslog::input::{parse_date, round_to, DurationParser};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2024, 3, 5)
}

// =============================================================================
// Date Tests
// =============================================================================

#[test]
fn test_parse_date_numeric_formats() {
    assert_eq!(parse_date("2024-02-29", today()), Some(date(2024, 2, 29)));
    assert_eq!(parse_date("2024/02/29", today()), Some(date(2024, 2, 29)));
    assert_eq!(parse_date("02/29/2024", today()), Some(date(2024, 2, 29)));
    assert_eq!(parse_date("20240229", today()), Some(date(2024, 2, 29)));
}

#[test]
fn test_parse_date_month_names() {
    assert_eq!(parse_date("5 March 2024", today()), Some(date(2024, 3, 5)));
    assert_eq!(parse_date("March 5, 2024", today()), Some(date(2024, 3, 5)));
    assert_eq!(parse_date("Mar 5 2024", today()), Some(date(2024, 3, 5)));
}

#[test]
fn test_parse_date_without_year_uses_current_year() {
    assert_eq!(parse_date("Feb 10", today()), Some(date(2024, 2, 10)));
    assert_eq!(parse_date("10 February", today()), Some(date(2024, 2, 10)));
}

#[test]
fn test_parse_date_datetime_keeps_date() {
    assert_eq!(parse_date("2024-03-01T22:15:00", today()), Some(date(2024, 3, 1)));
    assert_eq!(parse_date("2024-03-01 08:00", today()), Some(date(2024, 3, 1)));
}

#[test]
fn test_parse_date_relative_words() {
    assert_eq!(parse_date("today", today()), Some(today()));
    assert_eq!(parse_date("Yesterday", today()), Some(date(2024, 3, 4)));
    assert_eq!(parse_date("tomorrow", today()), Some(date(2024, 3, 6)));
}

#[test]
fn test_parse_date_rejects_garbage() {
    assert_eq!(parse_date("", today()), None);
    assert_eq!(parse_date("soon", today()), None);
    assert_eq!(parse_date("2024-02-30", today()), None);
}

// =============================================================================
// Duration Tests
// =============================================================================

#[test]
fn test_duration_bare_number_is_seconds() {
    let parser = DurationParser::new();

    assert_eq!(parser.parse("90"), Some(90));
    assert_eq!(parser.parse("1.6"), Some(2));
}

#[test]
fn test_duration_clock_forms() {
    let parser = DurationParser::new();

    assert_eq!(parser.parse("1:24"), Some(84));
    assert_eq!(parser.parse("1:02:03"), Some(3723));
    assert_eq!(parser.parse("1:75:00"), None);
}

#[test]
fn test_duration_unit_sequences() {
    let parser = DurationParser::new();

    assert_eq!(parser.parse("1h30m"), Some(5400));
    assert_eq!(parser.parse("1.5 hours"), Some(5400));
    assert_eq!(parser.parse("2 hours, 10 mins"), Some(7800));
    assert_eq!(parser.parse("1w 2d and 3h"), Some(604_800 + 172_800 + 10_800));
    assert_eq!(parser.parse("8 Hrs"), Some(28_800));
}

#[test]
fn test_duration_rejects_garbage() {
    let parser = DurationParser::new();

    assert_eq!(parser.parse(""), None);
    assert_eq!(parser.parse("a while"), None);
    assert_eq!(parser.parse("5 bananas"), None);
    assert_eq!(parser.parse("about 5 minutes"), None);
}

// =============================================================================
// Rounding Tests
// =============================================================================

#[test]
fn test_round_to_decimals() {
    assert_eq!(round_to(70.456, 2), 70.46);
    assert_eq!(round_to(70.456, 0), 70.0);
    assert_eq!(round_to(1.25, 1), 1.3);
}

#[test]
fn test_round_to_huge_precision_keeps_value() {
    assert_eq!(round_to(70.456, 400), 70.456);
    assert_eq!(round_to(70.456, u32::MAX), 70.456);
}
