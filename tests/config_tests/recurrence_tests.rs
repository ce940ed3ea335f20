//! Tests for question frequencies

use chrono::NaiveDate;
use qslog::recurrence::Recurrence;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// 2024-03-04 is a Monday
fn monday() -> NaiveDate {
    date(2024, 3, 4)
}

#[test]
fn test_daily_is_always_due() {
    let recurrence: Recurrence = "daily".parse().unwrap();

    assert_eq!(recurrence, Recurrence::Daily);
    assert!(recurrence.is_due(monday()));
    assert!(recurrence.is_due(date(2024, 12, 25)));
}

#[test]
fn test_weekdays_and_weekends() {
    let weekdays: Recurrence = "weekdays".parse().unwrap();
    let weekends: Recurrence = "Weekends".parse().unwrap();
    let saturday = date(2024, 3, 9);

    assert!(weekdays.is_due(monday()));
    assert!(!weekdays.is_due(saturday));
    assert!(!weekends.is_due(monday()));
    assert!(weekends.is_due(saturday));
}

#[test]
fn test_weekday_list() {
    let recurrence: Recurrence = "mon, Thursday".parse().unwrap();

    assert!(recurrence.is_due(monday()));
    assert!(!recurrence.is_due(date(2024, 3, 5)));
    assert!(recurrence.is_due(date(2024, 3, 7)));
    assert_eq!(recurrence.to_string(), "mon, thu");
}

#[test]
fn test_monthly_days() {
    let recurrence: Recurrence = "monthly 1, 15".parse().unwrap();

    assert!(recurrence.is_due(date(2024, 3, 1)));
    assert!(recurrence.is_due(date(2024, 4, 15)));
    assert!(!recurrence.is_due(date(2024, 3, 2)));
    assert_eq!(recurrence.to_string(), "monthly 1, 15");
}

#[test]
fn test_interval_from_anchor() {
    let recurrence: Recurrence = "every 3 days from 2024-03-01".parse().unwrap();

    assert!(recurrence.is_due(date(2024, 3, 1)));
    assert!(!recurrence.is_due(date(2024, 3, 2)));
    assert!(recurrence.is_due(date(2024, 3, 4)));
    assert!(!recurrence.is_due(date(2024, 2, 27)));
}

#[test]
fn test_invalid_expressions() {
    for expr in [
        "monthly",
        "monthly 0",
        "monthly 32",
        "every 0 days from 2024-01-01",
        "every 3 days",
        "every 3 days from yesterday",
        "mon, funday",
    ] {
        assert!(expr.parse::<Recurrence>().is_err(), "accepted '{}'", expr);
    }
}
