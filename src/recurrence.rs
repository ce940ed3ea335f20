//! Recurrence
//!
//! Decides whether a question is due on a given date.
//!
//! ## Expressions
//! ```text
//! daily                         every day (default)
//! weekdays                      Monday to Friday
//! weekends                      Saturday and Sunday
//! mon, wed, fri                 listed weekdays (short or full names)
//! monthly 1, 15                 listed days of the month
//! every 3 days from 2024-01-01  fixed interval from an anchor date
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;

use crate::error::QsError;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A parsed recurrence expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Recurrence {
    #[default]
    Daily,
    /// Due on any of these weekdays (Monday = 0)
    Weekdays(BTreeSet<u32>),
    /// Due on any of these days of the month
    MonthDays(BTreeSet<u32>),
    /// Due every `days` days counted from `anchor`
    Interval { days: u32, anchor: NaiveDate },
}

impl Recurrence {
    /// Is a question with this recurrence due on `date`?
    pub fn is_due(&self, date: NaiveDate) -> bool {
        match self {
            Recurrence::Daily => true,
            Recurrence::Weekdays(days) => days.contains(&date.weekday().num_days_from_monday()),
            Recurrence::MonthDays(days) => days.contains(&date.day()),
            Recurrence::Interval { days, anchor } => {
                let elapsed = (date - *anchor).num_days();
                elapsed >= 0 && elapsed % i64::from(*days) == 0
            }
        }
    }
}

impl FromStr for Recurrence {
    type Err = QsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expr = s.trim().to_lowercase();
        let invalid = |reason: &str| {
            QsError::Config(format!("invalid frequency '{}': {}", s.trim(), reason))
        };

        match expr.as_str() {
            "" | "daily" | "every day" | "always" => return Ok(Recurrence::Daily),
            "weekdays" => return Ok(Recurrence::Weekdays((0..5).collect())),
            "weekends" => return Ok(Recurrence::Weekdays((5..7).collect())),
            _ => {}
        }

        if let Some(rest) = expr.strip_prefix("monthly") {
            let days = split_list(rest)
                .map(|d| match d.parse::<u32>() {
                    Ok(n) if (1..=31).contains(&n) => Ok(n),
                    _ => Err(invalid("days of month must be 1-31")),
                })
                .collect::<Result<BTreeSet<_>, _>>()?;
            if days.is_empty() {
                return Err(invalid("no days of month given"));
            }
            return Ok(Recurrence::MonthDays(days));
        }

        if let Some(rest) = expr.strip_prefix("every ") {
            let (count, anchor) = rest
                .split_once(" from ")
                .ok_or_else(|| invalid("expected 'every <n> days from <YYYY-MM-DD>'"))?;
            let days = count
                .trim()
                .strip_suffix("days")
                .or_else(|| count.trim().strip_suffix("day"))
                .and_then(|n| n.trim().parse::<u32>().ok())
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid("interval must be a positive number of days"))?;
            let anchor = NaiveDate::parse_from_str(anchor.trim(), "%Y-%m-%d")
                .map_err(|_| invalid("anchor must be YYYY-MM-DD"))?;
            return Ok(Recurrence::Interval { days, anchor });
        }

        let days = split_list(&expr)
            .map(|d| {
                d.parse::<Weekday>()
                    .map(|w| w.num_days_from_monday())
                    .map_err(|_| invalid("unknown weekday"))
            })
            .collect::<Result<BTreeSet<_>, _>>()?;
        if days.is_empty() {
            return Err(invalid("no weekdays given"));
        }
        Ok(Recurrence::Weekdays(days))
    }
}

impl TryFrom<String> for Recurrence {
    type Error = QsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::Daily => f.write_str("daily"),
            Recurrence::Weekdays(days) => {
                let names: Vec<String> = days
                    .iter()
                    .filter_map(|d| WEEKDAYS.get(*d as usize))
                    .map(|w| w.to_string().to_lowercase())
                    .collect();
                f.write_str(&names.join(", "))
            }
            Recurrence::MonthDays(days) => {
                let days: Vec<String> = days.iter().map(u32::to_string).collect();
                write!(f, "monthly {}", days.join(", "))
            }
            Recurrence::Interval { days, anchor } => {
                write!(f, "every {} days from {}", days, anchor.format("%Y-%m-%d"))
            }
        }
    }
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|p| !p.is_empty())
}
