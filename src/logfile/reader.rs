//! Log Reader
//!
//! Reads back which dates the log already covers.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDate;

use crate::config::DATE_FIELD;
use crate::error::Result;

/// Every date in the log's `date` column
///
/// A missing log, a log without a `date` column, and cells that are not
/// `YYYY-MM-DD` all contribute nothing.
pub fn logged_dates(path: &Path) -> Result<BTreeSet<NaiveDate>> {
    let mut dates = BTreeSet::new();
    if !path.is_file() {
        return Ok(dates);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let column = match reader.headers()?.iter().position(|h| h == DATE_FIELD) {
        Some(column) => column,
        None => return Ok(dates),
    };

    for record in reader.records() {
        let record = record?;
        if let Some(date) = record
            .get(column)
            .and_then(|cell| NaiveDate::parse_from_str(cell, "%Y-%m-%d").ok())
        {
            dates.insert(date);
        }
    }

    Ok(dates)
}

/// Latest date in the log's `date` column
pub fn last_logged_date(path: &Path) -> Result<Option<NaiveDate>> {
    Ok(logged_dates(path)?.into_iter().next_back())
}
