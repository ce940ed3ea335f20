//! Log File Module
//!
//! The CSV response log: one header line, then one row per answered date.
//!
//! ## Responsibilities
//! - Append collected rows under the normalized header
//! - Create the log (with header) on first write
//! - Report which dates already have rows
//!
//! ## File Format
//! ```text
//! recorded,date,mood,sleep
//! 2024-03-05,2024-03-05,2,27000
//! 2024-03-06,2024-03-05,,
//! ```
//! Cells are positionally aligned to the header; empty cells are skips or
//! filler.

mod reader;
mod writer;

pub use reader::{last_logged_date, logged_dates};
pub use writer::append_rows;
