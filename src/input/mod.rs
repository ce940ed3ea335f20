//! Input Module
//!
//! Everything between a typed line and a typed answer.
//!
//! ## Responsibilities
//! - Line-based prompting with a skip token and re-prompt on bad input
//! - Parsing dates, durations, numbers and choice answers
//! - Converting quantities between units
//!
//! Parsers that hold compiled state live in a [`ParseContext`] constructed
//! once at startup and passed down explicitly.

pub mod parse;
pub mod prompt;
pub mod units;

pub use parse::{parse_date, round_to, DurationParser};
pub use prompt::{Prompter, DEFAULT_SKIP_TOKEN};
pub use units::{Dimension, Quantity, QuantityError, UnitRegistry};

/// Shared parsing services for one run
#[derive(Default)]
pub struct ParseContext {
    pub units: UnitRegistry,
    pub durations: DurationParser,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }
}
