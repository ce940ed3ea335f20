//! Schema Module
//!
//! Reconciles the columns of an existing response log with the columns the
//! current question set wants to write.
//!
//! ## Responsibilities
//! - Read the header of an existing log
//! - Diff existing vs desired field names
//! - Rewrite the log atomically when columns are added
//! - Hand back the final field order plus filler for retained columns
//!
//! ## Column Layout After Normalization
//! ```text
//! existing:  recorded, date, mood, sleep
//! desired:   recorded, date, mood, steps
//!
//! merged:    recorded, date, mood, sleep, steps
//!            └──── existing order ─────┘  └ added, desired order
//!
//! filler:    { sleep: "" }   (retained column, no longer asked)
//! ```

mod diff;
mod normalizer;

use std::collections::BTreeMap;

use crate::response::{Response, Value};

pub use diff::SchemaDiff;
pub use normalizer::{normalize, read_header, ConfirmOverwrite};

/// A column identifier in the log
pub type FieldName = String;

/// Filler values for columns that have no real value in a row
pub type FillerMap = BTreeMap<FieldName, Value>;

/// Outcome of reconciling the desired schema with the log on disk
///
/// Produced once per run and passed to every append of that run.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationResult {
    /// Final column order to write rows in
    pub fields: Vec<FieldName>,

    /// Filler merged into every freshly collected row
    pub filler: FillerMap,
}

impl NormalizationResult {
    /// Result for a schema that needs no reconciliation
    pub fn unchanged(fields: Vec<FieldName>) -> Self {
        Self {
            fields,
            filler: FillerMap::new(),
        }
    }

    /// Lay out one set of responses as a full log row
    ///
    /// Each column takes, in order of precedence: the response value, the
    /// filler value, or an empty cell.
    pub fn build_row(&self, responses: &[Response]) -> Vec<String> {
        self.fields
            .iter()
            .map(|field| {
                responses
                    .iter()
                    .find(|r| &r.id == field)
                    .map(|r| &r.value)
                    .or_else(|| self.filler.get(field))
                    .map(Value::to_string)
                    .unwrap_or_default()
            })
            .collect()
    }
}
