//! Schema Normalizer
//!
//! Brings an existing log in line with the desired field list without ever
//! discarding a column.
//!
//! ## Rewrite Protocol
//! 1. Read the header only and diff it against the desired fields
//! 2. Nothing to do: return immediately, file untouched
//! 3. Ask for confirmation (optional)
//! 4. Stream every row into a temp file in the same directory, padding added
//!    columns with empty cells
//! 5. fsync the temp file, then rename it over the log
//!
//! Until step 5 completes the log at the canonical path is the original.

use std::fs;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{QsError, Result};
use crate::response::Value;

use super::{FieldName, FillerMap, NormalizationResult, SchemaDiff};

/// Hook asked before a structural rewrite of the log
pub trait ConfirmOverwrite {
    /// Return `Ok(false)` to abandon the rewrite (and the run)
    fn confirm_overwrite(&mut self, path: &Path, diff: &SchemaDiff) -> Result<bool>;
}

impl<F> ConfirmOverwrite for F
where
    F: FnMut(&Path, &SchemaDiff) -> Result<bool>,
{
    fn confirm_overwrite(&mut self, path: &Path, diff: &SchemaDiff) -> Result<bool> {
        self(path, diff)
    }
}

/// Reconcile the log at `path` with `desired`
///
/// Returns:
/// - `Ok(Some(result))`: field order and filler to write with
/// - `Ok(None)`: the confirmation hook declined; the log is untouched
pub fn normalize(
    path: &Path,
    desired: &[FieldName],
    confirm: Option<&mut dyn ConfirmOverwrite>,
) -> Result<Option<NormalizationResult>> {
    ensure_unique(desired)?;

    if !path.is_file() {
        debug!(path = %path.display(), "log does not exist yet, nothing to normalize");
        return Ok(Some(NormalizationResult::unchanged(desired.to_vec())));
    }

    let existing = read_header(path)?;
    let diff = SchemaDiff::compute(&existing, desired);

    if diff.is_empty() {
        debug!(path = %path.display(), "log header already matches");
        return Ok(Some(NormalizationResult::unchanged(existing)));
    }

    warn!(
        path = %path.display(),
        unique_to_existing = %diff.removed.join(", "),
        unique_to_desired = %diff.added.join(", "),
        "log header differs from configured questions"
    );

    if let Some(confirm) = confirm {
        if !confirm.confirm_overwrite(path, &diff)? {
            info!(path = %path.display(), "normalization declined");
            return Ok(None);
        }
    }

    let merged = diff.merged(&existing);
    if !diff.added.is_empty() {
        rewrite(path, &merged, existing.len(), diff.added.len())?;
        info!(
            path = %path.display(),
            added = diff.added.len(),
            "log rewritten with new columns"
        );
    }

    let filler: FillerMap = diff
        .removed
        .iter()
        .map(|field| (field.clone(), Value::Null))
        .collect();

    Ok(Some(NormalizationResult {
        fields: merged,
        filler,
    }))
}

/// Read the header row of an existing log
///
/// An empty file, unreadable CSV, or a header with empty or repeated names
/// is reported as `MalformedHeader`.
pub fn read_header(path: &Path) -> Result<Vec<FieldName>> {
    let malformed = |reason: String| QsError::MalformedHeader {
        path: path.display().to_string(),
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let record = match reader.records().next() {
        Some(Ok(record)) => record,
        Some(Err(e)) => return Err(malformed(e.to_string())),
        None => return Err(malformed("file has no header row".to_string())),
    };

    let header: Vec<FieldName> = record.iter().map(str::to_string).collect();
    if header.iter().any(String::is_empty) {
        return Err(malformed("empty column name".to_string()));
    }
    ensure_unique(&header).map_err(|e| malformed(e.to_string()))?;

    Ok(header)
}

// =============================================================================
// Private Helpers
// =============================================================================

fn ensure_unique(fields: &[FieldName]) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for field in fields {
        if !seen.insert(field.as_str()) {
            return Err(QsError::Schema(format!("duplicate field name '{}'", field)));
        }
    }
    Ok(())
}

/// Copy every row into a sibling temp file under the merged header, then
/// rename it over `path`. The temp file is removed if anything fails.
fn rewrite(path: &Path, merged: &[FieldName], width: usize, added: usize) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = NamedTempFile::new_in(dir)?;

    {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)?;
        let mut writer = csv::Writer::from_writer(temp.as_file());

        writer.write_record(merged)?;
        for record in reader.records() {
            let record = record.map_err(|e| row_error(path, width, e))?;
            writer.write_record(record.iter().chain(std::iter::repeat("").take(added)))?;
        }
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    fs::set_permissions(temp.path(), fs::metadata(path)?.permissions())?;
    temp.persist(path).map_err(|e| QsError::Io(e.error))?;

    Ok(())
}

fn row_error(path: &Path, width: usize, error: csv::Error) -> QsError {
    match error.kind() {
        csv::ErrorKind::UnequalLengths { pos, len, .. } => QsError::MalformedRow {
            path: path.display().to_string(),
            line: pos.as_ref().map(|p| p.line()).unwrap_or_default(),
            expected: width,
            found: *len as usize,
        },
        _ => QsError::Csv(error),
    }
}
