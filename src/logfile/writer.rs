//! Log Writer
//!
//! Appends rows to the response log.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::info;

use crate::error::{QsError, Result};
use crate::response::Response;
use crate::schema::NormalizationResult;

/// Append one row per response set
///
/// Writes the header first when the log does not exist yet. Every row is laid
/// out by `normalization`, so it always matches the header on disk.
///
/// Returns the number of rows written.
pub fn append_rows(
    path: &Path,
    normalization: &NormalizationResult,
    rows: &[Vec<Response>],
) -> Result<usize> {
    let is_new = !path.exists();
    if is_new {
        create_parent_dirs(path)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)?;

    // A hand-edited log may lack its final newline
    if !is_new && !ends_with_newline(&mut file)? {
        file.write_all(b"\n")?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if is_new {
        writer.write_record(&normalization.fields)?;
    }
    for responses in rows {
        writer.write_record(normalization.build_row(responses))?;
    }

    let file = writer
        .into_inner()
        .map_err(|e| QsError::Io(e.into_error()))?;
    file.sync_all()?;

    info!(path = %path.display(), rows = rows.len(), "appended rows to log");
    Ok(rows.len())
}

fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn ends_with_newline(file: &mut File) -> Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
