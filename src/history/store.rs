use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{HistoryError, HistoryResult};
use crate::history::dates;
use crate::history::record::{Column, SubmittedRow, VALUE_FIELDS, history_header};

/// Render a submitted row as a history line: `MM/DD/YY` then six values.
pub fn format_history_line(row: &SubmittedRow) -> HistoryResult<String> {
    let date = dates::to_short_year_slash(&row.date)
        .ok_or_else(|| HistoryError::InvalidDate(row.date.clone()))?;
    let values = row.values();
    let mut fields = Vec::with_capacity(VALUE_FIELDS + 1);
    fields.push(date.as_str());
    fields.extend((0..VALUE_FIELDS).map(|idx| values.get(idx).copied().unwrap_or_default()));
    Ok(fields.join(","))
}

/// Prepend submitted rows to the history text.
///
/// Output is the fixed header, then the new lines in submission order, then
/// the existing data lines in their original order. An existing header is
/// dropped so it is not repeated. Nothing is deduplicated or sorted: the same
/// date submitted twice ends up in the file twice.
pub fn update(existing: Option<&str>, new_rows: &[SubmittedRow]) -> HistoryResult<String> {
    let new_lines = new_rows
        .iter()
        .map(format_history_line)
        .collect::<HistoryResult<Vec<_>>>()?;

    let existing = existing.map(str::trim).unwrap_or_default();
    let mut existing_lines: Vec<&str> = if existing.is_empty() {
        Vec::new()
    } else {
        existing.split('\n').collect()
    };
    if existing_lines
        .first()
        .is_some_and(|line| line.starts_with(Column::Date.history_label()))
    {
        existing_lines.remove(0);
    }

    let mut out = Vec::with_capacity(1 + new_lines.len() + existing_lines.len());
    out.push(history_header());
    out.extend(new_lines);
    out.extend(existing_lines.into_iter().map(ToOwned::to_owned));
    Ok(out.join("\n"))
}

/// Read the history file, treating a missing file as absent.
///
/// Bytes that are not valid UTF-8 become U+FFFD so one damaged line cannot
/// make the rest of the file unreadable.
pub fn read_history(path: &Path) -> HistoryResult<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "history file not found");
            Ok(None)
        }
        Err(source) => Err(HistoryError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn ensure_parent(path: &Path) -> HistoryResult<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    fs::create_dir_all(parent).map_err(|source| HistoryError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })
}

/// Replace the history file with `text` via a sibling temp file.
///
/// An existing file keeps its permissions. The swap is atomic, but there is
/// no lock: two writers that each read the old file will race and the last
/// one to finish wins.
pub fn write_history(path: &Path, text: &str) -> HistoryResult<()> {
    ensure_parent(path)?;
    let write_err = |source| HistoryError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(text.as_bytes()).map_err(write_err)?;
    tmp.write_all(b"\n").map_err(write_err)?;
    match fs::metadata(path) {
        Ok(meta) => tmp
            .as_file()
            .set_permissions(meta.permissions())
            .map_err(write_err)?,
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(source) => {
            return Err(HistoryError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    }
    tmp.persist(path).map_err(|err| write_err(err.error))?;
    Ok(())
}

/// Copy a user-chosen history file into `dest`, creating its directory.
pub fn copy_history(from: &Path, dest: &Path) -> HistoryResult<()> {
    ensure_parent(dest)?;
    fs::copy(from, dest).map_err(|source| HistoryError::Copy {
        from: from.to_path_buf(),
        to: dest.to_path_buf(),
        source,
    })?;
    Ok(())
}
