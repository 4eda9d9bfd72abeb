pub mod export;
pub mod history_path;
pub mod import;
pub mod last_date;
pub mod status;
pub mod update;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::history::record::SubmittedRow;

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub ok: bool,
    pub details: Vec<String>,
    pub issues: Vec<String>,
}

impl CommandReport {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ok: true,
            details: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn detail(&mut self, text: impl Into<String>) {
        self.details.push(text.into());
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.ok = false;
        self.issues.push(text.into());
    }
}

/// Rows from an optional JSON file, followed by rows given as flags.
pub fn collect_rows(rows_file: Option<&Path>, flag_rows: &[SubmittedRow]) -> Result<Vec<SubmittedRow>> {
    let mut rows = Vec::new();
    if let Some(path) = rows_file {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let parsed: Vec<SubmittedRow> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse rows in {}", path.display()))?;
        rows.extend(parsed);
    }
    rows.extend(flag_rows.iter().cloned());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn issue_marks_report_failed() {
        let mut report = CommandReport::new("update");
        report.detail("rows=2");
        assert!(report.ok);
        report.issue("history unreadable");
        assert!(!report.ok);
        assert_eq!(report.issues, vec!["history unreadable"]);
    }

    #[test]
    fn file_rows_come_before_flag_rows() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("rows.json");
        fs::write(&path, r#"[{"data":"01/02/2024","numeros":"1,2,3,4,5,6"}]"#).unwrap();
        let flags = vec![SubmittedRow::new("02/03/2024", "7,8,9,10,11,12")];

        let rows = collect_rows(Some(&path), &flags).expect("rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "01/02/2024");
        assert_eq!(rows[1].date, "02/03/2024");
    }

    #[test]
    fn malformed_rows_file_is_an_error() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("rows.json");
        fs::write(&path, "{").unwrap();
        assert!(collect_rows(Some(&path), &[]).is_err());
    }
}
