use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::error::{HistoryError, HistoryResult, Outcome};
use crate::history::config::{self, HistoryConfig};
use crate::history::dates::CanonicalDate;
use crate::history::decode::decode;
use crate::history::export;
use crate::history::merge::{RecordSet, merge};
use crate::history::paths::{self, HistoryPaths};
use crate::history::prompt::SavePrompt;
use crate::history::record::{Record, SubmittedRow};
use crate::history::state::{self, HistoryState};
use crate::history::store;

/// Everything an operation needs to know about where things live.
///
/// Loaded once per invocation and passed explicitly to each operation; the
/// persisted history path only changes through [`HistoryContext::set_history_path`].
#[derive(Debug, Clone)]
pub struct HistoryContext {
    pub paths: HistoryPaths,
    pub config: HistoryConfig,
    pub state: HistoryState,
}

impl HistoryContext {
    pub fn load() -> Result<Self> {
        Self::load_from(paths::resolve_paths()?)
    }

    pub fn load_from(paths: HistoryPaths) -> Result<Self> {
        let config = config::load_config(&paths.config_file)?;
        let state = state::load(&paths)?;
        Ok(Self {
            paths,
            config,
            state,
        })
    }

    /// The persisted history path, if one was ever recorded.
    pub fn history_path(&self) -> Option<PathBuf> {
        self.state
            .history_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    }

    /// The file the merge pipeline reads: persisted path, else the internal file.
    pub fn history_file(&self) -> PathBuf {
        self.history_path()
            .unwrap_or_else(|| self.paths.internal_history.clone())
    }

    pub fn set_history_path(&mut self, path: &Path) -> Result<PathBuf> {
        self.state.history_path = Some(path.display().to_string());
        state::save(&self.paths, &self.state)
    }

    pub fn remember_export(&mut self, path: &Path) -> Result<PathBuf> {
        self.state.last_export_path = Some(path.display().to_string());
        state::save(&self.paths, &self.state)
    }

    pub fn remember_update(&mut self, epoch_secs: u64) -> Result<PathBuf> {
        self.state.last_updated_epoch_secs = Some(epoch_secs);
        state::save(&self.paths, &self.state)
    }
}

fn load_records(history_file: &Path) -> HistoryResult<Vec<Record>> {
    Ok(store::read_history(history_file)?
        .map(|text| decode(&text))
        .unwrap_or_default())
}

/// Merge the stored history with `rows` and save a sorted spreadsheet.
///
/// Rejects an empty `rows` before reading anything or prompting. Submitted
/// rows without a strict `MM/DD/YYYY` date are left out of the export.
pub fn export_results(
    history_file: &Path,
    config: &HistoryConfig,
    rows: &[SubmittedRow],
    prompt: &mut dyn SavePrompt,
) -> HistoryResult<Outcome<PathBuf>> {
    if rows.is_empty() {
        return Err(HistoryError::MissingInput);
    }

    let previous = load_records(history_file)?;
    let incoming: Vec<Record> = rows.iter().filter_map(SubmittedRow::to_record).collect();
    if incoming.len() < rows.len() {
        debug!(
            dropped = rows.len() - incoming.len(),
            "submitted rows without a strict MM/DD/YYYY date left out of export"
        );
    }
    let previous_count = previous.len();
    let merged = merge(previous, incoming);
    let sheet = export::export(&config.export.sheet_name, &merged)?;

    let Some(target) = prompt.choose_save_path(&config.export.default_file_name)? else {
        info!("export cancelled at save prompt");
        return Ok(Outcome::Cancelled);
    };
    export::write_workbook(&sheet, &target)?;
    info!(
        path = %target.display(),
        previous = previous_count,
        rows = sheet.rows.len(),
        "spreadsheet exported"
    );
    Ok(Outcome::Completed(target))
}

/// Prepend `rows` to the history file at `history_file`, creating it if needed.
pub fn update_history(history_file: &Path, rows: &[SubmittedRow]) -> HistoryResult<PathBuf> {
    if rows.is_empty() {
        return Err(HistoryError::MissingInput);
    }

    let existing = store::read_history(history_file)?;
    let text = store::update(existing.as_deref(), rows)?;
    store::write_history(history_file, &text)?;
    info!(path = %history_file.display(), added = rows.len(), "history file updated");
    Ok(history_file.to_path_buf())
}

/// Latest valid draw date in the file at `path`; absent when the file is
/// missing or has no valid rows.
pub fn last_recorded_date(path: &Path) -> HistoryResult<Option<CanonicalDate>> {
    let mut set = RecordSet::new();
    set.extend(load_records(path)?);
    if set.is_empty() {
        warn!(path = %path.display(), "no valid rows found in history file");
        return Ok(None);
    }
    debug!(path = %path.display(), dates = set.len(), "history file scanned");
    Ok(set.latest_date())
}

/// Copy a chosen history file over the internal history file.
pub fn import_history(source: &Path, internal: &Path) -> HistoryResult<PathBuf> {
    store::copy_history(source, internal)?;
    info!(from = %source.display(), to = %internal.display(), "history file imported");
    Ok(internal.to_path_buf())
}
