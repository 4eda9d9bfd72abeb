use crate::history::paths::HistoryPaths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryState {
    pub schema_version: u32,
    pub history_path: Option<String>,
    pub last_export_path: Option<String>,
    pub last_updated_epoch_secs: Option<u64>,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self {
            schema_version: 1,
            history_path: None,
            last_export_path: None,
            last_updated_epoch_secs: None,
        }
    }
}

pub fn load(paths: &HistoryPaths) -> Result<HistoryState> {
    let file = &paths.state_file;
    if !file.exists() {
        return Ok(HistoryState::default());
    }

    let raw =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    let parsed: HistoryState = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", file.display()))?;
    Ok(parsed)
}

pub fn save(paths: &HistoryPaths, state: &HistoryState) -> Result<PathBuf> {
    let file = paths.state_file.clone();
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let data = serde_json::to_string_pretty(state)?;
    fs::write(&file, format!("{data}\n"))
        .with_context(|| format!("failed to write {}", file.display()))?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::paths::paths_under;
    use tempfile::tempdir;

    #[test]
    fn missing_state_loads_defaults() {
        let tmp = tempdir().expect("tempdir");
        let paths = paths_under(tmp.path().to_path_buf());
        let state = load(&paths).expect("load");
        assert_eq!(state.schema_version, 1);
        assert!(state.history_path.is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = tempdir().expect("tempdir");
        let paths = paths_under(tmp.path().join("nested"));
        let state = HistoryState {
            history_path: Some("/data/anterior.csv".to_string()),
            ..HistoryState::default()
        };
        save(&paths, &state).expect("save");
        let loaded = load(&paths).expect("load");
        assert_eq!(loaded.history_path.as_deref(), Some("/data/anterior.csv"));
    }

    #[test]
    fn unknown_and_missing_fields_are_tolerated() {
        let tmp = tempdir().expect("tempdir");
        let paths = paths_under(tmp.path().to_path_buf());
        fs::write(&paths.state_file, "{\"history_path\":\"/x.csv\",\"extra\":1}").unwrap();
        let loaded = load(&paths).expect("load");
        assert_eq!(loaded.history_path.as_deref(), Some("/x.csv"));
        assert_eq!(loaded.schema_version, 1);
    }

    #[test]
    fn corrupt_state_is_an_error() {
        let tmp = tempdir().expect("tempdir");
        let paths = paths_under(tmp.path().to_path_buf());
        fs::write(&paths.state_file, "not json").unwrap();
        assert!(load(&paths).is_err());
    }
}
