use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::history::export::{DEFAULT_FILE_NAME, DEFAULT_SHEET_NAME};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub sheet_name: String,
    pub default_file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            default_file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HistoryConfig {
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialExportConfig {
    sheet_name: Option<String>,
    default_file_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialHistoryConfig {
    export: Option<PartialExportConfig>,
}

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

const SHEET_NAME_FORBIDDEN: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

fn validate(cfg: &HistoryConfig) -> Result<()> {
    let name = cfg.export.sheet_name.as_str();
    if name.trim().is_empty() {
        return Err(anyhow!("invalid sheet name: cannot be empty"));
    }
    if name.chars().count() > 31 {
        return Err(anyhow!("invalid sheet name: at most 31 characters"));
    }
    if name.contains(SHEET_NAME_FORBIDDEN) {
        return Err(anyhow!("invalid sheet name: cannot contain any of []:*?/\\"));
    }
    let file = cfg.export.default_file_name.as_str();
    if !file.to_ascii_lowercase().ends_with(".xlsx") || file.len() <= ".xlsx".len() {
        return Err(anyhow!("invalid default export file name: must end with .xlsx"));
    }
    Ok(())
}

fn merge_file_config(base: &mut HistoryConfig, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(path)?;
    let parsed: PartialHistoryConfig = toml::from_str(&raw)
        .map_err(|err| anyhow!("failed to parse config {}: {err}", path.display()))?;
    if let Some(export) = parsed.export {
        if let Some(sheet_name) = export.sheet_name {
            base.export.sheet_name = sheet_name;
        }
        if let Some(default_file_name) = export.default_file_name {
            base.export.default_file_name = default_file_name;
        }
    }
    Ok(())
}

/// Defaults, then the TOML file at `path` if present, then env overrides.
pub fn load_config(path: &Path) -> Result<HistoryConfig> {
    let mut cfg = HistoryConfig::default();
    merge_file_config(&mut cfg, path)?;

    cfg.export.sheet_name = env_or_string("DRAW_HISTORY_SHEET_NAME", &cfg.export.sheet_name);
    cfg.export.default_file_name = env_or_string(
        "DRAW_HISTORY_EXPORT_FILE_NAME",
        &cfg.export.default_file_name,
    );

    validate(&cfg)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_use_resultados_sheet_and_file() {
        let cfg = HistoryConfig::default();
        assert_eq!(cfg.export.sheet_name, "Resultados");
        assert_eq!(cfg.export.default_file_name, "resultados.xlsx");
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn file_values_override_defaults_field_by_field() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[export]\nsheet_name = \"Draws\"\n").expect("write config");

        let mut cfg = HistoryConfig::default();
        merge_file_config(&mut cfg, &path).expect("merge");
        assert_eq!(cfg.export.sheet_name, "Draws");
        assert_eq!(cfg.export.default_file_name, "resultados.xlsx");
    }

    #[test]
    fn missing_file_keeps_defaults() {
        let tmp = tempdir().expect("tempdir");
        let mut cfg = HistoryConfig::default();
        merge_file_config(&mut cfg, &tmp.path().join("absent.toml")).expect("merge");
        assert_eq!(cfg.export.sheet_name, "Resultados");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[export\n").expect("write config");
        let mut cfg = HistoryConfig::default();
        assert!(merge_file_config(&mut cfg, &path).is_err());
    }

    #[test]
    fn validation_rejects_bad_sheet_and_file_names() {
        let mut cfg = HistoryConfig::default();
        cfg.export.sheet_name = "a/b".to_string();
        assert!(validate(&cfg).is_err());

        cfg.export.sheet_name = "x".repeat(32);
        assert!(validate(&cfg).is_err());

        cfg.export.sheet_name = "Resultados".to_string();
        cfg.export.default_file_name = "resultados.csv".to_string();
        assert!(validate(&cfg).is_err());
    }
}
