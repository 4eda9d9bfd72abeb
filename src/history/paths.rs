use anyhow::Result;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct HistoryPaths {
    pub home: PathBuf,
    pub internal_history: PathBuf,
    pub state_file: PathBuf,
    pub logs_dir: PathBuf,
    pub config_file: PathBuf,
}

fn default_home() -> Result<PathBuf> {
    if let Some(data) = dirs::data_dir() {
        return Ok(data.join("draw-history"));
    }
    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".draw-history"));
    }
    Err(anyhow::anyhow!("data directory could not be resolved"))
}

fn env_or_default_path(var: &str, fallback: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => fallback,
    }
}

pub fn resolve_paths() -> Result<HistoryPaths> {
    let home = match env::var("DRAW_HISTORY_HOME") {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => default_home()?,
    };
    Ok(paths_under(home))
}

/// Lay out every path below `home`, honouring per-path env overrides.
pub fn paths_under(home: PathBuf) -> HistoryPaths {
    let internal_history = env_or_default_path("DRAW_HISTORY_FILE", home.join("anterior.csv"));
    let state_file = env_or_default_path("DRAW_HISTORY_STATE_FILE", home.join("state.json"));
    let logs_dir = env_or_default_path("DRAW_HISTORY_LOGS_DIR", home.join("logs"));
    let config_file = env_or_default_path("DRAW_HISTORY_CONFIG_PATH", home.join("config.toml"));

    HistoryPaths {
        home,
        internal_history,
        state_file,
        logs_dir,
        config_file,
    }
}
