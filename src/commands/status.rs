use anyhow::Result;
use std::env;

use crate::commands::CommandReport;
use crate::history::ops::{self, HistoryContext};

include!(concat!(env!("OUT_DIR"), "/draw_history_env_allowlist.rs"));

fn set_env_overrides() -> Vec<&'static str> {
    GENERATED_DRAW_HISTORY_ENV_ALLOWLIST
        .iter()
        .copied()
        .filter(|key| env::var(key).is_ok_and(|v| !v.trim().is_empty()))
        .collect()
}

pub fn run(ctx: &HistoryContext) -> Result<CommandReport> {
    let mut report = CommandReport::new("status");
    let history_file = ctx.history_file();

    report.detail(format!("home={}", ctx.paths.home.display()));
    report.detail(format!("internal_history={}", ctx.paths.internal_history.display()));
    report.detail(format!("history_file={}", history_file.display()));
    report.detail(format!("state_file={}", ctx.paths.state_file.display()));
    report.detail(format!("config_file={}", ctx.paths.config_file.display()));
    report.detail(format!("logs_dir={}", ctx.paths.logs_dir.display()));
    report.detail(format!("sheet_name={}", ctx.config.export.sheet_name));
    report.detail(format!(
        "default_export_file={}",
        ctx.config.export.default_file_name
    ));
    if let Some(last) = &ctx.state.last_export_path {
        report.detail(format!("last_export_path={last}"));
    }
    if let Some(at) = ctx.state.last_updated_epoch_secs {
        report.detail(format!("last_updated_epoch_secs={at}"));
    }

    let overrides = set_env_overrides();
    if !overrides.is_empty() {
        report.detail(format!("env_overrides={}", overrides.join(",")));
    }

    if !history_file.exists() {
        report.issue(format!(
            "history file missing ({}); run `import` or `update` first",
            history_file.display()
        ));
        return Ok(report);
    }

    match ops::last_recorded_date(&history_file) {
        Ok(Some(date)) => report.detail(format!("last_date={date}")),
        Ok(None) => report.issue("history file has no valid rows"),
        Err(err) => report.issue(format!(
            "history file unreadable: {:#}",
            anyhow::Error::new(err)
        )),
    }

    Ok(report)
}
