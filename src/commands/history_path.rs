use anyhow::Result;
use std::path::Path;

use crate::commands::CommandReport;
use crate::history::ops::HistoryContext;

pub fn get(ctx: &HistoryContext) -> Result<CommandReport> {
    let mut report = CommandReport::new("history-path");
    match ctx.history_path() {
        Some(path) => report.detail(format!("history_path={}", path.display())),
        None => report.detail("history_path=none"),
    }
    Ok(report)
}

pub fn set(ctx: &mut HistoryContext, path: &Path) -> Result<CommandReport> {
    let mut report = CommandReport::new("set-history-path");
    if !path.is_file() {
        report.issue(format!("history file does not exist: {}", path.display()));
        return Ok(report);
    }

    let state_file = ctx.set_history_path(path)?;
    report.detail(format!("history_path={}", path.display()));
    report.detail(format!("state_file={}", state_file.display()));
    Ok(report)
}
