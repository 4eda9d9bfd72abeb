use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::commands::CommandReport;
use crate::history::ops::{self, HistoryContext};

#[derive(Debug, Clone, Default)]
pub struct LastDateOptions {
    pub path: Option<PathBuf>,
}

pub fn run(ctx: &HistoryContext, opts: &LastDateOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("last-date");
    let path = opts.path.clone().unwrap_or_else(|| ctx.history_file());
    report.detail(format!("history_file={}", path.display()));

    let latest = ops::last_recorded_date(&path)
        .with_context(|| format!("failed to read last date from {}", path.display()))?;
    match latest {
        Some(date) => report.detail(format!("last_date={date}")),
        None => report.detail("last_date=none"),
    }
    Ok(report)
}
