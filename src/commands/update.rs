use anyhow::Result;

use crate::commands::CommandReport;
use crate::history::audit::{self, now_epoch_secs};
use crate::history::ops::{self, HistoryContext};
use crate::history::record::SubmittedRow;

#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    pub rows: Vec<SubmittedRow>,
}

pub fn run(ctx: &mut HistoryContext, opts: &UpdateOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("update");
    let history_file = ctx.paths.internal_history.clone();
    report.detail(format!("history_file={}", history_file.display()));

    let path = match ops::update_history(&history_file, &opts.rows) {
        Ok(path) => path,
        Err(err) => {
            let err = anyhow::Error::new(err).context("history update failed");
            audit::record(&ctx.paths, "update", "failed", &format!("{err:#}"));
            return Err(err);
        }
    };

    report.detail(format!("added_rows={}", opts.rows.len()));
    ctx.remember_update(now_epoch_secs()?)?;
    audit::record(
        &ctx.paths,
        "update",
        "ok",
        &format!("{} rows prepended to {}", opts.rows.len(), path.display()),
    );
    Ok(report)
}
