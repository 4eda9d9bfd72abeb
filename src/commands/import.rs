use anyhow::Result;
use std::path::PathBuf;

use crate::commands::CommandReport;
use crate::history::audit;
use crate::history::ops::{self, HistoryContext};

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub source: PathBuf,
}

pub fn run(ctx: &mut HistoryContext, opts: &ImportOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("import");
    report.detail(format!("source={}", opts.source.display()));

    let internal = ctx.paths.internal_history.clone();
    let path = match ops::import_history(&opts.source, &internal) {
        Ok(path) => path,
        Err(err) => {
            let err = anyhow::Error::new(err).context("history import failed");
            audit::record(&ctx.paths, "import", "failed", &format!("{err:#}"));
            return Err(err);
        }
    };

    ctx.set_history_path(&path)?;
    report.detail(format!("history_path={}", path.display()));
    audit::record(&ctx.paths, "import", "ok", &path.display().to_string());
    Ok(report)
}
