use anyhow::Result;
use std::io;
use std::path::PathBuf;

use crate::commands::CommandReport;
use crate::error::Outcome;
use crate::history::audit;
use crate::history::ops::{self, HistoryContext};
use crate::history::prompt::{FixedPath, LinePrompt, SavePrompt};
use crate::history::record::SubmittedRow;

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub rows: Vec<SubmittedRow>,
    pub output: Option<PathBuf>,
}

pub fn run(ctx: &mut HistoryContext, opts: &ExportOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("export");
    let history_file = ctx.history_file();
    report.detail(format!("history_file={}", history_file.display()));
    report.detail(format!("submitted_rows={}", opts.rows.len()));

    let mut prompt: Box<dyn SavePrompt> = match &opts.output {
        Some(path) => Box::new(FixedPath(path.clone())),
        None => Box::new(LinePrompt::new(io::stdin().lock(), io::stderr())),
    };

    let outcome = match ops::export_results(&history_file, &ctx.config, &opts.rows, prompt.as_mut())
    {
        Ok(outcome) => outcome,
        Err(err) => {
            let err = anyhow::Error::new(err).context("export failed");
            audit::record(&ctx.paths, "export", "failed", &format!("{err:#}"));
            return Err(err);
        }
    };

    match outcome {
        Outcome::Completed(path) => {
            report.detail(format!("export_path={}", path.display()));
            ctx.remember_export(&path)?;
            audit::record(&ctx.paths, "export", "ok", &path.display().to_string());
        }
        Outcome::Cancelled => {
            report.detail("export cancelled; no file written");
            audit::record(&ctx.paths, "export", "cancelled", "save prompt dismissed");
        }
    }

    Ok(report)
}
