use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::export::{self, ExportOptions};
use crate::commands::history_path;
use crate::commands::import::{self, ImportOptions};
use crate::commands::last_date::{self, LastDateOptions};
use crate::commands::status;
use crate::commands::update::{self, UpdateOptions};
use crate::commands::{CommandReport, collect_rows};
use crate::history::ops::HistoryContext;
use crate::history::record::SubmittedRow;
use crate::logging;

/// Keep a lottery draw history: add draws, grow the history file, export a
/// sorted spreadsheet.
#[derive(Debug, Parser)]
#[command(name = "draw-history", author, version, about, long_about = None)]
struct Cli {
    /// Print the command report as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct RowArgs {
    /// A draw as `MM/DD/YYYY=n1,n2,n3,n4,n5,cash_ball` (repeatable)
    #[arg(long = "row", value_parser = parse_row)]
    rows: Vec<SubmittedRow>,

    /// JSON array of `{"data": ..., "numeros": ...}` rows
    #[arg(long)]
    rows_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Merge stored history with new draws and save a sorted spreadsheet
    Export {
        #[command(flatten)]
        rows: RowArgs,

        /// Save here instead of prompting
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Prepend new draws to the internal history file
    Update {
        #[command(flatten)]
        rows: RowArgs,
    },
    /// Print the latest valid draw date in a history file
    LastDate {
        /// History file to inspect (defaults to the current history file)
        path: Option<PathBuf>,
    },
    /// Print the persisted history file path
    HistoryPath,
    /// Persist a different history file path
    SetHistoryPath { path: PathBuf },
    /// Copy a history CSV into the internal location and use it from now on
    Import { source: PathBuf },
    /// Show resolved paths, configuration and history health
    Status,
}

fn parse_row(raw: &str) -> Result<SubmittedRow, String> {
    SubmittedRow::parse_flag(raw)
        .ok_or_else(|| format!("expected DATE=n1,n2,n3,n4,n5,cash_ball, got `{raw}`"))
}

fn print_report(report: &CommandReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let status = if report.ok { "ok" } else { "failed" };
    println!("{}: {status}", report.command);
    for detail in &report.details {
        println!("  {detail}");
    }
    for issue in &report.issues {
        println!("  issue: {issue}");
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut ctx = HistoryContext::load()?;
    let report = match cli.command {
        Command::Export { rows, output } => {
            let rows = collect_rows(rows.rows_file.as_deref(), &rows.rows)?;
            export::run(&mut ctx, &ExportOptions { rows, output })?
        }
        Command::Update { rows } => {
            let rows = collect_rows(rows.rows_file.as_deref(), &rows.rows)?;
            update::run(&mut ctx, &UpdateOptions { rows })?
        }
        Command::LastDate { path } => last_date::run(&ctx, &LastDateOptions { path })?,
        Command::HistoryPath => history_path::get(&ctx)?,
        Command::SetHistoryPath { path } => history_path::set(&mut ctx, &path)?,
        Command::Import { source } => import::run(&mut ctx, &ImportOptions { source })?,
        Command::Status => status::run(&ctx)?,
    };

    print_report(&report, cli.json)?;
    if !report.ok {
        return Err(anyhow!("{} reported {} issue(s)", report.command, report.issues.len()));
    }
    Ok(())
}
