use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("no rows supplied; nothing to process")]
    MissingInput,
    #[error("unrecognised draw date `{0}`")]
    InvalidDate(String),
    #[error("failed to read {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to create {}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to copy {} to {}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
    #[error("save prompt failed")]
    Prompt(#[source] io::Error),
    #[error("spreadsheet export failed")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

/// Outcome of an operation that may be abandoned by the user.
///
/// Cancellation is neither success nor failure: a dismissed save prompt ends
/// the operation without touching any file and without an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Completed(T),
    Cancelled,
}

pub type HistoryResult<T> = Result<T, HistoryError>;
