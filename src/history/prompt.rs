use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::error::{HistoryError, HistoryResult};

/// Where an export should be saved.
///
/// Returning `Ok(None)` means the user dismissed the prompt; that is a
/// cancellation, not an error.
pub trait SavePrompt {
    fn choose_save_path(&mut self, default_name: &str) -> HistoryResult<Option<PathBuf>>;
}

/// A destination chosen up front, e.g. from `--output`.
#[derive(Debug, Clone)]
pub struct FixedPath(pub PathBuf);

impl SavePrompt for FixedPath {
    fn choose_save_path(&mut self, _default_name: &str) -> HistoryResult<Option<PathBuf>> {
        Ok(Some(self.0.clone()))
    }
}

/// Line-based prompt. An empty answer takes the default name, end of input
/// cancels.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> SavePrompt for LinePrompt<R, W> {
    fn choose_save_path(&mut self, default_name: &str) -> HistoryResult<Option<PathBuf>> {
        write!(self.output, "Save spreadsheet as [{default_name}]: ").map_err(HistoryError::Prompt)?;
        self.output.flush().map_err(HistoryError::Prompt)?;

        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .map_err(HistoryError::Prompt)?;
        if read == 0 {
            return Ok(None);
        }
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(Some(PathBuf::from(default_name)));
        }
        Ok(Some(PathBuf::from(answer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str) -> Option<PathBuf> {
        let mut out = Vec::new();
        let mut prompt = LinePrompt::new(Cursor::new(input.as_bytes()), &mut out);
        let got = prompt.choose_save_path("resultados.xlsx").expect("prompt");
        let shown = String::from_utf8(out).expect("utf8");
        assert!(shown.contains("[resultados.xlsx]"));
        got
    }

    #[test]
    fn end_of_input_cancels() {
        assert_eq!(ask(""), None);
    }

    #[test]
    fn blank_answer_takes_default() {
        assert_eq!(ask("\n"), Some(PathBuf::from("resultados.xlsx")));
    }

    #[test]
    fn typed_answer_is_used() {
        assert_eq!(ask("  /tmp/out.xlsx \n"), Some(PathBuf::from("/tmp/out.xlsx")));
    }

    #[test]
    fn fixed_path_ignores_default() {
        let mut prompt = FixedPath(PathBuf::from("a.xlsx"));
        assert_eq!(
            prompt.choose_save_path("resultados.xlsx").unwrap(),
            Some(PathBuf::from("a.xlsx"))
        );
    }
}
