//! Report rendering: the plain text report (default) and JSON Lines (`--json`).
//!
//! Result data flows through a [`Formatter`] which writes to an arbitrary
//! [`std::io::Write`] destination (typically stdout). The navigation target,
//! hints and errors go to stderr so stdout stays a clean report.

use std::io::Write;

use serde::Serialize;

use crate::color;
use crate::types::{MatchRecord, NavTarget, ResultSet};

/// Summary object closing a JSON Lines report.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryOutput<'a> {
    pub kind: String,
    pub token: &'a str,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goto: Option<NavTarget>,
}

/// The "no results" message for `token`.
pub fn no_results_line(token: &str) -> String {
    format!("No results found for {token}")
}

/// The header line preceding a non-empty report.
pub fn summary_line(count: usize, token: &str) -> String {
    format!("Found {count} results for {token}:")
}

/// One report line: `<displayPath>(<lineNumber>):: <matchedText>`.
pub fn record_line(record: &MatchRecord) -> String {
    format!("{}({}):: {}", record.display_path, record.line, record.text)
}

/// The full uncolored report for `set`.
pub fn report_lines(set: &ResultSet) -> Vec<String> {
    if set.is_empty() {
        return vec![no_results_line(&set.token)];
    }
    std::iter::once(summary_line(set.count(), &set.token))
        .chain(set.records.iter().map(record_line))
        .collect()
}

/// Output formatter for text reports or JSON Lines.
pub struct Formatter<W: Write> {
    writer: W,
    json: bool,
    color: bool,
}

impl<W: Write> Formatter<W> {
    /// * `writer` - The destination for output (e.g. `std::io::stdout()`).
    /// * `json`   - When `true`, emit JSON Lines; otherwise, the text report.
    /// * `color`  - When `true`, emit ANSI color codes in the text report.
    pub fn new(writer: W, json: bool, color: bool) -> Self {
        Self {
            writer,
            json,
            color,
        }
    }

    /// Write the report for a completed query.
    pub fn write_result_set(&mut self, set: &ResultSet) -> std::io::Result<()> {
        if self.json {
            return self.write_json(set);
        }
        if set.is_empty() {
            return writeln!(self.writer, "{}", no_results_line(&set.token));
        }
        let header = summary_line(set.count(), &set.token);
        if self.color {
            writeln!(self.writer, "{}{header}{}", color::HEADER, color::RESET)?;
        } else {
            writeln!(self.writer, "{header}")?;
        }
        for record in &set.records {
            self.write_record(record)?;
        }
        Ok(())
    }

    fn write_record(&mut self, record: &MatchRecord) -> std::io::Result<()> {
        if !self.color {
            return writeln!(self.writer, "{}", record_line(record));
        }
        writeln!(
            self.writer,
            "{file}{path}{reset}{sep}({reset}{line_no}{line}{reset}{sep})::{reset} {text}",
            file = color::FILE,
            path = record.display_path,
            sep = color::SEP,
            line_no = color::LINE_NO,
            line = record.line,
            reset = color::RESET,
            text = record.text,
        )
    }

    fn write_json(&mut self, set: &ResultSet) -> std::io::Result<()> {
        for record in &set.records {
            let line = serde_json::to_string(record).map_err(std::io::Error::other)?;
            writeln!(self.writer, "{line}")?;
        }
        let summary = SummaryOutput {
            kind: set.kind.to_string(),
            token: &set.token,
            count: set.count(),
            goto: set.navigation_target(),
        };
        let line = serde_json::to_string(&summary).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{line}")
    }
}

// ---------------------------------------------------------------------------
// Stderr helpers
// ---------------------------------------------------------------------------

/// Print the navigation target to stderr (suppressed when `json` is true,
/// since the JSON summary already carries it).
pub fn print_navigation(target: &NavTarget, json: bool) {
    if !json {
        eprintln!("goto: {target}");
    }
}

/// Print a hint message to stderr (suppressed when `json` is true).
pub fn print_hint(msg: &str, json: bool) {
    if !json {
        eprintln!("hint: {msg}");
    }
}

/// Print an error message to stderr.
pub fn print_error(msg: &str) {
    eprintln!("error: {msg}");
}

/// Format a [`NavError`](crate::errors::NavError) to stderr with structured
/// `error:` / `hint:` lines and return the process exit code.
pub fn format_error(err: &crate::errors::NavError, json: bool) -> i32 {
    print_error(&format!("{err}"));
    if let Some(hint) = err.hint() {
        print_hint(hint, json);
    }
    err.exit_code()
}
