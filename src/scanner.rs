//! Line scanner: applies a compiled pattern to source files.
//!
//! Two entry points share one record builder:
//! - [`Scanner::scan_sources`] walks in-memory [`SourceFile`] snapshots
//! - [`Scanner::scan_paths`] searches files on disk through the `grep` crate
//!   (`grep-regex` matcher, `grep-searcher` line searcher)
//!
//! Each line contributes at most one record, taken from the first match.
//! Files that cannot be read are skipped; they never abort a scan.

use std::path::{Path, PathBuf};

use grep::regex::{RegexMatcher, RegexMatcherBuilder};
use grep::searcher::{BinaryDetection, Searcher, SearcherBuilder, Sink, SinkMatch};

use crate::pattern::CompiledPattern;
use crate::types::{MatchRecord, SourceFile};

/// Paths longer than this (in characters) are left-elided for display.
pub const MAX_DISPLAY_PATH: usize = 60;

const ELLIPSIS: &str = "...";

/// Shorten `path` to its last `max` characters, prefixed with `...`.
pub fn display_path(path: &str, max: usize) -> String {
    let len = path.chars().count();
    if len <= max {
        return path.to_string();
    }
    let tail: String = path.chars().skip(len - max).collect();
    format!("{ELLIPSIS}{tail}")
}

/// Applies one [`CompiledPattern`] across a set of files.
pub struct Scanner<'p> {
    pattern: &'p CompiledPattern,
    matcher: RegexMatcher,
    max_display_path: usize,
}

impl<'p> Scanner<'p> {
    pub fn new(pattern: &'p CompiledPattern) -> Result<Self, grep::regex::Error> {
        let matcher = RegexMatcherBuilder::new()
            .case_insensitive(true)
            .multi_line(true)
            .line_terminator(Some(b'\n'))
            .build(pattern.source())?;
        Ok(Self {
            pattern,
            matcher,
            max_display_path: MAX_DISPLAY_PATH,
        })
    }

    pub fn max_display_path(mut self, max: usize) -> Self {
        self.max_display_path = max;
        self
    }

    /// Scan in-memory snapshots in the order given.
    pub fn scan_sources<'a, I>(&self, sources: I) -> Vec<MatchRecord>
    where
        I: IntoIterator<Item = &'a SourceFile>,
    {
        let mut records = Vec::new();
        for source in sources {
            for (idx, line) in source.lines.iter().enumerate() {
                if let Some(record) = self.record(&source.path, idx as u64 + 1, line) {
                    records.push(record);
                }
            }
        }
        records
    }

    /// Scan files on disk in the order given. Binary files are skipped.
    pub fn scan_paths(&self, paths: &[PathBuf]) -> Vec<MatchRecord> {
        let mut searcher = SearcherBuilder::new()
            .binary_detection(BinaryDetection::quit(b'\x00'))
            .line_number(true)
            .build();

        let mut records = Vec::new();
        for path in paths {
            let before = records.len();
            let mut sink = RecordSink {
                scanner: self,
                file: path,
                records: &mut records,
            };
            if let Err(err) = searcher.search_path(&self.matcher, path, &mut sink) {
                // Drop partial hits so an unreadable file contributes nothing.
                records.truncate(before);
                tracing::debug!(path = %path.display(), error = %err, "skipping unreadable file");
            }
        }
        records
    }

    /// Build the record for one line, or `None` if the pattern misses it.
    fn record(&self, file: &Path, line: u64, content: &str) -> Option<MatchRecord> {
        let start = self.pattern.find_start(content)?;
        Some(MatchRecord {
            file: file.to_path_buf(),
            display_path: display_path(&file.to_string_lossy(), self.max_display_path),
            line,
            text: content[start..].to_string(),
        })
    }
}

/// A [`Sink`] that turns searcher hits into [`MatchRecord`]s.
struct RecordSink<'s, 'p> {
    scanner: &'s Scanner<'p>,
    file: &'s Path,
    records: &'s mut Vec<MatchRecord>,
}

impl Sink for RecordSink<'_, '_> {
    type Error = std::io::Error;

    fn matched(&mut self, _searcher: &Searcher, mat: &SinkMatch<'_>) -> Result<bool, Self::Error> {
        let line_number = mat.line_number().unwrap_or(0);
        let content = String::from_utf8_lossy(mat.bytes());
        let content = content.trim_end_matches(&['\n', '\r'][..]);
        if let Some(record) = self.scanner.record(self.file, line_number, content) {
            self.records.push(record);
        }
        Ok(true)
    }
}
