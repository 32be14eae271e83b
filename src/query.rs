//! Query execution: pattern building followed by a line scan.

use std::path::PathBuf;

use crate::config::Config;
use crate::errors::NavError;
use crate::pattern::PatternBuilder;
use crate::scanner::{MAX_DISPLAY_PATH, Scanner};
use crate::types::{MatchRecord, ResultSet, SearchQuery, SourceFile};

/// Runs definition and reference queries over a set of files.
#[derive(Debug, Clone, Copy)]
pub struct Navigator {
    builder: PatternBuilder,
    max_display_path: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(PatternBuilder::default())
    }
}

impl Navigator {
    pub fn new(builder: PatternBuilder) -> Self {
        Self {
            builder,
            max_display_path: MAX_DISPLAY_PATH,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(PatternBuilder::new(config.symbols.register_prefix))
            .max_display_path(config.output.max_display_path)
    }

    pub fn max_display_path(mut self, max: usize) -> Self {
        self.max_display_path = max;
        self
    }

    /// Run `query` against in-memory snapshots, in the order given.
    pub fn search_sources(
        &self,
        query: &SearchQuery,
        sources: &[SourceFile],
    ) -> Result<ResultSet, NavError> {
        self.run(query, |scanner| scanner.scan_sources(sources))
    }

    /// Run `query` against files on disk, in the order given.
    pub fn search_files(
        &self,
        query: &SearchQuery,
        files: &[PathBuf],
    ) -> Result<ResultSet, NavError> {
        self.run(query, |scanner| scanner.scan_paths(files))
    }

    fn run<F>(&self, query: &SearchQuery, scan: F) -> Result<ResultSet, NavError>
    where
        F: FnOnce(&Scanner<'_>) -> Vec<MatchRecord>,
    {
        let pattern = self.builder.build(query)?;
        let scanner = Scanner::new(&pattern)?.max_display_path(self.max_display_path);
        let records = scan(&scanner);
        tracing::debug!(
            kind = %query.kind,
            token = %query.token,
            form = ?pattern.form(),
            hits = records.len(),
            "query complete"
        );
        Ok(ResultSet::new(query.kind, query.token.as_str(), records))
    }
}
