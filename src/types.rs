//! Shared types and data structures.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Which navigation question a query answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Where is this symbol declared (equate or label)?
    Definition,
    /// Where is this symbol used as an operand or branch target?
    Reference,
}

/// What produced a [`ResultSet`]: a navigation query or the lint check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Definition,
    Reference,
    Lint,
}

impl From<QueryKind> for ReportKind {
    fn from(kind: QueryKind) -> Self {
        match kind {
            QueryKind::Definition => ReportKind::Definition,
            QueryKind::Reference => ReportKind::Reference,
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&ReportKind::from(*self), f)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReportKind::Definition => "definition",
            ReportKind::Reference => "reference",
            ReportKind::Lint => "lint",
        };
        write!(f, "{s}")
    }
}

/// A selected symbol, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    raw: String,
}

impl Token {
    /// Capture a token from raw selection text.
    ///
    /// Returns `None` for empty or whitespace-only input, and for a bare
    /// label colon (`:`) with no name; such a selection never produces a query.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.trim_end_matches(':').is_empty() {
            return None;
        }
        Some(Self {
            raw: trimmed.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the token starts with the given register-prefix letter.
    pub fn has_register_prefix(&self, prefix: char) -> bool {
        self.raw.starts_with(prefix)
    }

    /// Whether the token carries a trailing label colon.
    pub fn is_labeled(&self) -> bool {
        self.raw.ends_with(':')
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// One navigation request. Built once per invocation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub kind: QueryKind,
    pub token: Token,
    /// Full text of the line holding the selection (reference queries only).
    pub context: Option<String>,
}

impl SearchQuery {
    /// Build a definition query; `None` when the selection is empty.
    pub fn definition(raw: &str) -> Option<Self> {
        Some(Self {
            kind: QueryKind::Definition,
            token: Token::new(raw)?,
            context: None,
        })
    }

    /// Build a reference query; `None` when the selection is empty.
    ///
    /// A blank context line is dropped so it classifies like an absent one.
    pub fn reference(raw: &str, context: Option<&str>) -> Option<Self> {
        Some(Self {
            kind: QueryKind::Reference,
            token: Token::new(raw)?,
            context: context
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string),
        })
    }
}

/// Read-only snapshot of a source file's lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl SourceFile {
    pub fn new<P: Into<PathBuf>>(path: P, lines: Vec<String>) -> Self {
        Self {
            path: path.into(),
            lines,
        }
    }

    /// Split text content into lines (CRLF tolerant).
    pub fn from_text<P: Into<PathBuf>>(path: P, text: &str) -> Self {
        Self::new(path, text.lines().map(str::to_string).collect())
    }
}

/// A single line-level hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// Full path of the file the hit came from.
    pub file: PathBuf,
    /// Path shortened for display (left-elided past the display limit).
    pub display_path: String,
    /// 1-based line number.
    pub line: u64,
    /// Line content from the match start to end of line.
    pub text: String,
}

/// Where an editor should jump after a definition query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavTarget {
    pub file: PathBuf,
    pub line: u64,
}

impl fmt::Display for NavTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// Ordered hits for one query: file enumeration order, then line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    pub kind: ReportKind,
    /// The searched token, kept for the summary and "no results" messages.
    pub token: String,
    pub records: Vec<MatchRecord>,
}

impl ResultSet {
    pub fn new(
        kind: impl Into<ReportKind>,
        token: impl Into<String>,
        records: Vec<MatchRecord>,
    ) -> Self {
        Self {
            kind: kind.into(),
            token: token.into(),
            records,
        }
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first hit, for definition queries only.
    pub fn navigation_target(&self) -> Option<NavTarget> {
        if self.kind != ReportKind::Definition {
            return None;
        }
        let first = self.records.first()?;
        if first.line == 0 || first.file.as_os_str().is_empty() {
            return None;
        }
        Some(NavTarget {
            file: first.file.clone(),
            line: first.line,
        })
    }
}
