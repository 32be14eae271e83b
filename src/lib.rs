//! asmnav: regex-driven symbol navigation for ColdFire / 68k assembly.
//!
//! A selected token is classified (label, RAM equate, or operand), turned
//! into one case-insensitive pattern, and scanned line by line across a
//! source tree. See [`query::Navigator`] for the library entry point.

pub mod cli;
pub mod color;
pub mod config;
pub mod errors;
pub mod lint;
pub mod opcodes;
pub mod output;
pub mod pattern;
pub mod query;
pub mod router;
pub mod scanner;
pub mod types;
pub mod walker;

pub use errors::NavError;
pub use pattern::{CompiledPattern, PatternBuilder};
pub use query::Navigator;
pub use types::{
    MatchRecord, NavTarget, QueryKind, ReportKind, ResultSet, SearchQuery, SourceFile, Token,
};
