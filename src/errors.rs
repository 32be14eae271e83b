//! Application error types and user-facing error formatting.
//!
//! [`NavError`] is the unified top-level error. It carries contextual hints
//! and exit codes so that `main()` can present human-readable diagnostics on
//! stderr without ever exposing raw panics or debug formatting.
//!
//! An empty selection, an unreadable file, and a query with no matches are
//! not errors; they are handled as ordinary outcomes by the query layer.

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

/// Exit code for an unrecoverable runtime error.
///
/// A completed scan exits `0` with or without matches. Argument errors never
/// reach [`NavError`]; clap reports them and exits with its own code `2`.
pub const EXIT_ERROR: i32 = 1;

// ---------------------------------------------------------------------------
// Unified application error
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum NavError {
    /// The search root does not exist or is not a directory.
    #[error("search root is not a readable directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    /// A configuration file could not be read or parsed.
    #[error("{0:#}")]
    Config(anyhow::Error),

    /// A generated pattern failed to compile.
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The line matcher rejected a generated pattern.
    #[error("invalid search pattern: {0}")]
    Matcher(#[from] grep::regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NavError {
    /// Return the appropriate process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        EXIT_ERROR
    }

    /// Return an optional human-readable hint that may help the user fix
    /// the problem.  Returns `None` when no specific guidance applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            NavError::InvalidRoot(_) => Some("pass an existing directory with --root"),
            NavError::Config(_) => {
                Some("check ~/.asmnav/config.toml and <root>/.asmnav/config.toml")
            }
            NavError::Pattern(_) | NavError::Matcher(_) => {
                Some("the selected token may be too long to search for")
            }
            NavError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Some("verify the file or directory exists")
            }
            NavError::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                Some("check file permissions")
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
