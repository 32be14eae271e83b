//! Unsafe long-call check.
//!
//! A `jsr`/`jmp` to a bare symbol lets the assembler pick the address size.
//! When the target lives outside the short-addressable range, the encoded
//! target is truncated and execution lands in invalid memory. Targets must
//! carry an explicit `.l` qualifier to be safe.

use std::path::PathBuf;

use crate::errors::NavError;
use crate::pattern::{CompiledPattern, PatternForm};
use crate::scanner::Scanner;
use crate::types::{ReportKind, ResultSet};

/// Summary label used in the lint report.
pub const LINT_LABEL: &str = "unsafe jsr/jmp";

/// `jsr`/`jmp` followed by a bare symbol with no size qualifier.
const UNSAFE_CALL: &str = r"\b(?:JSR|JMP)\s+[A-Z_][0-9A-Z_]*(?:\s|[;,]|$)";

pub fn unsafe_call_pattern() -> Result<CompiledPattern, regex::Error> {
    CompiledPattern::new(UNSAFE_CALL.to_string(), PatternForm::UnsafeCall)
}

/// Scan `files` for unsafe long calls.
pub fn check_files(files: &[PathBuf], max_display_path: usize) -> Result<ResultSet, NavError> {
    let pattern = unsafe_call_pattern()?;
    let scanner = Scanner::new(&pattern)?.max_display_path(max_display_path);
    let records = scanner.scan_paths(files);
    tracing::debug!(files = files.len(), hits = records.len(), "lint complete");
    Ok(ResultSet::new(ReportKind::Lint, LINT_LABEL, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn bare_targets_are_flagged() {
        let p = unsafe_call_pattern().unwrap();
        assert!(p.is_match("    jsr InitHardware"));
        assert!(p.is_match("\tJMP main_loop ; restart"));
        assert!(p.is_match("  jsr _start\r"));
    }

    #[test]
    fn qualified_or_indirect_targets_pass() {
        let p = unsafe_call_pattern().unwrap();
        assert!(!p.is_match("    jsr InitHardware.l"));
        assert!(!p.is_match("    jsr (InitHardware).l"));
        assert!(!p.is_match("    jmp (a0)"));
        assert!(!p.is_match("    bsr InitHardware"));
        assert!(!p.is_match("    movea.l #jsr_table,a0"));
    }

    #[test]
    fn check_files_reports_hits_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.asm");
        let b = dir.path().join("b.asm");
        fs::write(&a, "  jsr Safe.l\n  jsr Unsafe\n").unwrap();
        fs::write(&b, "  jmp Far\n").unwrap();

        let set = check_files(&[a.clone(), b.clone()], 60).unwrap();
        assert_eq!(set.kind, ReportKind::Lint);
        assert_eq!(set.token, LINT_LABEL);
        assert_eq!(set.count(), 2);
        assert_eq!((set.records[0].file.clone(), set.records[0].line), (a, 2));
        assert_eq!(set.records[0].text, "jsr Unsafe");
        assert_eq!((set.records[1].file.clone(), set.records[1].line), (b, 1));
        assert!(set.navigation_target().is_none());
    }
}
