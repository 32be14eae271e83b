//! Source file enumeration with gitignore support.
//!
//! Wraps the `ignore` crate's `WalkBuilder` to provide a walker that:
//! - Respects `.gitignore` rules
//! - Skips hidden files/directories
//! - Applies extra ignore globs and an optional extension filter
//! - Yields files sorted by name, so scans are reproducible

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;

/// A file-system walker over a source tree.
pub struct Walker {
    root: PathBuf,
    extensions: Vec<String>,
    ignore_patterns: Vec<String>,
}

impl Walker {
    /// Create a new walker rooted at the given path.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extensions: Vec::new(),
            ignore_patterns: Vec::new(),
        }
    }

    /// Only yield files with one of these extensions (case-insensitive).
    /// An empty list yields every file.
    pub fn extensions(mut self, exts: &[String]) -> Self {
        self.extensions = exts.to_vec();
        self
    }

    /// Extra gitignore-style globs to exclude.
    pub fn ignore_patterns(mut self, patterns: &[String]) -> Self {
        self.ignore_patterns = patterns.to_vec();
        self
    }

    /// Build the underlying `WalkBuilder` with all our configuration applied.
    fn make_builder(&self) -> Result<WalkBuilder> {
        let mut builder = WalkBuilder::new(&self.root);

        // Let the ignore crate handle .gitignore, .ignore, hidden files, etc.
        builder.standard_filters(true);

        // In the overrides system a glob WITH `!` means "exclude".
        let mut overrides = OverrideBuilder::new(&self.root);
        for pattern in self.ignore_patterns.iter().map(|p| format!("!{p}")) {
            overrides
                .add(&pattern)
                .with_context(|| format!("invalid ignore pattern: {pattern}"))?;
        }
        builder.overrides(overrides.build().context("failed to build ignore overrides")?);

        builder.sort_by_file_name(|a, b| a.cmp(b));
        Ok(builder)
    }

    fn wanted(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Walk the file tree sequentially and collect all matching file paths.
    ///
    /// Entries that cannot be read are skipped.
    pub fn collect_paths(&self) -> Result<Vec<PathBuf>> {
        let builder = self.make_builder()?;
        let mut paths = Vec::new();
        for result in builder.build() {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    tracing::debug!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_some_and(|ft| ft.is_file()) && self.wanted(entry.path()) {
                paths.push(entry.into_path());
            }
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Helper: create a temporary directory tree for testing.
    struct TestDir {
        dir: tempfile::TempDir,
    }

    impl TestDir {
        fn new() -> Self {
            Self {
                dir: tempfile::tempdir().unwrap(),
            }
        }

        fn path(&self) -> &Path {
            self.dir.path()
        }

        /// Create a file (and any necessary parent directories).
        fn create_file(&self, relative: &str) {
            let p = self.dir.path().join(relative);
            if let Some(parent) = p.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&p, "content").unwrap();
        }
    }

    /// Paths relative to the test root, in walk order.
    fn relative(root: &Path, paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .filter_map(|p| {
                p.strip_prefix(root)
                    .ok()
                    .map(|r| r.to_string_lossy().replace('\\', "/"))
            })
            .collect()
    }

    #[test]
    fn respects_gitignore() {
        let td = TestDir::new();
        // The ignore crate only respects .gitignore inside a git repository.
        fs::create_dir(td.path().join(".git")).unwrap();
        td.create_file("main.asm");
        td.create_file("main.lst");
        fs::write(td.path().join(".gitignore"), "*.lst\n").unwrap();

        let rel = relative(td.path(), &Walker::new(td.path()).collect_paths().unwrap());
        assert!(rel.contains(&"main.asm".to_string()));
        assert!(!rel.contains(&"main.lst".to_string()));
    }

    #[test]
    fn skips_hidden_entries() {
        let td = TestDir::new();
        td.create_file("src/boot.asm");
        td.create_file(".hidden/notes.asm");
        td.create_file(".scratch.asm");

        let rel = relative(td.path(), &Walker::new(td.path()).collect_paths().unwrap());
        assert_eq!(rel, vec!["src/boot.asm".to_string()]);
    }

    #[test]
    fn build_directories_are_scanned_unless_ignored() {
        let td = TestDir::new();
        td.create_file("build/vectors.asm");
        td.create_file("obj/defs.inc");
        td.create_file("src/boot.asm");

        let rel = relative(td.path(), &Walker::new(td.path()).collect_paths().unwrap());
        assert_eq!(rel, vec!["build/vectors.asm", "obj/defs.inc", "src/boot.asm"]);

        let patterns = vec!["build/".to_string(), "obj/".to_string()];
        let rel = relative(
            td.path(),
            &Walker::new(td.path())
                .ignore_patterns(&patterns)
                .collect_paths()
                .unwrap(),
        );
        assert_eq!(rel, vec!["src/boot.asm"]);
    }

    #[test]
    fn walk_order_is_sorted() {
        let td = TestDir::new();
        td.create_file("c.asm");
        td.create_file("a.asm");
        td.create_file("b.asm");

        let rel = relative(td.path(), &Walker::new(td.path()).collect_paths().unwrap());
        assert_eq!(rel, vec!["a.asm", "b.asm", "c.asm"]);
    }

    #[test]
    fn extension_filter() {
        let td = TestDir::new();
        td.create_file("boot.ASM");
        td.create_file("defs.inc");
        td.create_file("readme.txt");

        let exts = vec!["asm".to_string(), "inc".to_string()];
        let rel = relative(
            td.path(),
            &Walker::new(td.path()).extensions(&exts).collect_paths().unwrap(),
        );
        assert_eq!(rel, vec!["boot.ASM", "defs.inc"]);
    }

    #[test]
    fn extra_ignore_patterns() {
        let td = TestDir::new();
        td.create_file("keep.asm");
        td.create_file("generated/out.asm");

        let patterns = vec!["generated/".to_string()];
        let rel = relative(
            td.path(),
            &Walker::new(td.path())
                .ignore_patterns(&patterns)
                .collect_paths()
                .unwrap(),
        );
        assert_eq!(rel, vec!["keep.asm"]);
    }

    #[test]
    fn bad_ignore_pattern_is_an_error() {
        let td = TestDir::new();
        let patterns = vec!["[".to_string()];
        assert!(Walker::new(td.path()).ignore_patterns(&patterns).collect_paths().is_err());
    }
}
