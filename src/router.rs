//! Command dispatch: resolves the root, loads config, runs the query and
//! renders the report.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, Command};
use crate::color;
use crate::config::Config;
use crate::errors::NavError;
use crate::lint;
use crate::output::{self, Formatter};
use crate::query::Navigator;
use crate::types::{ResultSet, SearchQuery};
use crate::walker::Walker;

pub fn dispatch(cli: Cli) -> Result<(), NavError> {
    // `None` means lint; an empty selection returns before touching the root.
    let query = match &cli.command {
        Command::Definition(args) => SearchQuery::definition(&args.token),
        Command::Reference(args) => SearchQuery::reference(&args.token, args.line.as_deref()),
        Command::Lint(_) => None,
    };
    let is_lint = matches!(cli.command, Command::Lint(_));
    if query.is_none() && !is_lint {
        tracing::debug!("empty selection, nothing to search");
        return Ok(());
    }

    let root = resolve_root(cli.command.root())?;
    let config = Config::load(Some(&root)).map_err(NavError::Config)?;
    let files = collect_files(&root, &config)?;
    tracing::debug!(root = %root.display(), files = files.len(), "scanning");

    let set = match query {
        Some(query) => Navigator::from_config(&config).search_files(&query, &files)?,
        None => lint::check_files(&files, config.output.max_display_path)?,
    };

    let color = color::resolve_color(cli.color.map(|c| c.as_str()), &config.output.color);
    render(&set, cli.json, color)
}

/// Canonicalize `root` and check that it is a readable directory.
///
/// Reported paths and the navigation target are built from this absolute
/// root, whatever form `--root` was given in.
pub fn resolve_root(root: &Path) -> Result<PathBuf, NavError> {
    let invalid = || NavError::InvalidRoot(root.to_path_buf());
    let absolute = std::fs::canonicalize(root).map_err(|_| invalid())?;
    if !absolute.is_dir() || std::fs::read_dir(&absolute).is_err() {
        return Err(invalid());
    }
    Ok(absolute)
}

fn collect_files(root: &Path, config: &Config) -> Result<Vec<PathBuf>, NavError> {
    let files = Walker::new(root)
        .extensions(&config.scan.extensions)
        .ignore_patterns(&config.ignore.patterns)
        .collect_paths()?;
    Ok(files)
}

fn render(set: &ResultSet, json: bool, color: bool) -> Result<(), NavError> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    Formatter::new(&mut lock, json, color).write_result_set(set)?;
    lock.flush()?;
    if let Some(target) = set.navigation_target() {
        output::print_navigation(&target, json);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_root_accepts_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = resolve_root(dir.path()).unwrap();
        assert!(root.is_absolute());
        assert_eq!(root, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn resolve_root_makes_relative_roots_absolute() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        let nested = dir.path().join("src").join("..").join("src");
        let root = resolve_root(&nested).unwrap();
        assert_eq!(root, dir.path().join("src").canonicalize().unwrap());

        let cwd = resolve_root(Path::new(".")).unwrap();
        assert!(cwd.is_absolute());
        assert!(!cwd.ends_with("."));
    }

    #[test]
    fn resolve_root_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(resolve_root(&missing), Err(NavError::InvalidRoot(p)) if p == missing));
    }

    #[test]
    fn resolve_root_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.asm");
        std::fs::write(&file, "nop\n").unwrap();
        assert!(matches!(resolve_root(&file), Err(NavError::InvalidRoot(_))));
    }

    #[test]
    fn collect_files_applies_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.asm"), "nop\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "nop\n").unwrap();
        let mut config = Config::default();
        config.scan.extensions = vec!["asm".to_string()];
        let files = collect_files(dir.path(), &config).unwrap();
        assert_eq!(files, vec![dir.path().join("a.asm")]);
    }

    #[test]
    fn collected_files_are_absolute_under_resolved_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.asm"), "nop\n").unwrap();
        let root = resolve_root(dir.path()).unwrap();
        let files = collect_files(&root, &Config::default()).unwrap();
        assert_eq!(files, vec![root.join("a.asm")]);
        assert!(files[0].is_absolute());
    }
}
