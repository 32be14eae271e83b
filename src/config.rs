//! Configuration file parsing, defaults, and merging.
//!
//! Configuration is loaded in layers (last wins):
//! 1. Built-in defaults
//! 2. Global config from `~/.asmnav/config.toml`
//! 3. Per-root config from `<root>/.asmnav/config.toml`
//!
//! Each layer only overrides fields it explicitly sets; absent fields
//! are left at their previous value.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::pattern::DEFAULT_REGISTER_PREFIX;
use crate::scanner::MAX_DISPLAY_PATH;

/// Directory name holding config files, both under `$HOME` and the root.
pub const CONFIG_DIR: &str = ".asmnav";

// ---------------------------------------------------------------------------
// Public config types (fully resolved, no Options)
// ---------------------------------------------------------------------------

/// Top-level configuration, fully resolved with defaults applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub symbols: SymbolsConfig,
    pub scan: ScanConfig,
    pub output: OutputConfig,
    pub ignore: IgnoreConfig,
}

/// Symbol spelling settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolsConfig {
    /// Letter that marks the address-register alias of a RAM variable.
    pub register_prefix: char,
}

/// File selection settings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanConfig {
    /// File extensions to scan (without the dot). Empty scans every text file.
    pub extensions: Vec<String>,
}

/// Output / display settings.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    /// Color mode: `"auto"`, `"always"`, or `"never"`.
    pub color: String,
    /// Paths longer than this are left-elided in the report.
    pub max_display_path: usize,
}

/// Ignore / exclusion settings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IgnoreConfig {
    /// Extra glob patterns to exclude from walks.
    pub patterns: Vec<String>,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for SymbolsConfig {
    fn default() -> Self {
        Self {
            register_prefix: DEFAULT_REGISTER_PREFIX,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: "auto".to_string(),
            max_display_path: MAX_DISPLAY_PATH,
        }
    }
}

// ---------------------------------------------------------------------------
// Option-based overlay types (for partial deserialization)
// ---------------------------------------------------------------------------

/// Mirror of [`Config`] where every field is `Option`, so we can
/// deserialize a partial TOML file and overlay only the keys that are
/// present.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigOverlay {
    symbols: Option<SymbolsOverlay>,
    scan: Option<ScanOverlay>,
    output: Option<OutputOverlay>,
    ignore: Option<IgnoreOverlay>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SymbolsOverlay {
    register_prefix: Option<char>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ScanOverlay {
    extensions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputOverlay {
    color: Option<String>,
    max_display_path: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct IgnoreOverlay {
    patterns: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Merge helpers
// ---------------------------------------------------------------------------

impl Config {
    /// Apply an overlay on top of this config, replacing only the fields
    /// that are `Some` in the overlay.
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        if let Some(sym) = overlay.symbols
            && let Some(v) = sym.register_prefix
        {
            self.symbols.register_prefix = v;
        }
        if let Some(scan) = overlay.scan
            && let Some(v) = scan.extensions
        {
            self.scan.extensions = v
                .into_iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect();
        }
        if let Some(out) = overlay.output {
            if let Some(v) = out.color {
                self.output.color = v;
            }
            if let Some(v) = out.max_display_path {
                self.output.max_display_path = v;
            }
        }
        if let Some(ign) = overlay.ignore
            && let Some(v) = ign.patterns
        {
            self.ignore.patterns = v;
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Return the user's home directory.
fn home_dir() -> Option<PathBuf> {
    #[allow(deprecated)]
    std::env::home_dir()
}

/// Parse a TOML string into a [`ConfigOverlay`], producing a clear error
/// message on malformed input.
fn parse_overlay(contents: &str, path: &Path) -> Result<ConfigOverlay> {
    toml::from_str(contents)
        .with_context(|| format!("failed to parse config file: {}", path.display()))
}

/// Try to read a config file and parse it as an overlay.
/// Returns `Ok(None)` if the file does not exist.
fn load_overlay(path: &Path) -> Result<Option<ConfigOverlay>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let overlay = parse_overlay(&contents, path)?;
            Ok(Some(overlay))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(anyhow::anyhow!(
            "failed to read config file {}: {}",
            path.display(),
            e
        )),
    }
}

impl Config {
    /// Load configuration by merging layers:
    /// defaults -> global (`~/.asmnav/config.toml`) -> per-root (`<root>/.asmnav/config.toml`).
    pub fn load(root: Option<&Path>) -> Result<Config> {
        let global_dir = home_dir().map(|h| h.join(CONFIG_DIR));
        Self::load_with_global_dir(global_dir.as_deref(), root)
    }

    /// Load config with an explicit global config directory.
    ///
    /// This allows tests to supply a temporary directory instead of the
    /// real `~/.asmnav` without mutating environment variables.
    pub(crate) fn load_with_global_dir(
        global_dir: Option<&Path>,
        root: Option<&Path>,
    ) -> Result<Config> {
        let mut config = Config::default();

        if let Some(dir) = global_dir {
            let global_path = dir.join("config.toml");
            if let Some(overlay) = load_overlay(&global_path)? {
                config.apply_overlay(overlay);
            }
        }

        if let Some(root) = root {
            let root_config_path = root.join(CONFIG_DIR).join("config.toml");
            if let Some(overlay) = load_overlay(&root_config_path)? {
                config.apply_overlay(overlay);
            }
        }

        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Temporary directories for global and/or per-root configs.  Does NOT
    /// touch environment variables, so tests are safe to run in parallel.
    struct TestEnv {
        _global_dir: tempfile::TempDir,
        _root_dir: Option<tempfile::TempDir>,
        global_path: PathBuf,
        root_path: Option<PathBuf>,
    }

    impl TestEnv {
        fn new() -> Self {
            let global = tempfile::tempdir().unwrap();
            let global_path = global.path().to_path_buf();
            Self {
                _global_dir: global,
                _root_dir: None,
                global_path,
                root_path: None,
            }
        }

        fn write_global_config(&self, toml_content: &str) {
            fs::write(self.global_path.join("config.toml"), toml_content).unwrap();
        }

        fn create_root(&mut self) -> PathBuf {
            let root = tempfile::tempdir().unwrap();
            let path = root.path().to_path_buf();
            self._root_dir = Some(root);
            self.root_path = Some(path.clone());
            path
        }

        /// Write a per-root config at `<root>/.asmnav/config.toml`.
        fn write_root_config(&self, toml_content: &str) {
            let root = self.root_path.as_ref().expect("call create_root first");
            let dir = root.join(CONFIG_DIR);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("config.toml"), toml_content).unwrap();
        }

        fn load(&self) -> Result<Config> {
            Config::load_with_global_dir(Some(&self.global_path), self.root_path.as_deref())
        }
    }

    #[test]
    fn defaults_applied_when_no_config_exists() {
        let env = TestEnv::new();
        let config = env.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.symbols.register_prefix, 'a');
        assert!(config.scan.extensions.is_empty());
        assert_eq!(config.output.color, "auto");
        assert_eq!(config.output.max_display_path, 60);
        assert!(config.ignore.patterns.is_empty());
    }

    #[test]
    fn global_config_overrides_defaults() {
        let env = TestEnv::new();
        env.write_global_config(
            r#"
[scan]
extensions = ["asm", ".inc"]

[output]
max_display_path = 40
"#,
        );

        let config = env.load().unwrap();
        assert_eq!(config.scan.extensions, vec!["asm".to_string(), "inc".to_string()]);
        assert_eq!(config.output.max_display_path, 40);
        assert_eq!(config.output.color, "auto");
        assert_eq!(config.symbols.register_prefix, 'a');
    }

    #[test]
    fn root_config_overrides_global() {
        let mut env = TestEnv::new();
        env.write_global_config(
            r#"
[symbols]
register_prefix = "r"

[output]
color = "always"
"#,
        );

        env.create_root();
        env.write_root_config(
            r#"
[symbols]
register_prefix = "p"

[ignore]
patterns = ["*.lst"]
"#,
        );

        let config = env.load().unwrap();
        assert_eq!(config.symbols.register_prefix, 'p');
        assert_eq!(config.ignore.patterns, vec!["*.lst".to_string()]);
        assert_eq!(config.output.color, "always");
        assert_eq!(config.output.max_display_path, 60);
    }

    #[test]
    fn invalid_toml_produces_clear_error() {
        let env = TestEnv::new();
        env.write_global_config("this is [[[not valid toml");

        let err_msg = format!("{:#}", env.load().unwrap_err());
        assert!(
            err_msg.contains("failed to parse config file"),
            "error should mention parsing failure, got: {err_msg}"
        );
    }

    #[test]
    fn multi_letter_prefix_is_rejected() {
        let env = TestEnv::new();
        env.write_global_config(
            r#"
[symbols]
register_prefix = "ab"
"#,
        );
        assert!(env.load().is_err());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let env = TestEnv::new();
        env.write_global_config(
            r#"
[output]
color = "never"
some_future_key = true

[some_future_section]
value = 42
"#,
        );

        let config = env.load().unwrap();
        assert_eq!(config.output.color, "never");
    }

    #[test]
    fn wrong_type_produces_error() {
        let env = TestEnv::new();
        env.write_global_config(
            r#"
[output]
max_display_path = "wide"
"#,
        );

        let err_msg = format!("{:#}", env.load().unwrap_err());
        assert!(err_msg.contains("failed to parse config file"));
    }

    #[test]
    fn empty_config_files_are_fine() {
        let mut env = TestEnv::new();
        env.write_global_config("");
        env.create_root();
        env.write_root_config("");
        assert_eq!(env.load().unwrap(), Config::default());
    }

    #[test]
    fn no_global_dir_uses_only_defaults() {
        let config = Config::load_with_global_dir(None, None).unwrap();
        assert_eq!(config, Config::default());
    }
}
