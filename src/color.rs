//! Color resolution: determines whether to emit ANSI color codes.
//!
//! Priority chain (highest first):
//! 1. `NO_COLOR` env (any value) → false
//! 2. `CLICOLOR_FORCE=1` env → true
//! 3. `--color` flag, then config: `"always"`/`"true"` → true,
//!    `"never"`/`"false"` → false
//! 4. `CLICOLOR=0` env → false
//! 5. TTY detection on stdout → true if terminal, false otherwise

/// Reset all attributes.
pub const RESET: &str = "\x1b[0m";
/// File paths: magenta + bold.
pub const FILE: &str = "\x1b[35m\x1b[1m";
/// Line numbers: green.
pub const LINE_NO: &str = "\x1b[32m";
/// Separators (`(`, `)`, `::`): cyan.
pub const SEP: &str = "\x1b[36m";
/// Summary header: bold.
pub const HEADER: &str = "\x1b[1m";

/// Resolve whether to use color based on environment, flag, config, and TTY.
///
/// `flag` is the `--color` value when given; it takes the place of the
/// config setting.
pub fn resolve_color(flag: Option<&str>, config_color: &str) -> bool {
    let no_color = std::env::var_os("NO_COLOR").is_some();
    let clicolor_force = std::env::var("CLICOLOR_FORCE").ok();
    let clicolor = std::env::var("CLICOLOR").ok();
    let is_tty = {
        use std::io::IsTerminal;
        std::io::stdout().is_terminal()
    };
    resolve_color_inner(
        no_color,
        clicolor_force.as_deref(),
        flag.unwrap_or(config_color),
        clicolor.as_deref(),
        is_tty,
    )
}

/// Inner resolution logic, fully parameterized for testability.
pub fn resolve_color_inner(
    no_color: bool,
    clicolor_force: Option<&str>,
    mode: &str,
    clicolor: Option<&str>,
    is_tty: bool,
) -> bool {
    if no_color {
        return false;
    }
    if clicolor_force == Some("1") {
        return true;
    }
    match mode {
        "always" | "true" => return true,
        "never" | "false" => return false,
        _ => {} // "auto" or unrecognized
    }
    if clicolor == Some("0") {
        return false;
    }
    is_tty
}
