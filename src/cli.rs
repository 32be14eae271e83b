use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// asmnav - go to definition and find references in assembly sources
#[derive(Parser, Debug)]
#[command(name = "asmnav", version, about)]
pub struct Cli {
    /// Output results as JSON Lines
    #[arg(long, global = true)]
    pub json: bool,

    /// When to color the report (overrides config)
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find where a RAM variable or label is declared
    Definition(DefinitionArgs),

    /// Find where a variable or branch target is used
    Reference(ReferenceArgs),

    /// Report jsr/jmp calls whose target lacks an explicit .l qualifier
    Lint(LintArgs),
}

#[derive(clap::Args, Debug)]
pub struct DefinitionArgs {
    /// The selected symbol (e.g. `MYVAR`, `aMYVAR`, `LOOP1:`)
    pub token: String,

    /// Directory to scan
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct ReferenceArgs {
    /// The selected symbol
    pub token: String,

    /// Full text of the line the symbol was selected on
    #[arg(long)]
    pub line: Option<String>,

    /// Directory to scan
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct LintArgs {
    /// Directory to scan
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorChoice::Auto => "auto",
            ColorChoice::Always => "always",
            ColorChoice::Never => "never",
        }
    }
}

impl Command {
    /// The scan root named by the subcommand.
    pub fn root(&self) -> &PathBuf {
        match self {
            Command::Definition(args) => &args.root,
            Command::Reference(args) => &args.root,
            Command::Lint(args) => &args.root,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
