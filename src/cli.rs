// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! All value flags are optional; anything not given here falls back to the
//! config file (if any) and then to built-in defaults. See
//! `config::model::Settings` for the merge rules.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `thumbwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "thumbwatch",
    version,
    about = "Watch a document folder and keep thumbnails and a name index in sync.",
    long_about = None
)]
pub struct CliArgs {
    /// Directory containing the source documents.
    #[arg(long, value_name = "DIR")]
    pub source: Option<String>,

    /// Output directory for generated thumbnails.
    ///
    /// Default: `<source>/thumbs`.
    #[arg(long, value_name = "DIR")]
    pub out: Option<String>,

    /// Thumbnail width in pixels.
    #[arg(long, value_name = "PX")]
    pub size: Option<u32>,

    /// Quiet period in seconds before a burst of changes triggers one
    /// regeneration pass.
    #[arg(long, value_name = "SECS")]
    pub debounce: Option<f64>,

    /// Skip the generation pass normally run once at startup.
    #[arg(long)]
    pub no_initial: bool,

    /// Run one generation pass based on current directory contents, no watching.
    #[arg(long)]
    pub once: bool,

    /// Path to the config file (TOML).
    ///
    /// Default: `Thumbwatch.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `THUMBWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the effective settings, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
