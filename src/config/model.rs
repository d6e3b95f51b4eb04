// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow};
use serde::Deserialize;

use crate::cli::CliArgs;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [paths]
/// source = "./pdfs"
/// out = "./pdfs/thumbs"
///
/// [generate]
/// command = "python3 tools/generate_thumbnails.py"
/// size = 320
///
/// [watch]
/// debounce_secs = 2.0
/// extension = "pdf"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Source and output directories from `[paths]`.
    #[serde(default)]
    pub paths: PathsSection,

    /// Renderer invocation settings from `[generate]`.
    #[serde(default)]
    pub generate: GenerateSection,

    /// Watch-loop behaviour from `[watch]`.
    #[serde(default)]
    pub watch: WatchSection,
}

/// `[paths]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsSection {
    /// Directory containing the source documents.
    #[serde(default)]
    pub source: Option<String>,

    /// Output directory for thumbnails; defaults to `<source>/thumbs`.
    #[serde(default)]
    pub out: Option<String>,
}

/// `[generate]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateSection {
    /// Renderer command, split on whitespace into program + leading args.
    ///
    /// `--source`, `--out` and `--size` are appended at invocation time.
    #[serde(default = "default_command")]
    pub command: String,

    /// Thumbnail width in pixels.
    #[serde(default = "default_size")]
    pub size: u32,
}

fn default_command() -> String {
    "python3 tools/generate_thumbnails.py".to_string()
}

fn default_size() -> u32 {
    320
}

impl Default for GenerateSection {
    fn default() -> Self {
        Self {
            command: default_command(),
            size: default_size(),
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Quiet period in seconds before a burst of changes triggers one run.
    #[serde(default = "default_debounce_secs")]
    pub debounce_secs: f64,

    /// Document extension to watch for, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Whether to watch subdirectories of the source root.
    #[serde(default = "default_true")]
    pub recursive: bool,

    /// Whether to run one generation pass at startup before watching.
    #[serde(default = "default_true")]
    pub initial_pass: bool,
}

fn default_debounce_secs() -> f64 {
    2.0
}

fn default_extension() -> String {
    "pdf".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            debounce_secs: default_debounce_secs(),
            extension: default_extension(),
            recursive: default_true(),
            initial_pass: default_true(),
        }
    }
}

/// Effective settings after merging CLI arguments over the config file.
///
/// CLI flags win; anything the CLI leaves unset comes from the file; anything
/// the file leaves unset comes from the section defaults above.
#[derive(Debug, Clone)]
pub struct Settings {
    pub source: PathBuf,
    pub out: PathBuf,
    pub size: u32,
    pub debounce_secs: f64,
    pub extension: String,
    pub recursive: bool,
    pub initial_pass: bool,
    pub command: String,
}

impl Settings {
    /// Merge CLI arguments over file values.
    ///
    /// The only field without any default is the source directory; it must be
    /// given either on the command line or in `[paths].source`.
    pub fn resolve(args: &CliArgs, file: ConfigFile) -> Result<Self> {
        let source: PathBuf = args
            .source
            .clone()
            .or(file.paths.source)
            .map(PathBuf::from)
            .ok_or_else(|| {
                anyhow!("no source directory given (use --source or [paths].source in the config)")
            })?;

        let out: PathBuf = args
            .out
            .clone()
            .or(file.paths.out)
            .map(PathBuf::from)
            .unwrap_or_else(|| source.join("thumbs"));

        Ok(Self {
            source,
            out,
            size: args.size.unwrap_or(file.generate.size),
            debounce_secs: args.debounce.unwrap_or(file.watch.debounce_secs),
            extension: file.watch.extension,
            recursive: file.watch.recursive,
            initial_pass: file.watch.initial_pass && !args.no_initial,
            command: file.generate.command,
        })
    }

    /// Debounce quiet period as a `Duration`.
    ///
    /// Only meaningful after `validate_settings` has checked that
    /// `debounce_secs` is finite and positive.
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_secs_f64(self.debounce_secs)
    }
}
