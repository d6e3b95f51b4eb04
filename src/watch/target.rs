// src/watch/target.rs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::config::Settings;

/// The resolved pair of directories the watcher operates on.
///
/// The source root is canonicalized (and must exist); the output root is made
/// absolute but may not exist yet, since the renderer creates it on demand.
/// When the output root is nested under the source root, events inside it are
/// excluded from classification, otherwise every generated thumbnail would
/// re-trigger a generation pass.
#[derive(Debug, Clone)]
pub struct WatchTarget {
    pub source_root: PathBuf,
    pub output_root: PathBuf,
    pub recursive: bool,
    excluded: Option<PathBuf>,
}

impl WatchTarget {
    /// Resolve the configured paths into absolute, comparable form.
    ///
    /// A missing source directory is a configuration fault: the watch loop
    /// must not start against a root that does not exist.
    pub fn resolve(settings: &Settings) -> Result<Self> {
        let source_abs = std::path::absolute(&settings.source)
            .with_context(|| format!("resolving source path {:?}", settings.source))?;
        let source_root = source_abs
            .canonicalize()
            .with_context(|| format!("source directory does not exist: {:?}", settings.source))?;
        if !source_root.is_dir() {
            return Err(anyhow!("source path is not a directory: {source_root:?}"));
        }

        let out_abs = std::path::absolute(&settings.out)
            .with_context(|| format!("resolving output path {:?}", settings.out))?;

        // Re-base a nested output root onto the canonical source root, so the
        // exclusion prefix test lines up with the paths notify reports.
        let output_root = match out_abs.strip_prefix(&source_abs) {
            Ok(rel) => source_root.join(rel),
            Err(_) => out_abs,
        };

        let excluded = output_root
            .starts_with(&source_root)
            .then(|| output_root.clone());

        Ok(Self {
            source_root,
            output_root,
            recursive: settings.recursive,
            excluded,
        })
    }

    /// The output subtree to exclude from event classification, if the output
    /// root lies under the source root.
    pub fn excluded_output(&self) -> Option<&Path> {
        self.excluded.as_deref()
    }
}
