// src/index.rs

//! The persisted name index: a sorted, newline-delimited list of every
//! document currently under the source root, kept at `<source>/names.txt`.
//!
//! The index is rebuilt in full on every update; there is no incremental
//! diffing. Two writers can race (a delete-triggered update and a debounced
//! pass), so writes are serialised behind a mutex and land via an atomic
//! rename, leaving last-writer-wins as the consistency model.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::watch::DocumentFilter;

/// File name of the index, relative to the source root.
pub const INDEX_FILE_NAME: &str = "names.txt";

/// Scratch file the index is written to before being renamed into place.
const INDEX_TMP_FILE_NAME: &str = ".names.txt.tmp";

/// Maintains `<source>/names.txt`.
#[derive(Debug)]
pub struct NameIndex {
    root: PathBuf,
    filter: DocumentFilter,
    write_lock: Mutex<()>,
}

impl NameIndex {
    pub fn new(root: PathBuf, filter: DocumentFilter) -> Self {
        Self {
            root,
            filter,
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the persisted index file.
    pub fn path(&self) -> PathBuf {
        self.root.join(INDEX_FILE_NAME)
    }

    /// Rescan the source root and overwrite the index.
    ///
    /// File names are collected recursively (duplicates across subdirectories
    /// are preserved as-is, since the index stores names, not paths), sorted
    /// case-insensitively, and written one per line in UTF-8. The write goes
    /// to a scratch file in the same directory followed by a rename, so
    /// concurrent readers never observe a partial index.
    ///
    /// A missing source root, or a root that vanishes mid-scan, is a warning
    /// and a no-op, never an error.
    pub fn update(&self) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if !self.root.is_dir() {
            warn!(root = ?self.root, "source directory missing, skipping name index update");
            return Ok(());
        }

        let mut names = Vec::new();
        if let Err(err) = self.collect_names(&self.root, &mut names) {
            warn!(error = %err, root = ?self.root, "scan failed, leaving name index untouched");
            return Ok(());
        }

        names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));

        let mut contents = String::new();
        for name in &names {
            contents.push_str(name);
            contents.push('\n');
        }

        let tmp = self.root.join(INDEX_TMP_FILE_NAME);
        fs::write(&tmp, contents.as_bytes())
            .with_context(|| format!("writing name index scratch file {tmp:?}"))?;
        fs::rename(&tmp, self.path())
            .with_context(|| format!("renaming {tmp:?} over {:?}", self.path()))?;

        info!(count = names.len(), path = ?self.path(), "name index updated");
        Ok(())
    }

    fn collect_names(&self, dir: &Path, names: &mut Vec<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                self.collect_names(&path, names)?;
            } else if self.filter.is_document(&path) {
                match path.file_name().and_then(|n| n.to_str()) {
                    Some(name) => names.push(name.to_string()),
                    None => warn!(path = ?path, "skipping non-UTF-8 file name"),
                }
            }
        }
        Ok(())
    }
}
