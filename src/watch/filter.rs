// src/watch/filter.rs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Path filter shared by the event classifier and the name index scan.
///
/// A path is a *document* when its extension matches the configured one,
/// case-insensitively. It is *relevant* when it is a document that does not
/// lie under the excluded output subtree. Both tests expect absolute paths.
#[derive(Debug, Clone)]
pub struct DocumentFilter {
    documents: GlobSet,
    excluded: Option<PathBuf>,
}

impl DocumentFilter {
    pub fn new(extension: &str, excluded_output: Option<&Path>) -> Result<Self> {
        let glob = GlobBuilder::new(&format!("**/*.{extension}"))
            .case_insensitive(true)
            .build()
            .with_context(|| format!("building document glob for extension {extension:?}"))?;

        let mut builder = GlobSetBuilder::new();
        builder.add(glob);

        Ok(Self {
            documents: builder.build()?,
            excluded: excluded_output.map(Path::to_path_buf),
        })
    }

    /// Extension test only, used by the name index scan (which deliberately
    /// lists every matching file it finds, excluded subtree or not).
    pub fn is_document(&self, path: &Path) -> bool {
        self.documents.is_match(path)
    }

    /// Full relevance test for filesystem events: document extension plus
    /// prefix test against the excluded output subtree.
    pub fn is_relevant(&self, path: &Path) -> bool {
        if let Some(excluded) = &self.excluded {
            if path.starts_with(excluded) {
                return false;
            }
        }
        self.is_document(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_is_case_insensitive() {
        let filter = DocumentFilter::new("pdf", None).unwrap();
        assert!(filter.is_document(Path::new("/docs/report.pdf")));
        assert!(filter.is_document(Path::new("/docs/REPORT.PDF")));
        assert!(filter.is_document(Path::new("/docs/sub/dir/a.Pdf")));
        assert!(!filter.is_document(Path::new("/docs/report.pdf.bak")));
        assert!(!filter.is_document(Path::new("/docs/names.txt")));
    }

    #[test]
    fn excluded_subtree_beats_extension_match() {
        let filter = DocumentFilter::new("pdf", Some(Path::new("/docs/thumbs"))).unwrap();
        assert!(filter.is_relevant(Path::new("/docs/report.pdf")));
        assert!(!filter.is_relevant(Path::new("/docs/thumbs/report.pdf")));
        assert!(!filter.is_relevant(Path::new("/docs/thumbs/deep/report.pdf")));
        // prefix test is on path components, not raw strings
        assert!(filter.is_relevant(Path::new("/docs/thumbs2/report.pdf")));
    }

    #[test]
    fn document_test_ignores_exclusion() {
        let filter = DocumentFilter::new("pdf", Some(Path::new("/docs/thumbs"))).unwrap();
        assert!(filter.is_document(Path::new("/docs/thumbs/report.pdf")));
    }
}
