//! Loading and persisting the CV page.

use std::fs;
use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::{DocumentError, Result};

/// Owns the path of the backing document file. Carries no edit logic and
/// no cached state; every `load` re-reads from disk.
pub struct DocumentStore {
    path: PathBuf,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the document. `NotFound` when the file is absent,
    /// `Parse` when the markup cannot form a tree.
    pub fn load(&self) -> Result<Document> {
        if !self.path.exists() {
            return Err(DocumentError::NotFound(self.path.clone()));
        }
        let markup = fs::read_to_string(&self.path)?;
        Document::parse(&markup)
    }

    /// Writes the serialized tree back to disk.
    pub fn save(&self, document: &Document) -> Result<()> {
        fs::write(&self.path, document.serialize())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("index.html"));
        let err = store.load().err().expect("load should fail");
        match err {
            DocumentError::NotFound(path) => assert!(path.ends_with("index.html")),
            other => panic!("expected NotFound, got {other}"),
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("index.html"));
        let doc =
            Document::parse(r#"<section id="profile"><h2>Profile</h2><p>text</p></section>"#)
                .unwrap();
        store.save(&doc).unwrap();
        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.section_text("profile").unwrap(), doc.section_text("profile").unwrap());
    }
}
