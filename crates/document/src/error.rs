use std::path::PathBuf;

use thiserror::Error;

/// Result type for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Errors that can occur while loading, inspecting, or editing the document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The backing document file does not exist
    #[error("document not found at {0}")]
    NotFound(PathBuf),

    /// The stored markup could not be parsed into a tree
    #[error("parse error: {0}")]
    Parse(String),

    /// A named section is absent; `known` lists every valid identifier
    #[error("section '{id}' not found; available sections: {}", .known.join(", "))]
    SectionMissing { id: String, known: Vec<String> },

    /// The section exists but lacks the substructure the operation needs
    #[error("section '{id}' has no {expected}")]
    MalformedSection { id: String, expected: &'static str },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocumentError {
    pub(crate) fn stale_node() -> Self {
        Self::Parse("node id no longer resolves in the tree".to_string())
    }
}
