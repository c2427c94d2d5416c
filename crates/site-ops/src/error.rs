use thiserror::Error;

/// Result type for collaborator operations
pub type Result<T> = std::result::Result<T, OpsError>;

/// Failures from the render and source-control collaborators. Diagnostic
/// output from the external tool is carried verbatim.
#[derive(Error, Debug)]
pub enum OpsError {
    /// The external tool exited non-zero
    #[error("{tool} failed: {output}")]
    ToolFailed { tool: String, output: String },

    /// The external tool exceeded its wall-clock limit
    #[error("{tool} timed out after {seconds}s")]
    Timeout { tool: String, seconds: u64 },

    /// Document could not be loaded for rendering
    #[error(transparent)]
    Document(#[from] cvsite_document::DocumentError),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
