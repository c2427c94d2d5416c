//! Site location configuration.

use std::env;
use std::path::PathBuf;

/// Environment variable naming the site checkout directory.
pub const SITE_DIR_ENV: &str = "CVSITE_DIR";

/// Resolved locations of the document and its derived artifact.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub root: PathBuf,
}

impl SiteConfig {
    /// Resolves the site directory from `CVSITE_DIR`, defaulting to the
    /// current directory.
    pub fn from_env() -> Self {
        let root = env::var_os(SITE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { root }
    }

    /// The canonical document file.
    pub fn document_path(&self) -> PathBuf {
        self.root.join("index.html")
    }

    /// Where the regenerated PDF artifact lands.
    pub fn pdf_output(&self) -> PathBuf {
        self.root.join("curriculum").join("download.pdf")
    }
}
