//! # CV Site Ops
//!
//! External collaborators for the CV site: regenerating the PDF artifact
//! through a paginating renderer, and staging/committing/pushing the site
//! repository. The document model itself lives in `cvsite-document`; this
//! crate only talks to outside tools.

mod error;
mod git;
mod pdf;

pub use error::{OpsError, Result};
pub use git::{CommitReport, GitClient};
pub use pdf::PdfRenderer;
