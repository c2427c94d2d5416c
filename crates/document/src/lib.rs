//! # CV Site Document
//!
//! Document model and structured editing engine for a single CV webpage.
//!
//! The page is the canonical source of truth. This crate exposes semantic
//! edit operations over its named sections (publications, talks, work
//! experience, education, skills, languages, profile) so that callers never
//! touch the markup layout themselves.
//!
//! ## Architecture
//!
//! ```text
//! index.html
//!     │
//!     ├──> DocumentStore ── load/save, doctype preamble guarantee
//!     │
//!     ├──> Document ── parsed tree, section index, read-only views
//!     │
//!     ├──> Entry builders ── Publication / Talk / WorkExperience / Education
//!     │                      fragments with kind-specific formatting
//!     │
//!     └──> CvEditor ── load → mutate → stamp → save, one cycle per call
//! ```
//!
//! ## Example
//!
//! ```rust
//! use cvsite_document::Document;
//!
//! let doc = Document::parse(r#"<section id="talks"><h2>Talks</h2></section>"#).unwrap();
//! let sections = doc.list_sections();
//! assert_eq!(sections["talks"].title, "Talks");
//! assert_eq!(sections["talks"].entry_count, 0);
//! ```

mod builders;
mod document;
mod dom;
mod editor;
mod error;
mod sections;
mod stamp;
mod store;

pub use builders::{Education, Publication, Talk, WorkExperience};
pub use document::Document;
pub use editor::{CvEditor, RemoveOutcome};
pub use error::{DocumentError, Result};
pub use sections::SectionSummary;
pub use stamp::stamp;
pub use store::DocumentStore;
