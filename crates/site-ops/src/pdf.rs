//! PDF regeneration through an external paginating renderer.
//!
//! The artifact is always rebuilt from scratch: the current page is loaded,
//! interactive-only controls are stripped, and the pruned markup is handed
//! to the renderer. The renderer run is bounded by a wall-clock limit and
//! a timeout is reported as its own failure, distinct from a non-zero exit.

use std::path::{Path, PathBuf};
use std::time::Duration;

use cvsite_document::DocumentStore;
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::{OpsError, Result};

const DEFAULT_RENDERER: &str = "weasyprint";
const RENDER_TIMEOUT: Duration = Duration::from_secs(60);

pub struct PdfRenderer {
    command: PathBuf,
    timeout: Duration,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::with_command(DEFAULT_RENDERER)
    }

    pub fn with_command(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            timeout: RENDER_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Renders `document_path` into a fresh PDF at `output_path`.
    pub async fn render(&self, document_path: &Path, output_path: &Path) -> Result<String> {
        let scratch = tempfile::Builder::new()
            .prefix("cvsite-render-")
            .suffix(".html")
            .tempfile()?;
        {
            // Scoped so the parsed tree is gone before the renderer runs.
            let store = DocumentStore::new(document_path);
            let mut document = store.load()?;
            let stripped = document.strip_interactive_controls();
            log::debug!("stripped {stripped} interactive controls before rendering");
            std::fs::write(scratch.path(), document.serialize())?;
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tool = self.command.to_string_lossy().to_string();
        let mut command = Command::new(&self.command);
        if let Some(base) = document_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            // Relative asset paths resolve against the site dir, not the
            // scratch location.
            command.arg("-u").arg(base);
        }
        command.arg(scratch.path()).arg(output_path);

        let output = timeout(self.timeout, command.output())
            .await
            .map_err(|_| OpsError::Timeout {
                tool: tool.clone(),
                seconds: self.timeout.as_secs(),
            })??;

        if output.status.success() {
            log::info!("PDF regenerated at {}", output_path.display());
            Ok(format!("PDF saved to {}", output_path.display()))
        } else {
            Err(OpsError::ToolFailed {
                tool,
                output: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}
