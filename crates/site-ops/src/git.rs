//! Git collaborator for the site repository.
//!
//! Thin wrapper over the `git` CLI: every call shells out, captures both
//! streams, and surfaces the tool's own diagnostics on failure. No retries.

use std::path::PathBuf;
use std::process::Output;

use tokio::process::Command;

use crate::error::{OpsError, Result};

/// Report from a stage-commit-push cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitReport {
    /// The working tree was clean; nothing was committed or pushed.
    NothingToCommit,
    /// All three steps completed, in the listed order.
    Pushed { steps: Vec<String> },
}

pub struct GitClient {
    repo_dir: PathBuf,
}

impl GitClient {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    async fn git(&self, args: &[&str]) -> Result<Output> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_dir)
            .args(args)
            .output()
            .await?;
        Ok(output)
    }

    fn require_success(output: Output, action: &str) -> Result<String> {
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(OpsError::ToolFailed {
                tool: format!("git {action}"),
                output: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    /// Short-format status. An empty string means a clean working tree.
    pub async fn status(&self) -> Result<String> {
        let output = self.git(&["status", "--short"]).await?;
        Self::require_success(output, "status")
    }

    /// Summary of unstaged changes (`git diff --stat`).
    pub async fn diff_stat(&self) -> Result<String> {
        let output = self.git(&["diff", "--stat"]).await?;
        Self::require_success(output, "diff")
    }

    /// Stages everything, commits with `message`, and pushes. Steps already
    /// completed are reported inside the error when a later step fails.
    pub async fn commit_push(&self, message: &str) -> Result<CommitReport> {
        let add = self.git(&["add", "-A"]).await?;
        Self::require_success(add, "add")?;
        let mut steps = vec!["changes staged".to_string()];

        let commit = self.git(&["commit", "-m", message]).await?;
        if !commit.status.success() {
            let stdout = String::from_utf8_lossy(&commit.stdout);
            if stdout.contains("nothing to commit") {
                return Ok(CommitReport::NothingToCommit);
            }
            return Err(OpsError::ToolFailed {
                tool: "git commit".to_string(),
                output: String::from_utf8_lossy(&commit.stderr).trim().to_string(),
            });
        }
        steps.push(format!("committed: {message}"));

        let push = self.git(&["push"]).await?;
        if !push.status.success() {
            return Err(OpsError::ToolFailed {
                tool: "git push".to_string(),
                output: format!(
                    "{}\ncompleted so far: {}",
                    String::from_utf8_lossy(&push.stderr).trim(),
                    steps.join(", ")
                ),
            });
        }
        steps.push("pushed".to_string());
        Ok(CommitReport::Pushed { steps })
    }
}
