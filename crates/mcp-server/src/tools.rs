//! MCP tools for maintaining the CV page.
//!
//! Every tool is a complete load-mutate-save cycle against the document;
//! failures come back as descriptive tool errors, never a protocol fault.

use cvsite_document::{
    CvEditor, Education, Publication, RemoveOutcome, Talk, WorkExperience,
};
use cvsite_ops::{CommitReport, GitClient, PdfRenderer};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;

use crate::config::SiteConfig;

/// CV Site MCP Service
#[derive(Clone)]
pub struct CvSiteService {
    /// Resolved site locations
    config: SiteConfig,
    /// Tool router
    tool_router: ToolRouter<Self>,
}

impl CvSiteService {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            tool_router: Self::tool_router(),
        }
    }

    /// A fresh editor per call; the document is never cached across calls.
    fn editor(&self) -> CvEditor {
        CvEditor::new(self.config.document_path())
    }

    fn git(&self) -> GitClient {
        GitClient::new(&self.config.root)
    }

    fn ok(text: impl Into<String>) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(text.into())]))
    }

    fn fail(text: impl Into<String>) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::error(vec![Content::text(text.into())]))
    }
}

#[tool_handler]
impl ServerHandler for CvSiteService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Maintains a personal CV webpage. Use 'list_cv_sections' to discover sections, the add/remove tools to edit publications, talks, work experience and education, 'update_profile' and the list tools for the remaining sections, then 'regenerate_pdf' and 'git_commit_push' to publish.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Tool Input Schemas
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SectionRequest {
    /// Stable section identifier
    #[schemars(description = "Section id, e.g. 'publications', 'work-experience', 'talks'")]
    pub section_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateProfileRequest {
    #[schemars(description = "The new profile text to set")]
    pub new_text: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddPublicationRequest {
    #[schemars(description = "Author names, e.g. 'A. Rossi, L. Bianchi, and S. Verdi'")]
    pub authors: String,

    #[schemars(description = "Paper title")]
    pub title: String,

    #[schemars(description = "Publication venue (journal, conference, or 'arXiv preprint')")]
    pub venue: String,

    #[schemars(description = "Publication year")]
    pub year: String,

    #[schemars(description = "Optional arXiv ID, e.g. '2311.15444'")]
    pub arxiv_id: Option<String>,

    #[schemars(description = "Optional DOI")]
    pub doi: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemoveEntryRequest {
    #[schemars(description = "A unique substring of the entry's title")]
    pub title_substring: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddTalkRequest {
    #[schemars(description = "Date of the talk, e.g. 'Feb 2026'")]
    pub date: String,

    #[schemars(description = "Name of the event/conference")]
    pub event_name: String,

    #[schemars(description = "City and country")]
    pub location: String,

    #[schemars(description = "Type of presentation, e.g. 'Talk', 'Flash Talk', 'Poster'")]
    pub talk_type: String,

    #[schemars(description = "Title of the presentation")]
    pub talk_title: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddWorkExperienceRequest {
    #[schemars(description = "Employment period, e.g. 'Jan 2025 - Present'")]
    pub date_range: String,

    #[schemars(description = "Role/title")]
    pub job_title: String,

    #[schemars(description = "Company or institution name")]
    pub organization: String,

    #[schemars(description = "City and country")]
    pub location: String,

    #[schemars(description = "Brief description of the work (can use a 'Topic:' or 'Tasks:' prefix)")]
    pub description: String,

    #[schemars(description = "Optional URL for the organization")]
    pub org_url: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddEducationRequest {
    #[schemars(description = "Period, e.g. 'Oct 2022 - April 2026'")]
    pub date_range: String,

    #[schemars(description = "Degree name, e.g. 'PhD in Physics'")]
    pub degree: String,

    #[schemars(description = "University name")]
    pub institution: String,

    #[schemars(description = "City and country")]
    pub location: String,

    #[schemars(description = "Optional topics/research areas")]
    pub topics: Option<String>,

    #[schemars(description = "Optional thesis title")]
    pub thesis: Option<String>,

    #[schemars(description = "Optional supervisor names")]
    pub supervisors: Option<String>,

    #[schemars(description = "Optional final grade")]
    pub grade: Option<String>,

    #[schemars(description = "Optional research group name")]
    pub group_name: Option<String>,

    #[schemars(description = "Optional research group URL")]
    pub group_url: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateSkillsRequest {
    #[schemars(description = "Full replacement list of skill strings, e.g. ['Python, PyTorch - advanced']")]
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateLanguagesRequest {
    #[schemars(description = "Full replacement list of language strings, e.g. ['Italian - native']")]
    pub languages: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CommitRequest {
    #[schemars(description = "The commit message to use")]
    pub commit_message: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl CvSiteService {
    /// Section discovery
    #[tool(description = "List all CV sections with their ids, titles, and entry counts. Use this first to discover section ids.")]
    pub async fn list_cv_sections(&self) -> Result<CallToolResult, McpError> {
        match self.editor().list_sections() {
            Ok(sections) => Self::ok(serde_json::to_string_pretty(&sections).unwrap_or_default()),
            Err(e) => Self::fail(format!("Error: {e}")),
        }
    }

    #[tool(description = "Get the plain-text content of a specific section.")]
    pub async fn get_section_content(
        &self,
        Parameters(request): Parameters<SectionRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.editor().section_content(&request.section_id) {
            Ok(text) => Self::ok(text),
            Err(e) => Self::fail(format!("Error: {e}")),
        }
    }

    #[tool(description = "Get the raw HTML of a specific section for manual inspection.")]
    pub async fn get_raw_section(
        &self,
        Parameters(request): Parameters<SectionRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.editor().raw_section(&request.section_id) {
            Ok(markup) => Self::ok(markup),
            Err(e) => Self::fail(format!("Error: {e}")),
        }
    }

    #[tool(description = "Get the current profile/bio text.")]
    pub async fn get_profile(&self) -> Result<CallToolResult, McpError> {
        match self.editor().profile() {
            Ok(text) => Self::ok(text),
            Err(e) => Self::fail(format!("Error: {e}")),
        }
    }

    #[tool(description = "Replace the profile/bio paragraph.")]
    pub async fn update_profile(
        &self,
        Parameters(request): Parameters<UpdateProfileRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.editor().update_profile(&request.new_text) {
            Ok(()) => Self::ok("Profile updated successfully."),
            Err(e) => Self::fail(format!("Error: {e}")),
        }
    }

    #[tool(description = "Add a new publication at the top of the publications list (newest first).")]
    pub async fn add_publication(
        &self,
        Parameters(request): Parameters<AddPublicationRequest>,
    ) -> Result<CallToolResult, McpError> {
        let publication = Publication {
            authors: request.authors,
            title: request.title.clone(),
            venue: request.venue,
            year: request.year,
            arxiv_id: request.arxiv_id,
            doi: request.doi,
        };
        match self.editor().add_publication(&publication) {
            Ok(()) => Self::ok(format!("Publication '{}' added successfully.", request.title)),
            Err(e) => Self::fail(format!("Error: {e}")),
        }
    }

    #[tool(description = "Remove a publication by a substring of its title. If several match, the candidates are listed and nothing is removed.")]
    pub async fn remove_publication(
        &self,
        Parameters(request): Parameters<RemoveEntryRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.editor().remove_publication(&request.title_substring) {
            Ok(RemoveOutcome::Removed { preview }) => {
                Self::ok(format!("Removed publication: {preview}"))
            }
            Ok(RemoveOutcome::NoMatch) => Self::fail(format!(
                "No publication found containing '{}'",
                request.title_substring
            )),
            Ok(RemoveOutcome::Ambiguous { candidates }) => Self::fail(format!(
                "Multiple publications match '{}'; nothing was removed. Candidates:\n- {}",
                request.title_substring,
                candidates.join("\n- ")
            )),
            Err(e) => Self::fail(format!("Error: {e}")),
        }
    }

    #[tool(description = "Add a new talk/presentation at the top of the talks section.")]
    pub async fn add_talk(
        &self,
        Parameters(request): Parameters<AddTalkRequest>,
    ) -> Result<CallToolResult, McpError> {
        let talk = Talk {
            date: request.date,
            event_name: request.event_name,
            location: request.location,
            talk_type: request.talk_type,
            talk_title: request.talk_title.clone(),
        };
        match self.editor().add_talk(&talk) {
            Ok(()) => Self::ok(format!("Talk '{}' added successfully.", request.talk_title)),
            Err(e) => Self::fail(format!("Error: {e}")),
        }
    }

    #[tool(description = "Remove a talk by a substring of its title. If several match, the candidates are listed and nothing is removed.")]
    pub async fn remove_talk(
        &self,
        Parameters(request): Parameters<RemoveEntryRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.editor().remove_talk(&request.title_substring) {
            Ok(RemoveOutcome::Removed { preview }) => Self::ok(format!("Removed talk: {preview}")),
            Ok(RemoveOutcome::NoMatch) => Self::fail(format!(
                "No talk found containing '{}'",
                request.title_substring
            )),
            Ok(RemoveOutcome::Ambiguous { candidates }) => Self::fail(format!(
                "Multiple talks match '{}'; nothing was removed. Candidates:\n- {}",
                request.title_substring,
                candidates.join("\n- ")
            )),
            Err(e) => Self::fail(format!("Error: {e}")),
        }
    }

    #[tool(description = "Add a new work experience entry at the top of the section.")]
    pub async fn add_work_experience(
        &self,
        Parameters(request): Parameters<AddWorkExperienceRequest>,
    ) -> Result<CallToolResult, McpError> {
        let job = WorkExperience {
            date_range: request.date_range,
            job_title: request.job_title,
            organization: request.organization.clone(),
            location: request.location,
            description: request.description,
            org_url: request.org_url,
        };
        match self.editor().add_work_experience(&job) {
            Ok(()) => Self::ok(format!(
                "Work experience at '{}' added successfully.",
                request.organization
            )),
            Err(e) => Self::fail(format!("Error: {e}")),
        }
    }

    #[tool(description = "Add a new education entry at the top of the section.")]
    pub async fn add_education(
        &self,
        Parameters(request): Parameters<AddEducationRequest>,
    ) -> Result<CallToolResult, McpError> {
        let education = Education {
            date_range: request.date_range,
            degree: request.degree.clone(),
            institution: request.institution,
            location: request.location,
            topics: request.topics,
            group_name: request.group_name,
            group_url: request.group_url,
            supervisors: request.supervisors,
            thesis: request.thesis,
            grade: request.grade,
        };
        match self.editor().add_education(&education) {
            Ok(()) => Self::ok(format!(
                "Education entry '{}' added successfully.",
                request.degree
            )),
            Err(e) => Self::fail(format!("Error: {e}")),
        }
    }

    #[tool(description = "Replace the software/skills list wholesale. An empty list clears the section.")]
    pub async fn update_software_skills(
        &self,
        Parameters(request): Parameters<UpdateSkillsRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.editor().update_software_skills(&request.skills) {
            Ok(count) => Self::ok(format!("Software skills updated with {count} items.")),
            Err(e) => Self::fail(format!("Error: {e}")),
        }
    }

    #[tool(description = "Replace the languages list wholesale. An empty list clears the section.")]
    pub async fn update_languages(
        &self,
        Parameters(request): Parameters<UpdateLanguagesRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.editor().update_languages(&request.languages) {
            Ok(count) => Self::ok(format!("Languages updated with {count} items.")),
            Err(e) => Self::fail(format!("Error: {e}")),
        }
    }

    #[tool(description = "Regenerate the CV PDF artifact from the current page.")]
    pub async fn regenerate_pdf(&self) -> Result<CallToolResult, McpError> {
        let renderer = PdfRenderer::new();
        match renderer
            .render(&self.config.document_path(), &self.config.pdf_output())
            .await
        {
            Ok(message) => Self::ok(message),
            Err(e) => Self::fail(format!("Error: {e}")),
        }
    }

    #[tool(description = "Check the git status of the site repository.")]
    pub async fn git_status(&self) -> Result<CallToolResult, McpError> {
        match self.git().status().await {
            Ok(status) if status.is_empty() => {
                Self::ok("Working directory clean - no changes.")
            }
            Ok(status) => Self::ok(status),
            Err(e) => Self::fail(format!("Error: {e}")),
        }
    }

    #[tool(description = "Show a summary of uncommitted changes in the site repository.")]
    pub async fn git_diff(&self) -> Result<CallToolResult, McpError> {
        match self.git().diff_stat().await {
            Ok(diff) if diff.is_empty() => Self::ok("No changes to show."),
            Ok(diff) => Self::ok(diff),
            Err(e) => Self::fail(format!("Error: {e}")),
        }
    }

    #[tool(description = "Stage all changes, commit with the given message, and push.")]
    pub async fn git_commit_push(
        &self,
        Parameters(request): Parameters<CommitRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.git().commit_push(&request.commit_message).await {
            Ok(CommitReport::NothingToCommit) => {
                Self::ok("Nothing to commit - working directory clean.")
            }
            Ok(CommitReport::Pushed { steps }) => {
                Self::ok(steps.into_iter().map(|s| format!("✓ {s}")).collect::<Vec<_>>().join("\n"))
            }
            Err(e) => Self::fail(format!("Error: {e}")),
        }
    }
}
