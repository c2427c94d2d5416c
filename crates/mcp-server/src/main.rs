//! CV Site MCP Server
//!
//! Lets an AI agent maintain a personal CV webpage: list and read sections,
//! add/remove publications and talks, record work experience and education,
//! replace the skills and languages lists, update the profile text, then
//! regenerate the PDF artifact and commit/push the site repository.
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "cvsite": {
//!       "command": "cvsite-mcp",
//!       "env": { "CVSITE_DIR": "/path/to/site" }
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use rmcp::transport::stdio;
use rmcp::ServiceExt;

mod config;
mod tools;

use config::SiteConfig;
use tools::CvSiteService;

#[tokio::main]
async fn main() -> Result<()> {
    // Logging goes to stderr only; stdout carries the MCP protocol.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = SiteConfig::from_env();
    log::info!("Starting CV site MCP server for {}", config.root.display());

    let service = CvSiteService::new(config);
    let server = service.serve(stdio()).await?;

    server.waiting().await?;

    log::info!("CV site MCP server stopped");
    Ok(())
}
