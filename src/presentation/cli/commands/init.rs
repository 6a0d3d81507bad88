use anyhow::Result;

use super::CommandContext;
use crate::application::use_cases::{BootstrapProjectConfig, BootstrapProjectUseCase};

/// Clone a repository into a new project root
pub struct InitCommand {
    /// Remote URL or local path of the repository
    pub url: String,
    /// Project directory name; derived from the URL when omitted
    pub name: Option<String>,
}

impl InitCommand {
    pub fn new(url: String, name: Option<String>) -> Self {
        Self { url, name }
    }

    /// Execute the init command
    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let config = BootstrapProjectConfig {
            url: self.url.clone(),
            name: self.name.clone(),
        };
        let result = BootstrapProjectUseCase::new(ctx.collaborators(), config)
            .execute(&ctx.cwd)
            .await?;

        ctx.display
            .print_summary("Workspace Setup Complete", &result.steps);
        Ok(())
    }
}
