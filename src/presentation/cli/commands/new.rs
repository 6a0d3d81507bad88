use anyhow::Result;

use super::CommandContext;
use crate::application::use_cases::{CreateWorkspaceConfig, CreateWorkspaceUseCase};

/// Create a workspace: worktree, branch and its own environment
pub struct NewCommand {
    pub name: String,
    pub identifier: Option<String>,
    pub base: Option<String>,
}

impl NewCommand {
    pub fn new(name: String, identifier: Option<String>, base: Option<String>) -> Self {
        Self {
            name,
            identifier,
            base,
        }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let config = CreateWorkspaceConfig {
            name: self.name.clone(),
            identifier: self.identifier.clone(),
            base: self.base.clone(),
        };
        let result = CreateWorkspaceUseCase::new(ctx.collaborators(), config)
            .execute(&ctx.cwd)
            .await?;

        ctx.display
            .print_summary("Workspace Setup Complete", &result.steps);
        Ok(())
    }
}
