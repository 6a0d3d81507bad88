use anyhow::Result;

use super::CommandContext;
use crate::application::use_cases::{
    RemoveWorkspaceConfig, RemoveWorkspaceOutcome, RemoveWorkspaceUseCase,
};

/// Remove a workspace by name, or the one containing the working directory
pub struct RemoveCommand {
    pub name: Option<String>,
}

impl RemoveCommand {
    pub fn new(name: Option<String>) -> Self {
        Self { name }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let config = RemoveWorkspaceConfig {
            name: self.name.clone(),
        };
        let outcome = RemoveWorkspaceUseCase::new(ctx.collaborators(), config)
            .execute(&ctx.cwd)
            .await?;

        match outcome {
            RemoveWorkspaceOutcome::Removed(result) => {
                ctx.display
                    .print_summary("Workspace Removal Complete", &result.steps);
            }
            // 中止は正常終了
            RemoveWorkspaceOutcome::Aborted => {
                tracing::debug!("removal aborted at confirmation");
            }
        }
        Ok(())
    }
}
