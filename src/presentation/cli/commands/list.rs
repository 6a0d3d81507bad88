use anyhow::Result;

use super::CommandContext;
use crate::application::use_cases::ListWorkspacesUseCase;
use crate::presentation::cli::OutputFormat;

/// List the workspaces of the current project
pub struct ListCommand {
    pub output: OutputFormat,
}

impl ListCommand {
    pub fn new(output: OutputFormat) -> Self {
        Self { output }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let result = ListWorkspacesUseCase::new(&ctx.git)
            .execute(&ctx.cwd)
            .await?;

        match self.output {
            OutputFormat::Text => ctx.display.print_workspaces(&result.workspaces),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&result)?;
                println!("{}", json);
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(&result)?;
                print!("{}", yaml);
            }
        }
        Ok(())
    }
}
