pub mod bootstrap_project;
pub mod create_workspace;
pub mod list_workspaces;
pub mod remove_workspace;

#[cfg(test)]
mod test_support;

pub use bootstrap_project::{BootstrapProjectConfig, BootstrapProjectResult, BootstrapProjectUseCase};
pub use create_workspace::{CreateWorkspaceConfig, CreateWorkspaceResult, CreateWorkspaceUseCase};
pub use list_workspaces::{ListWorkspacesResult, ListWorkspacesUseCase};
pub use remove_workspace::{
    RemoveWorkspaceConfig, RemoveWorkspaceOutcome, RemoveWorkspaceResult, RemoveWorkspaceUseCase,
};

use crate::infrastructure::environment::EnvironmentManager;
use crate::infrastructure::git::GitOperations;
use crate::infrastructure::terminal::Console;

/// External collaborators of the workflows
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub git: &'a dyn GitOperations,
    pub environment: &'a dyn EnvironmentManager,
    pub console: &'a dyn Console,
}

impl<'a> Collaborators<'a> {
    pub fn new(
        git: &'a dyn GitOperations,
        environment: &'a dyn EnvironmentManager,
        console: &'a dyn Console,
    ) -> Self {
        Self {
            git,
            environment,
            console,
        }
    }
}
