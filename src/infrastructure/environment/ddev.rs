use async_trait::async_trait;
use std::path::Path;

use super::environment_interface::EnvironmentManager;
use crate::common::result::WspaceResult;
use crate::infrastructure::process::{args, CommandExecutor, ExecutionConfig};

/// DDEV environments, with the container runtime used for cache pruning
pub struct DdevEnvironment {
    ddev_executable: String,
    container_executable: String,
    executor: CommandExecutor,
}

impl DdevEnvironment {
    pub fn with_executables(ddev: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            ddev_executable: ddev.into(),
            container_executable: container.into(),
            executor: CommandExecutor::new(),
        }
    }

    async fn ddev(&self, workspace: &Path, ddev_args: Vec<String>) -> WspaceResult<()> {
        self.executor
            .execute_checked(
                &self.ddev_executable,
                &ddev_args,
                &ExecutionConfig::live(workspace),
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl EnvironmentManager for DdevEnvironment {
    async fn start(&self, workspace: &Path) -> WspaceResult<()> {
        self.ddev(workspace, args(["start"])).await
    }

    async fn delete(&self, workspace: &Path) -> WspaceResult<()> {
        self.ddev(workspace, args(["delete", "--omit-snapshot", "--yes"]))
            .await
    }

    async fn import_snapshot(&self, workspace: &Path, snapshot: &Path) -> WspaceResult<()> {
        let file_arg = format!("--file={}", snapshot.display());
        self.ddev(workspace, args(["import-db", file_arg.as_str()]))
            .await
    }

    async fn reclaim_build_cache(&self, cwd: &Path) -> WspaceResult<()> {
        self.executor
            .execute_checked(
                &self.container_executable,
                &args(["builder", "prune", "-f"]),
                &ExecutionConfig::live(cwd),
            )
            .await?;
        Ok(())
    }
}
