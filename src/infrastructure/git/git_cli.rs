use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::git_interface::{GitOperations, WorktreeSpec};
use crate::common::result::WspaceResult;
use crate::infrastructure::process::{args, CommandExecutor, ExecutionConfig};

/// Git implementation backed by the `git` executable
pub struct GitCli {
    git_executable: String,
    executor: CommandExecutor,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            git_executable: "git".to_string(),
            executor: CommandExecutor::new(),
        }
    }
}

impl GitCli {
    /// Create a new Git instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new Git instance with custom executable path
    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            git_executable: executable.into(),
            executor: CommandExecutor::new(),
        }
    }

    /// Run git and return trimmed stdout, failing on non-zero exit
    async fn run_captured(&self, cwd: &Path, git_args: Vec<String>) -> WspaceResult<String> {
        let result = self
            .executor
            .execute_checked(&self.git_executable, &git_args, &ExecutionConfig::captured(cwd))
            .await?;
        Ok(result.stdout_trimmed().to_string())
    }

    /// Run git with output streamed to the terminal
    async fn run_live(&self, cwd: &Path, git_args: Vec<String>) -> WspaceResult<()> {
        self.executor
            .execute_checked(&self.git_executable, &git_args, &ExecutionConfig::live(cwd))
            .await?;
        Ok(())
    }

    /// Run git and only report whether it exited zero
    async fn succeeds(&self, cwd: &Path, git_args: Vec<String>) -> WspaceResult<bool> {
        let result = self
            .executor
            .execute(&self.git_executable, &git_args, &ExecutionConfig::captured(cwd))
            .await?;
        Ok(result.success)
    }
}

#[async_trait]
impl GitOperations for GitCli {
    async fn common_dir(&self, cwd: &Path) -> WspaceResult<PathBuf> {
        let out = self
            .run_captured(cwd, args(["rev-parse", "--git-common-dir"]))
            .await?;
        Ok(PathBuf::from(out))
    }

    async fn list_worktrees(&self, root: &Path) -> WspaceResult<String> {
        let result = self
            .executor
            .execute_checked(
                &self.git_executable,
                &args(["worktree", "list", "--porcelain"]),
                &ExecutionConfig::captured(root),
            )
            .await?;
        // trailing blank lines matter to the parser, keep stdout untrimmed
        Ok(result.stdout)
    }

    async fn ref_exists(&self, root: &Path, reference: &str) -> WspaceResult<bool> {
        self.succeeds(root, args(["rev-parse", "--verify", "--quiet", reference]))
            .await
    }

    async fn add_worktree(&self, root: &Path, spec: &WorktreeSpec) -> WspaceResult<()> {
        self.run_live(root, spec.to_args()).await
    }

    async fn remove_worktree(&self, root: &Path, path: &Path) -> WspaceResult<()> {
        let path = path.to_string_lossy().into_owned();
        self.run_live(root, args(["worktree", "remove", "--force", path.as_str()]))
            .await
    }

    async fn delete_branch(&self, root: &Path, branch: &str) -> WspaceResult<()> {
        self.run_live(root, args(["branch", "-D", branch])).await
    }

    async fn clone_bare(&self, cwd: &Path, url: &str, dest: &Path) -> WspaceResult<()> {
        let dest = dest.to_string_lossy().into_owned();
        self.run_live(cwd, args(["clone", "--bare", url, dest.as_str()]))
            .await
    }

    async fn set_config(&self, cwd: &Path, key: &str, value: &str) -> WspaceResult<()> {
        self.run_captured(cwd, args(["config", key, value])).await?;
        Ok(())
    }

    async fn fetch(&self, cwd: &Path, remote: &str) -> WspaceResult<()> {
        self.run_live(cwd, args(["fetch", remote])).await
    }

    async fn symbolic_ref(&self, cwd: &Path, name: &str) -> WspaceResult<Option<String>> {
        let result = self
            .executor
            .execute(
                &self.git_executable,
                &args(["symbolic-ref", "--quiet", name]),
                &ExecutionConfig::captured(cwd),
            )
            .await?;
        if !result.success {
            return Ok(None);
        }
        let target = result.stdout_trimmed();
        Ok((!target.is_empty()).then(|| target.to_string()))
    }
}
