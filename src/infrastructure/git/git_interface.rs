use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::common::result::WspaceResult;

/// Ref namespace stripped from branch lines of the worktree listing
pub const HEADS_NAMESPACE: &str = "refs/heads/";

/// Namespace of remote-tracking branches of `origin`
pub const ORIGIN_NAMESPACE: &str = "refs/remotes/origin/";

/// Fetch mapping that mirrors every remote head, which a bare clone lacks
pub const MIRROR_FETCH_REFSPEC: &str = "+refs/heads/*:refs/remotes/origin/*";

/// How the branch of a new worktree is obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorktreeCheckout {
    /// The branch already exists and is checked out as-is
    ExistingBranch,
    /// The branch is created together with the worktree, from `base` or
    /// from the current HEAD when `base` is `None`
    NewBranch { base: Option<String> },
}

/// Arguments of a single `git worktree add`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeSpec {
    /// Path of the worktree, relative to the project root
    pub path: PathBuf,
    pub branch: String,
    pub checkout: WorktreeCheckout,
}

impl WorktreeSpec {
    pub fn existing(path: impl Into<PathBuf>, branch: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            branch: branch.into(),
            checkout: WorktreeCheckout::ExistingBranch,
        }
    }

    pub fn new_branch(
        path: impl Into<PathBuf>,
        branch: impl Into<String>,
        base: Option<String>,
    ) -> Self {
        Self {
            path: path.into(),
            branch: branch.into(),
            checkout: WorktreeCheckout::NewBranch { base },
        }
    }

    /// Arguments passed to git, starting with `worktree add`
    pub fn to_args(&self) -> Vec<String> {
        let path = self.path.to_string_lossy().into_owned();
        let mut args = vec!["worktree".to_string(), "add".to_string()];
        match &self.checkout {
            WorktreeCheckout::ExistingBranch => {
                args.push(path);
                args.push(self.branch.clone());
            }
            WorktreeCheckout::NewBranch { base } => {
                args.push("-b".to_string());
                args.push(self.branch.clone());
                args.push(path);
                if let Some(base) = base {
                    args.push(base.clone());
                }
            }
        }
        args
    }
}

/// Version-control operations the workflows depend on.
///
/// Every method takes the directory it runs in; implementations must not
/// rely on the process working directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitOperations: Send + Sync {
    /// Shared metadata directory as printed by git (may be relative to `cwd`)
    async fn common_dir(&self, cwd: &Path) -> WspaceResult<PathBuf>;

    /// Raw `git worktree list --porcelain` output
    async fn list_worktrees(&self, root: &Path) -> WspaceResult<String>;

    /// Whether `reference` resolves
    async fn ref_exists(&self, root: &Path, reference: &str) -> WspaceResult<bool>;

    async fn add_worktree(&self, root: &Path, spec: &WorktreeSpec) -> WspaceResult<()>;

    /// Forced removal, discarding uncommitted changes
    async fn remove_worktree(&self, root: &Path, path: &Path) -> WspaceResult<()>;

    /// Forced branch deletion
    async fn delete_branch(&self, root: &Path, branch: &str) -> WspaceResult<()>;

    async fn clone_bare(&self, cwd: &Path, url: &str, dest: &Path) -> WspaceResult<()>;

    async fn set_config(&self, cwd: &Path, key: &str, value: &str) -> WspaceResult<()>;

    async fn fetch(&self, cwd: &Path, remote: &str) -> WspaceResult<()>;

    /// Target of a symbolic ref, `None` when it is not set
    async fn symbolic_ref(&self, cwd: &Path, name: &str) -> WspaceResult<Option<String>>;
}
