use serde::Serialize;
use std::path::{Path, PathBuf};

/// One record of the worktree registry.
///
/// Rebuilt from `git worktree list --porcelain` on every invocation and
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceEntry {
    /// Path relative to the workspaces directory. For entries outside that
    /// directory this is the full path.
    pub name: String,

    /// Short branch name; `None` when detached.
    pub branch: Option<String>,

    pub path: PathBuf,

    /// The record is the shared object store, not a checkout.
    #[serde(skip)]
    pub is_primary: bool,

    /// The record lives under the workspaces directory.
    #[serde(skip)]
    pub in_spaces: bool,
}

impl WorkspaceEntry {
    /// Entries shown by `list`.
    pub fn is_listed(&self) -> bool {
        !self.is_primary && self.in_spaces
    }

    /// Entries that `remove` may target.
    pub fn is_removable(&self) -> bool {
        !self.is_primary
    }

    pub fn branch_label(&self) -> &str {
        self.branch.as_deref().unwrap_or("detached")
    }

    pub fn matches_path(&self, path: &Path) -> bool {
        if self.path == path {
            return true;
        }
        // git reports real paths; compare canonical forms when they exist
        match std::fs::canonicalize(&self.path) {
            Ok(canonical) => canonical == path,
            Err(_) => false,
        }
    }
}
