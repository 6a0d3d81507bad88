use std::path::{Path, PathBuf};

/// Side effects a creation run has durably applied so far.
///
/// Flags only ever move from `false` to `true`, and only after the
/// corresponding step returned success. Transitions consume the state and
/// return the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupState {
    worktree_path: PathBuf,
    project_root: PathBuf,
    worktree_created: bool,
    environment_started: bool,
}

impl CleanupState {
    pub fn new(worktree_path: impl Into<PathBuf>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            worktree_path: worktree_path.into(),
            project_root: project_root.into(),
            worktree_created: false,
            environment_started: false,
        }
    }

    #[must_use]
    pub fn with_worktree_created(self) -> Self {
        Self {
            worktree_created: true,
            ..self
        }
    }

    #[must_use]
    pub fn with_environment_started(self) -> Self {
        Self {
            environment_started: true,
            ..self
        }
    }

    pub fn worktree_path(&self) -> &Path {
        &self.worktree_path
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn worktree_created(&self) -> bool {
        self.worktree_created
    }

    pub fn environment_started(&self) -> bool {
        self.environment_started
    }

    /// Nothing to undo.
    pub fn is_clean(&self) -> bool {
        !self.worktree_created && !self.environment_started
    }
}
