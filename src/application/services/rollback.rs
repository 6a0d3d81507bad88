use crate::common::error::WspaceError;
use crate::domain::entities::CleanupState;
use crate::infrastructure::environment::EnvironmentManager;
use crate::infrastructure::git::GitOperations;
use crate::infrastructure::terminal::Console;

/// Header of the cleanup notices written to stderr
pub const CLEANUP_HEADER: &str = "\n--- Cleaning up ---";

/// A failed workflow step together with the side effects applied before it
#[derive(Debug)]
pub struct StepFailure {
    pub error: WspaceError,
    pub applied: CleanupState,
}

impl StepFailure {
    pub fn new(error: WspaceError, applied: CleanupState) -> Self {
        Self { error, applied }
    }
}

/// Result of a step that may need compensation
pub type StepOutcome<T> = Result<T, StepFailure>;

/// Attach the applied state to a plain error
pub trait IntoStepFailure<T> {
    fn or_rollback(self, applied: &CleanupState) -> StepOutcome<T>;
}

impl<T> IntoStepFailure<T> for Result<T, WspaceError> {
    fn or_rollback(self, applied: &CleanupState) -> StepOutcome<T> {
        self.map_err(|error| StepFailure::new(error, applied.clone()))
    }
}

/// Undo the side effects recorded in a [`CleanupState`].
///
/// Best-effort: failures are reported as warnings and never replace the
/// error that triggered the rollback.
pub struct Rollback<'a> {
    git: &'a dyn GitOperations,
    environment: &'a dyn EnvironmentManager,
    console: &'a dyn Console,
}

impl<'a> Rollback<'a> {
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

    /// Run the compensation and hand back the original error
    pub async fn recover(&self, failure: StepFailure) -> WspaceError {
        self.undo(&failure.applied).await;
        failure.error
    }

    /// Returns how many compensations failed.
    pub async fn undo(&self, state: &CleanupState) -> usize {
        if state.is_clean() {
            return 0;
        }
        self.console.notice(CLEANUP_HEADER);
        let mut failures = 0;

        if state.environment_started() {
            self.console.notice("Deleting DDEV project...");
            if let Err(e) = self.environment.delete(state.worktree_path()).await {
                tracing::debug!(error = ?e, "rollback: environment delete failed");
                self.console
                    .warn(&format!("failed to delete DDEV project: {}", e));
                failures += 1;
            }
        }

        if state.worktree_created() {
            self.console.notice("Removing git worktree...");
            if let Err(e) = self
                .git
                .remove_worktree(state.project_root(), state.worktree_path())
                .await
            {
                tracing::debug!(error = ?e, "rollback: worktree removal failed");
                self.console.warn(&format!("failed to remove worktree: {}", e));
                failures += 1;
            }
        }

        self.console.notice("Cleanup complete.");
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::environment::MockEnvironmentManager;
    use crate::infrastructure::git::MockGitOperations;
    use crate::infrastructure::terminal::ScriptedConsole;
    use std::path::Path;

    fn applied() -> CleanupState {
        CleanupState::new("/p/spaces/x", "/p")
    }

    #[tokio::test]
    async fn test_clean_state_touches_nothing() {
        let git = MockGitOperations::new();
        let environment = MockEnvironmentManager::new();
        let console = ScriptedConsole::new();

        let failures = Rollback::new(&git, &environment, &console)
            .undo(&applied())
            .await;
        assert_eq!(failures, 0);
        assert!(console.output().is_empty());
        assert!(console.notices().is_empty());
    }

    #[tokio::test]
    async fn test_undoes_environment_then_worktree() {
        let mut seq = mockall::Sequence::new();
        let mut environment = MockEnvironmentManager::new();
        let mut git = MockGitOperations::new();
        environment
            .expect_delete()
            .withf(|path| path == Path::new("/p/spaces/x"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        git.expect_remove_worktree()
            .withf(|root, path| root == Path::new("/p") && path == Path::new("/p/spaces/x"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        let console = ScriptedConsole::new();

        let state = applied().with_worktree_created().with_environment_started();
        let failures = Rollback::new(&git, &environment, &console).undo(&state).await;
        assert_eq!(failures, 0);
        assert!(console.warnings().is_empty());
        assert!(console.output().is_empty());
        assert_eq!(
            console.notices(),
            vec![
                CLEANUP_HEADER,
                "Deleting DDEV project...",
                "Removing git worktree...",
                "Cleanup complete.",
            ]
        );
    }

    #[tokio::test]
    async fn test_failures_are_warnings_and_original_error_is_kept() {
        let mut environment = MockEnvironmentManager::new();
        let mut git = MockGitOperations::new();
        environment.expect_delete().returning(|_| {
            Err(WspaceError::external_tool_error("exit code 1", "ddev delete", Some(1)))
        });
        git.expect_remove_worktree().returning(|_, _| {
            Err(WspaceError::external_tool_error("exit code 128", "git worktree remove", Some(128)))
        });
        let console = ScriptedConsole::new();

        let state = applied().with_worktree_created().with_environment_started();
        let failure = StepFailure::new(
            WspaceError::precondition_error("import failed"),
            state,
        );
        let error = Rollback::new(&git, &environment, &console)
            .recover(failure)
            .await;

        assert_eq!(error.to_string(), "import failed");
        assert_eq!(console.warnings().len(), 2);
    }
}
