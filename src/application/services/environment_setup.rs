use std::path::{Path, PathBuf};

use super::config_mutator::{database_host, ConfigMutator};
use super::rollback::{IntoStepFailure, StepOutcome};
use crate::common::error::WspaceError;
use crate::common::result::WspaceResult;
use crate::domain::entities::CleanupState;
use crate::domain::value_objects::{Identifier, StepLog};
use crate::infrastructure::environment::EnvironmentManager;
use crate::infrastructure::terminal::Console;

/// Prompt shown when no snapshot exists at the default location
pub const SNAPSHOT_PROMPT: &str = "Enter path to database dump (or press Enter to skip): ";

/// Inputs of the environment sub-sequence of creation and bootstrap
#[derive(Debug, Clone)]
pub struct SetupRequest {
    pub workspace: PathBuf,

    /// Name found in the environment declaration, when readable
    pub environment_name: Option<String>,

    /// Prefix the environment name with this identifier; `None` keeps it
    pub prefix: Option<Identifier>,

    /// Default snapshot location
    pub snapshot: PathBuf,

    /// Base for relative paths typed at the snapshot prompt
    pub cwd: PathBuf,
}

/// Rename, start and import: the environment steps shared by `new` and
/// `init`.
pub struct EnvironmentSetup<'a> {
    environment: &'a dyn EnvironmentManager,
    console: &'a dyn Console,
    mutator: &'a ConfigMutator,
}

impl<'a> EnvironmentSetup<'a> {
    pub fn new(
        environment: &'a dyn EnvironmentManager,
        console: &'a dyn Console,
        mutator: &'a ConfigMutator,
    ) -> Self {
        Self {
            environment,
            console,
            mutator,
        }
    }

    /// Run the sequence. `state` must already record the created worktree;
    /// the returned state additionally records a started environment.
    pub async fn run(
        &self,
        request: &SetupRequest,
        state: CleanupState,
        steps: StepLog,
    ) -> StepOutcome<(CleanupState, StepLog)> {
        // 1. 環境名の変更と依存設定の書き換え
        let (active_name, steps) = self.apply_naming(request, steps).or_rollback(&state)?;

        // 2. 環境の起動（成功後にのみ状態を記録）
        self.console.section("Starting DDEV");
        self.environment
            .start(&request.workspace)
            .await
            .or_rollback(&state)?;
        let state = state.with_environment_started();
        tracing::info!(workspace = %request.workspace.display(), "environment started");
        let steps = steps.with(
            "Started DDEV",
            active_name.unwrap_or_else(|| "Started".to_string()),
        );

        // 3. データのインポート
        let detail = self.import_data(request).await.or_rollback(&state)?;
        let steps = steps.with("Database", detail);

        Ok((state, steps))
    }

    fn apply_naming(
        &self,
        request: &SetupRequest,
        steps: StepLog,
    ) -> WspaceResult<(Option<String>, StepLog)> {
        let original = match &request.environment_name {
            Some(name) => name,
            None => return Ok((None, steps)),
        };

        let identifier = match &request.prefix {
            Some(identifier) => identifier,
            None => {
                let steps = steps.with("DDEV project name", format!("{} (kept default)", original));
                return Ok((Some(original.clone()), steps));
            }
        };

        let renamed = self.mutator.rename(&request.workspace, identifier, original)?;
        let steps = steps.with("Renamed DDEV project", renamed.as_str());

        let steps = if self
            .mutator
            .rewrite_dependent_settings(&request.workspace, &renamed)?
        {
            steps.with(
                format!("Updated {}", self.mutator.settings_file_name()),
                format!("DB host set to {}", database_host(&renamed)),
            )
        } else {
            steps
        };
        Ok((Some(renamed), steps))
    }

    /// Import the default snapshot, or ask for one. Returns the summary
    /// detail.
    pub async fn import_data(&self, request: &SetupRequest) -> WspaceResult<String> {
        let snapshot = if request.snapshot.is_file() {
            self.console
                .info(&format!("Found database dump at {}", request.snapshot.display()));
            request.snapshot.clone()
        } else {
            self.console
                .info(&format!("No database dump found at {}", request.snapshot.display()));
            let input = self.console.read_line(SNAPSHOT_PROMPT)?;
            if input.is_empty() {
                return Ok("Skipped (no import)".to_string());
            }
            let path = resolve_input_path(&request.cwd, &input);
            if !path.is_file() {
                return Err(WspaceError::not_found_error(
                    format!("file not found: {}", path.display()),
                    Some(path),
                ));
            }
            path
        };

        self.console.section("Importing database");
        self.environment
            .import_snapshot(&request.workspace, &snapshot)
            .await?;
        Ok(format!("Imported from {}", snapshot.display()))
    }
}

fn resolve_input_path(cwd: &Path, input: &str) -> PathBuf {
    let path = Path::new(input);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EnvironmentConfig;
    use crate::infrastructure::environment::MockEnvironmentManager;
    use crate::infrastructure::terminal::ScriptedConsole;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        request: SetupRequest,
        mutator: ConfigMutator,
    }

    fn fixture(prefix: Option<&str>) -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let workspace = temp_dir.path().join("spaces/0001-new-task");
        let mutator = ConfigMutator::new(&EnvironmentConfig::default());
        let declaration = mutator.declaration_path(&workspace);
        std::fs::create_dir_all(declaration.parent().unwrap()).unwrap();
        std::fs::write(&declaration, "name: project\ntype: drupal10\n").unwrap();

        let request = SetupRequest {
            workspace,
            environment_name: Some("project".to_string()),
            prefix: prefix.map(|p| Identifier::new(p).unwrap()),
            snapshot: temp_dir.path().join("db/db.sql.gz"),
            cwd: temp_dir.path().to_path_buf(),
        };
        Fixture {
            _temp_dir: temp_dir,
            request,
            mutator,
        }
    }

    fn created(request: &SetupRequest) -> CleanupState {
        CleanupState::new(&request.workspace, request.workspace.join("../.."))
            .with_worktree_created()
    }

    #[tokio::test]
    async fn test_prefixed_environment_with_skipped_import() {
        let fx = fixture(Some("0001"));
        let mut environment = MockEnvironmentManager::new();
        environment.expect_start().times(1).returning(|_| Ok(()));
        environment.expect_import_snapshot().never();
        let console = ScriptedConsole::with_answers([""]);

        let setup = EnvironmentSetup::new(&environment, &console, &fx.mutator);
        let (state, steps) = setup
            .run(&fx.request, created(&fx.request), StepLog::new())
            .await
            .unwrap();

        assert!(state.environment_started());
        assert_eq!(
            steps.find("Renamed DDEV project").unwrap().detail,
            "0001-project"
        );
        assert_eq!(steps.find("Started DDEV").unwrap().detail, "0001-project");
        assert_eq!(steps.find("Database").unwrap().detail, "Skipped (no import)");
        assert_eq!(console.prompts(), vec![SNAPSHOT_PROMPT.to_string()]);

        let declaration =
            std::fs::read_to_string(fx.mutator.declaration_path(&fx.request.workspace)).unwrap();
        assert!(declaration.contains("name: 0001-project\n"));
    }

    #[tokio::test]
    async fn test_default_snapshot_is_imported_without_prompt() {
        let fx = fixture(None);
        std::fs::create_dir_all(fx.request.snapshot.parent().unwrap()).unwrap();
        std::fs::write(&fx.request.snapshot, b"dump").unwrap();

        let mut environment = MockEnvironmentManager::new();
        environment.expect_start().returning(|_| Ok(()));
        let snapshot = fx.request.snapshot.clone();
        environment
            .expect_import_snapshot()
            .withf(move |_, file| file == snapshot.as_path())
            .times(1)
            .returning(|_, _| Ok(()));
        let console = ScriptedConsole::new();

        let setup = EnvironmentSetup::new(&environment, &console, &fx.mutator);
        let (_, steps) = setup
            .run(&fx.request, created(&fx.request), StepLog::new())
            .await
            .unwrap();

        assert_eq!(
            steps.find("DDEV project name").unwrap().detail,
            "project (kept default)"
        );
        assert!(steps
            .find("Database")
            .unwrap()
            .detail
            .starts_with("Imported from "));
        assert!(console.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_relative_prompt_path_resolves_against_cwd() {
        let fx = fixture(None);
        std::fs::write(fx.request.cwd.join("dump.sql"), b"dump").unwrap();

        let mut environment = MockEnvironmentManager::new();
        let expected = fx.request.cwd.join("dump.sql");
        environment
            .expect_import_snapshot()
            .withf(move |_, file| file == expected.as_path())
            .times(1)
            .returning(|_, _| Ok(()));
        let console = ScriptedConsole::with_answers(["  dump.sql  "]);

        let setup = EnvironmentSetup::new(&environment, &console, &fx.mutator);
        let detail = setup.import_data(&fx.request).await.unwrap();
        assert_eq!(
            detail,
            format!("Imported from {}", fx.request.cwd.join("dump.sql").display())
        );
    }

    #[tokio::test]
    async fn test_missing_prompt_path_fails_after_start() {
        let fx = fixture(Some("0001"));
        let mut environment = MockEnvironmentManager::new();
        environment.expect_start().returning(|_| Ok(()));
        environment.expect_import_snapshot().never();
        let console = ScriptedConsole::with_answers(["missing.sql.gz"]);

        let setup = EnvironmentSetup::new(&environment, &console, &fx.mutator);
        let failure = setup
            .run(&fx.request, created(&fx.request), StepLog::new())
            .await
            .unwrap_err();

        assert!(failure.error.is_not_found());
        assert!(failure.applied.worktree_created());
        assert!(failure.applied.environment_started());
    }

    #[tokio::test]
    async fn test_start_failure_is_not_recorded_as_started() {
        let fx = fixture(Some("0001"));
        let mut environment = MockEnvironmentManager::new();
        environment.expect_start().returning(|_| {
            Err(WspaceError::external_tool_error("exit code 1", "ddev start", Some(1)))
        });
        let console = ScriptedConsole::new();

        let setup = EnvironmentSetup::new(&environment, &console, &fx.mutator);
        let failure = setup
            .run(&fx.request, created(&fx.request), StepLog::new())
            .await
            .unwrap_err();

        assert!(failure.error.is_external());
        assert!(failure.applied.worktree_created());
        assert!(!failure.applied.environment_started());
    }
}
