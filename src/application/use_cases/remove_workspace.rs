use std::path::{Path, PathBuf};

use super::Collaborators;
use crate::application::services::{ConfigMutator, ProjectLocator, WorktreeRegistry};
use crate::common::error::WspaceError;
use crate::common::result::{OptionExt, WspaceResult};
use crate::domain::value_objects::{StepLog, WorkspaceName};
use crate::infrastructure::filesystem::ProjectLock;

/// Confirmation question; only `y`/`Y` proceeds
pub const CONFIRM_PROMPT: &str = "\nAre you sure? (y/N) ";

/// ワークスペース削除の設定
#[derive(Debug, Clone, Default)]
pub struct RemoveWorkspaceConfig {
    /// 削除するワークスペース名（省略時はカレントディレクトリ）
    pub name: Option<String>,
}

/// ワークスペース削除の結果
#[derive(Debug, Clone)]
pub struct RemoveWorkspaceResult {
    pub workspace_path: PathBuf,
    pub branch: Option<String>,
    pub steps: StepLog,
}

#[derive(Debug, Clone)]
pub enum RemoveWorkspaceOutcome {
    Removed(RemoveWorkspaceResult),
    /// 確認で中止された（副作用なし）
    Aborted,
}

/// ワークスペース削除のユースケース
///
/// worktreeの削除以外のステップ（環境の削除、ブランチ削除、ビルドキャッシュの
/// 解放）は失敗しても警告にとどめ、処理を続行する。
pub struct RemoveWorkspaceUseCase<'a> {
    tools: Collaborators<'a>,
    config: RemoveWorkspaceConfig,
}

impl<'a> RemoveWorkspaceUseCase<'a> {
    pub fn new(tools: Collaborators<'a>, config: RemoveWorkspaceConfig) -> Self {
        Self { tools, config }
    }

    /// ワークスペース削除を実行
    pub async fn execute(&self, cwd: &Path) -> WspaceResult<RemoveWorkspaceOutcome> {
        let name = self
            .config
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(WorkspaceName::new)
            .transpose()?;

        // 1. ルートと対象パスの解決
        let project = ProjectLocator::new(self.tools.git).open(cwd).await?;
        let _lock = ProjectLock::acquire(&project.root.lock_path())?;
        let root = project.root.path();

        let requested = match &name {
            Some(name) => project.layout.workspace_path(name.as_str()),
            None => cwd.to_path_buf(),
        };
        let target = std::fs::canonicalize(&requested).map_err(|_| {
            WspaceError::not_found_error(
                format!("workspace not found: {}", requested.display()),
                Some(requested.clone()),
            )
        })?;

        // 2. レジストリで既知のワークスペースか確認
        let entry = WorktreeRegistry::new(self.tools.git)
            .find_by_path(&project.layout, &target)
            .await?
            .ok_or_not_found(
                format!("{} is not a git worktree", target.display()),
                Some(target.clone()),
            )?;

        // 3. 削除内容を表示して確認
        let console = self.tools.console;
        let mutator = ConfigMutator::new(&project.config.environment);
        console.info("The following will be destroyed:");
        console.info(&format!("  Worktree:  {}", target.display()));
        console.info(&format!("  Branch:    {}", entry.branch_label()));
        match mutator.read_environment_name(&target) {
            Ok(environment_name) => console.info(&format!("  DDEV:      {}", environment_name)),
            Err(_) => console.info("  DDEV project in that worktree (if any)"),
        }
        if !console.confirm(CONFIRM_PROMPT)? {
            console.info("Aborted.");
            return Ok(RemoveWorkspaceOutcome::Aborted);
        }

        // 4. 環境の削除（失敗しても続行）
        let steps = if mutator.has_declaration(&target) {
            console.section("Deleting DDEV project");
            match self.tools.environment.delete(&target).await {
                Ok(()) => StepLog::new().with("DDEV project", "Deleted"),
                Err(e) => {
                    console.warn(&format!("failed to delete DDEV project: {}", e));
                    StepLog::new().with("DDEV project", format!("Failed to delete: {}", e))
                }
            }
        } else {
            StepLog::new().with(
                "DDEV project",
                format!("Skipped (no {})", project.config.environment.declaration),
            )
        };

        // 5. worktreeの削除（ルートから実行、失敗は致命的）
        console.section("Removing git worktree");
        self.tools.git.remove_worktree(root, &target).await?;
        tracing::info!(workspace = %target.display(), "worktree removed");
        let steps = steps.with("Git worktree", format!("Removed {}", target.display()));

        // 6. ブランチの削除（失敗しても続行）
        let steps = match &entry.branch {
            Some(branch) => {
                console.section("Deleting branch");
                match self.tools.git.delete_branch(root, branch).await {
                    Ok(()) => steps.with("Branch", format!("Deleted {}", branch)),
                    Err(e) => {
                        console.warn(&format!("failed to delete branch {}: {}", branch, e));
                        steps.with("Branch", format!("Failed to delete {}: {}", branch, e))
                    }
                }
            }
            None => steps.with("Branch", "Skipped (detached HEAD)"),
        };

        // 7. コンテナのビルドキャッシュ解放（失敗しても続行）
        console.section("Pruning Docker build cache");
        let steps = match self.tools.environment.reclaim_build_cache(root).await {
            Ok(()) => steps.with("Docker build cache", "Pruned"),
            Err(e) => {
                console.warn(&format!("failed to prune Docker build cache: {}", e));
                steps.with("Docker build cache", format!("Failed to prune: {}", e))
            }
        };

        Ok(RemoveWorkspaceOutcome::Removed(RemoveWorkspaceResult {
            workspace_path: target,
            branch: entry.branch,
            steps,
        }))
    }
}
