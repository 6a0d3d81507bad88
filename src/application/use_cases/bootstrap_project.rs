use std::path::{Path, PathBuf};

use super::Collaborators;
use crate::application::services::{
    ConfigMutator, EnvironmentSetup, IntoStepFailure, SetupRequest, StepFailure, StepOutcome,
    CLEANUP_HEADER,
};
use crate::common::error::WspaceError;
use crate::common::result::{ResultExt, WspaceResult};
use crate::domain::entities::project::GITDIR_MARKER;
use crate::domain::entities::{CleanupState, ProjectLayout, ToolConfig};
use crate::domain::value_objects::remote_url::validate_project_name;
use crate::domain::value_objects::{RemoteUrl, StepLog};
use crate::infrastructure::git::git_interface::{MIRROR_FETCH_REFSPEC, ORIGIN_NAMESPACE};
use crate::infrastructure::git::WorktreeSpec;

/// Remote default-branch pointer set by the clone
const REMOTE_HEAD: &str = "refs/remotes/origin/HEAD";

/// プロジェクト初期化の設定
#[derive(Debug, Clone, Default)]
pub struct BootstrapProjectConfig {
    /// クローン元のURL
    pub url: String,

    /// プロジェクトディレクトリ名（省略時はURLから導出）
    pub name: Option<String>,
}

/// プロジェクト初期化の結果
#[derive(Debug, Clone)]
pub struct BootstrapProjectResult {
    pub project_dir: PathBuf,
    pub default_branch: String,
    pub steps: StepLog,
}

/// プロジェクト初期化のユースケース
///
/// bareクローン、`.git`ファイル、fetch設定、最初のワークスペースまでを
/// 一括で作成する。途中で失敗した場合はプロジェクトディレクトリごと削除する。
pub struct BootstrapProjectUseCase<'a> {
    tools: Collaborators<'a>,
    config: BootstrapProjectConfig,
    tool_config: ToolConfig,
}

impl<'a> BootstrapProjectUseCase<'a> {
    pub fn new(tools: Collaborators<'a>, config: BootstrapProjectConfig) -> Self {
        Self {
            tools,
            config,
            tool_config: ToolConfig::default(),
        }
    }

    /// プロジェクト初期化を実行
    pub async fn execute(&self, cwd: &Path) -> WspaceResult<BootstrapProjectResult> {
        // 1. プロジェクト名の決定
        let url = RemoteUrl::new(&self.config.url)?;
        let project_name = match &self.config.name {
            Some(name) => validate_project_name(name)?.to_string(),
            None => url.project_name()?,
        };

        // 2. 既存ディレクトリは上書きしない
        let project_dir = cwd.join(&project_name);
        if project_dir.exists() {
            return Err(WspaceError::precondition_error(format!(
                "directory already exists: {}",
                project_dir.display()
            )));
        }

        std::fs::create_dir_all(&project_dir).with_filesystem_error(
            "could not create project directory",
            Some(project_dir.clone()),
        )?;

        // 3. 以降の失敗はディレクトリごと破棄
        let layout = ProjectLayout::new(&project_dir, &self.tool_config);
        match self.populate(&url, &layout, cwd).await {
            Ok((default_branch, steps)) => {
                tracing::info!(
                    project = %project_dir.display(),
                    branch = %default_branch,
                    "project initialized"
                );
                Ok(BootstrapProjectResult {
                    project_dir,
                    default_branch,
                    steps,
                })
            }
            Err(failure) => Err(self.discard(&project_dir, failure).await),
        }
    }

    async fn populate(
        &self,
        url: &RemoteUrl,
        layout: &ProjectLayout,
        cwd: &Path,
    ) -> StepOutcome<(String, StepLog)> {
        let project_dir = layout.root();
        let nothing_applied = CleanupState::new(project_dir, project_dir);

        let (default_branch, steps) = self
            .prepare_repository(url, layout, cwd)
            .await
            .or_rollback(&nothing_applied)?;

        // 最初のワークスペース（デフォルトブランチ）
        self.tools.console.section("Creating worktree");
        let spec = WorktreeSpec::existing(
            layout.workspace_relative(&default_branch),
            default_branch.as_str(),
        );
        self.tools
            .git
            .add_worktree(project_dir, &spec)
            .await
            .or_rollback(&nothing_applied)?;
        let workspace = layout.workspace_path(&default_branch);
        let state = CleanupState::new(&workspace, project_dir).with_worktree_created();
        let steps = steps.with("Created worktree", workspace.display().to_string());

        // 環境宣言がこのワークスペースにある場合のみ環境を起動
        let mutator = ConfigMutator::new(&self.tool_config.environment);
        if !mutator.has_declaration(&workspace) {
            let skipped = format!(
                "Skipped (no {} found)",
                self.tool_config.environment.declaration
            );
            return Ok((default_branch, steps.with("DDEV", skipped)));
        }

        let request = SetupRequest {
            workspace: workspace.clone(),
            environment_name: mutator.read_environment_name(&workspace).ok(),
            prefix: None,
            snapshot: layout.snapshot_file(),
            cwd: cwd.to_path_buf(),
        };
        let (_, steps) = EnvironmentSetup::new(self.tools.environment, self.tools.console, &mutator)
            .run(&request, state, steps)
            .await?;
        Ok((default_branch, steps))
    }

    /// クローン、`.git`ファイル、fetch設定、デフォルトブランチ検出、ディレクトリ作成
    async fn prepare_repository(
        &self,
        url: &RemoteUrl,
        layout: &ProjectLayout,
        cwd: &Path,
    ) -> WspaceResult<(String, StepLog)> {
        let project_dir = layout.root();
        let git = self.tools.git;

        self.tools.console.section("Cloning repository (bare)");
        let bare_dir = layout.bare_dir();
        // 相対パスのURLは呼び出し元のディレクトリ基準
        git.clone_bare(cwd, url.as_str(), &bare_dir).await?;
        let steps = StepLog::new().with("Cloned repository (bare)", bare_dir.display().to_string());

        let marker = layout.marker_file();
        std::fs::write(&marker, GITDIR_MARKER)
            .with_filesystem_error("could not write .git file", Some(marker.clone()))?;
        let steps = steps.with("Created .git file", marker.display().to_string());

        git.set_config(project_dir, "remote.origin.fetch", MIRROR_FETCH_REFSPEC)
            .await?;
        self.tools.console.section("Fetching branches");
        git.fetch(project_dir, "origin").await?;
        let steps = steps.with("Configured fetch refspec", "Fetched all branches");

        let default_branch = self.detect_default_branch(project_dir).await?;
        let steps = steps.with("Default branch", default_branch.as_str());

        for dir in [layout.spaces_dir(), layout.snapshot_dir()] {
            std::fs::create_dir_all(&dir)
                .with_filesystem_error("could not create directory", Some(dir.clone()))?;
        }
        Ok((default_branch, steps))
    }

    /// リモートのHEADを優先し、なければ既定のブランチ名を順に確認する
    async fn detect_default_branch(&self, project_dir: &Path) -> WspaceResult<String> {
        let git = self.tools.git;
        if let Some(target) = git.symbolic_ref(project_dir, REMOTE_HEAD).await? {
            if let Some(branch) = target.strip_prefix(ORIGIN_NAMESPACE) {
                if !branch.is_empty() {
                    return Ok(branch.to_string());
                }
            }
        }

        for branch in &self.tool_config.default_branches {
            let remote_ref = format!("{}{}", ORIGIN_NAMESPACE, branch);
            if git.ref_exists(project_dir, &remote_ref).await? {
                return Ok(branch.clone());
            }
        }

        Err(WspaceError::not_found_error(
            "could not detect default branch",
            Some(project_dir.to_path_buf()),
        ))
    }

    /// 起動済みの環境を削除してからプロジェクトディレクトリを消す
    async fn discard(&self, project_dir: &Path, failure: StepFailure) -> WspaceError {
        let console = self.tools.console;
        console.notice(CLEANUP_HEADER);

        let applied = &failure.applied;
        if applied.environment_started() {
            console.notice("Deleting DDEV project...");
            if let Err(e) = self.tools.environment.delete(applied.worktree_path()).await {
                tracing::debug!(error = ?e, "bootstrap cleanup: environment delete failed");
                console.warn(&format!("failed to delete DDEV project: {}", e));
            }
        }

        console.notice(&format!("Removing project directory {}...", project_dir.display()));
        if let Err(e) = std::fs::remove_dir_all(project_dir) {
            tracing::debug!(error = ?e, "bootstrap cleanup: directory removal failed");
            console.warn(&format!("failed to remove project directory: {}", e));
        }
        console.notice("Cleanup complete.");
        failure.error
    }
}
