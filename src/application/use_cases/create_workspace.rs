use std::path::{Path, PathBuf};

use super::Collaborators;
use crate::application::services::{
    ConfigMutator, EnvironmentSetup, IntoStepFailure, ProjectContext, ProjectLocator, Rollback,
    SetupRequest, StepOutcome,
};
use crate::common::error::WspaceError;
use crate::common::result::{ResultExt, WspaceResult};
use crate::domain::entities::CleanupState;
use crate::domain::value_objects::{Identifier, StepLog, WorkspaceName};
use crate::infrastructure::filesystem::ProjectLock;
use crate::infrastructure::git::git_interface::{HEADS_NAMESPACE, ORIGIN_NAMESPACE};
use crate::infrastructure::git::WorktreeSpec;

/// ワークスペース作成の設定
#[derive(Debug, Clone, Default)]
pub struct CreateWorkspaceConfig {
    /// ワークスペース名（`spaces/`からの相対パス、ブランチ名にもなる）
    pub name: String,

    /// 環境名のプレフィックス（省略時は名前の先頭4文字）
    pub identifier: Option<String>,

    /// 新しいブランチの起点
    pub base: Option<String>,
}

/// ワークスペース作成の結果
#[derive(Debug, Clone)]
pub struct CreateWorkspaceResult {
    pub workspace_path: PathBuf,
    pub steps: StepLog,
}

/// ワークスペース作成のユースケース
///
/// 途中のステップが失敗した場合は、それまでに適用した副作用
/// （環境の起動、worktreeの作成）を取り消してから元のエラーを返す。
pub struct CreateWorkspaceUseCase<'a> {
    tools: Collaborators<'a>,
    config: CreateWorkspaceConfig,
}

impl<'a> CreateWorkspaceUseCase<'a> {
    pub fn new(tools: Collaborators<'a>, config: CreateWorkspaceConfig) -> Self {
        Self { tools, config }
    }

    /// ワークスペース作成を実行
    pub async fn execute(&self, cwd: &Path) -> WspaceResult<CreateWorkspaceResult> {
        // 1. 引数の検証（副作用の前に失敗させる）
        let name = WorkspaceName::new(&self.config.name)?;
        let identifier = Identifier::resolve(&name, self.config.identifier.as_deref())?;

        // 2. プロジェクトルートの解決とロック
        let project = ProjectLocator::new(self.tools.git).open(cwd).await?;
        let _lock = ProjectLock::acquire(&project.root.lock_path())?;

        let workspace_path = project.layout.workspace_path(name.as_str());
        if workspace_path.exists() {
            return Err(WspaceError::precondition_error(format!(
                "workspace already exists: {}",
                workspace_path.display()
            )));
        }

        // 3. 既存の環境名を探す（見つからなければ環境関連ステップはスキップ）
        let mutator = ConfigMutator::new(&project.config.environment);
        let environment_name = self.find_environment_name(&project, &mutator);

        // 4. 起点ブランチの解決
        let base = self.resolve_base(&project).await?;

        std::fs::create_dir_all(project.layout.spaces_dir()).with_filesystem_error(
            "could not create workspaces directory",
            Some(project.layout.spaces_dir()),
        )?;

        // 5. 以降のステップは失敗時にロールバック
        let state = CleanupState::new(&workspace_path, project.root.path());
        let request = CreationRequest {
            project: &project,
            mutator: &mutator,
            name: &name,
            identifier,
            environment_name,
            base,
            cwd,
        };
        match self.create(&request, state).await {
            Ok(steps) => {
                tracing::info!(workspace = %workspace_path.display(), "workspace created");
                Ok(CreateWorkspaceResult {
                    workspace_path,
                    steps,
                })
            }
            Err(failure) => {
                let tools = self.tools;
                Err(Rollback::new(tools.git, tools.environment, tools.console)
                    .recover(failure)
                    .await)
            }
        }
    }

    /// デフォルトブランチのワークスペースから元の環境名を読む
    fn find_environment_name(
        &self,
        project: &ProjectContext,
        mutator: &ConfigMutator,
    ) -> Option<String> {
        project.config.default_branches.iter().find_map(|branch| {
            let workspace = project.layout.workspace_path(branch);
            match mutator.read_environment_name(&workspace) {
                Ok(name) => Some(name),
                Err(e) => {
                    tracing::debug!(workspace = %workspace.display(), error = %e, "no environment name");
                    None
                }
            }
        })
    }

    /// 明示された起点は存在を確認し、未指定なら統合ブランチを使う
    async fn resolve_base(&self, project: &ProjectContext) -> WspaceResult<Option<String>> {
        let root = project.root.path();
        if let Some(base) = &self.config.base {
            if !self.tools.git.ref_exists(root, base).await? {
                return Err(WspaceError::precondition_error(format!(
                    "branch \"{}\" does not exist",
                    base
                )));
            }
            return Ok(Some(base.clone()));
        }

        if let Some(integration) = &project.config.integration_branch {
            let remote_ref = format!("{}{}", ORIGIN_NAMESPACE, integration);
            if self.tools.git.ref_exists(root, &remote_ref).await? {
                tracing::debug!(base = %integration, "using integration branch as base");
                return Ok(Some(format!("origin/{}", integration)));
            }
        }
        Ok(None)
    }

    async fn create(&self, request: &CreationRequest<'_>, state: CleanupState) -> StepOutcome<StepLog> {
        let project = request.project;
        let root = project.root.path();
        let name = request.name.as_str();

        let mut steps = StepLog::new();
        if let Some(original) = &request.environment_name {
            steps = steps.with("Read DDEV project name", original.as_str());
        }

        // worktreeの作成（既存ブランチならそのままチェックアウト）
        self.tools.console.section("Creating worktree");
        let local_ref = format!("{}{}", HEADS_NAMESPACE, name);
        let branch_exists = self
            .tools
            .git
            .ref_exists(root, &local_ref)
            .await
            .or_rollback(&state)?;
        let relative = project.layout.workspace_relative(name);
        let spec = if branch_exists {
            WorktreeSpec::existing(relative, name)
        } else {
            WorktreeSpec::new_branch(relative, name, request.base.clone())
        };
        self.tools
            .git
            .add_worktree(root, &spec)
            .await
            .or_rollback(&state)?;
        let state = state.with_worktree_created();
        let steps = steps.with("Created git worktree", name);

        if request.environment_name.is_none() {
            let skipped = format!(
                "Skipped (no {} found in {})",
                project.config.environment.declaration,
                project.config.default_branches.join(" or ")
            );
            return Ok(steps.with("DDEV", skipped));
        }

        // 環境名の変更・起動・データ投入
        let prefix = (!project.config.is_default_branch(name)).then(|| request.identifier.clone());
        let setup_request = SetupRequest {
            workspace: state.worktree_path().to_path_buf(),
            environment_name: request.environment_name.clone(),
            prefix,
            snapshot: project.layout.snapshot_file(),
            cwd: request.cwd.to_path_buf(),
        };
        let (_, steps) = EnvironmentSetup::new(self.tools.environment, self.tools.console, request.mutator)
            .run(&setup_request, state, steps)
            .await?;
        Ok(steps)
    }
}

struct CreationRequest<'r> {
    project: &'r ProjectContext,
    mutator: &'r ConfigMutator,
    name: &'r WorkspaceName,
    identifier: Identifier,
    environment_name: Option<String>,
    base: Option<String>,
    cwd: &'r Path,
}
