use std::path::Path;

use crate::common::error::WspaceError;
use crate::common::result::{OptionExt, WspaceResult};
use crate::domain::entities::{ProjectLayout, ProjectRoot, ToolConfig};
use crate::infrastructure::filesystem::ConfigStore;
use crate::infrastructure::git::GitOperations;

/// 解決済みのプロジェクト（ルート、設定、派生パス）
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub root: ProjectRoot,
    pub config: ToolConfig,
    pub layout: ProjectLayout,
}

/// プロジェクトルートの探索
///
/// gitの共有メタデータディレクトリの親をルートとするため、ルート直下、
/// 任意のワークスペース内、さらにその下のサブディレクトリのどこからでも
/// 同じルートが得られる。
pub struct ProjectLocator<'a> {
    git: &'a dyn GitOperations,
}

impl<'a> ProjectLocator<'a> {
    pub fn new(git: &'a dyn GitOperations) -> Self {
        Self { git }
    }

    /// `cwd`を起点にプロジェクトルートを解決する
    pub async fn locate(&self, cwd: &Path) -> WspaceResult<ProjectRoot> {
        // 1. 共有メタデータディレクトリを取得（gitの外ならNotFound）
        let reported = self.git.common_dir(cwd).await.map_err(|e| {
            tracing::debug!(cwd = %cwd.display(), error = %e, "git common dir lookup failed");
            if e.is_external() {
                WspaceError::not_found_error(
                    "not inside a git repository",
                    Some(cwd.to_path_buf()),
                )
            } else {
                e
            }
        })?;

        // 2. 相対パスなら作業ディレクトリ基準で絶対パス化
        let common_dir = if reported.is_absolute() {
            reported
        } else {
            cwd.join(reported)
        };
        let common_dir = std::fs::canonicalize(&common_dir).map_err(|_| {
            WspaceError::not_found_error(
                "git metadata directory does not exist",
                Some(common_dir.clone()),
            )
        })?;

        // 3. 親ディレクトリをルート候補とし、メタデータの存在で検証
        let candidate = common_dir
            .parent()
            .ok_or_not_found("could not determine project root", Some(common_dir.clone()))?;
        if !ProjectRoot::has_metadata(candidate) {
            return Err(WspaceError::not_found_error(
                "could not determine project root (no .bare or .git found)",
                Some(candidate.to_path_buf()),
            ));
        }

        tracing::debug!(root = %candidate.display(), "resolved project root");
        Ok(ProjectRoot::new(candidate, &common_dir))
    }

    /// ルートを解決し、プロジェクト設定（`.wspace.yaml`）を読み込む
    pub async fn open(&self, cwd: &Path) -> WspaceResult<ProjectContext> {
        let root = self.locate(cwd).await?;
        let config = ConfigStore::load(&root.config_path())?;
        let layout = ProjectLayout::new(root.path(), &config);
        Ok(ProjectContext {
            root,
            config,
            layout,
        })
    }
}
