use serde::Serialize;
use std::path::Path;

use crate::application::services::{ProjectLocator, WorktreeRegistry};
use crate::common::result::WspaceResult;
use crate::domain::entities::WorkspaceEntry;
use crate::infrastructure::git::GitOperations;

/// ワークスペース一覧の結果
#[derive(Debug, Clone, Serialize)]
pub struct ListWorkspacesResult {
    pub workspaces: Vec<WorkspaceEntry>,
}

impl ListWorkspacesResult {
    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }
}

/// ワークスペース一覧のユースケース
///
/// 読み取り専用のためロックは取得しない。
pub struct ListWorkspacesUseCase<'a> {
    git: &'a dyn GitOperations,
}

impl<'a> ListWorkspacesUseCase<'a> {
    pub fn new(git: &'a dyn GitOperations) -> Self {
        Self { git }
    }

    pub async fn execute(&self, cwd: &Path) -> WspaceResult<ListWorkspacesResult> {
        let project = ProjectLocator::new(self.git).open(cwd).await?;
        let workspaces = WorktreeRegistry::new(self.git)
            .workspaces(&project.layout)
            .await?;
        Ok(ListWorkspacesResult { workspaces })
    }
}
