use async_trait::async_trait;
use std::path::Path;

use crate::common::result::WspaceResult;

/// Container-backed local development environment of a workspace
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnvironmentManager: Send + Sync {
    /// Start (and on first run, create) the environment of `workspace`
    async fn start(&self, workspace: &Path) -> WspaceResult<()>;

    /// Delete the environment without taking a snapshot and without asking
    async fn delete(&self, workspace: &Path) -> WspaceResult<()>;

    /// Import a database snapshot file into the running environment
    async fn import_snapshot(&self, workspace: &Path, snapshot: &Path) -> WspaceResult<()>;

    /// Reclaim the container build cache
    async fn reclaim_build_cache(&self, cwd: &Path) -> WspaceResult<()>;
}
