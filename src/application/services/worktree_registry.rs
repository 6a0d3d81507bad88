use std::path::{Path, PathBuf};

use crate::common::result::WspaceResult;
use crate::domain::entities::{ProjectLayout, WorkspaceEntry};
use crate::infrastructure::git::git_interface::HEADS_NAMESPACE;
use crate::infrastructure::git::GitOperations;

/// Parse `git worktree list --porcelain` output.
///
/// Records are separated by blank lines; the last record may not be
/// followed by one. Entry order follows the listing.
pub fn parse_porcelain(output: &str, spaces_dir: &Path) -> Vec<WorkspaceEntry> {
    let mut entries = Vec::new();
    let mut current: Option<RecordBuilder> = None;

    for line in output.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            if let Some(record) = current.take() {
                entries.push(record.build(spaces_dir));
            }
            continue;
        }

        if let Some(path) = line.strip_prefix("worktree ") {
            // a path line without a preceding blank line still starts a new record
            if let Some(record) = current.take() {
                entries.push(record.build(spaces_dir));
            }
            current = Some(RecordBuilder::new(path));
        } else if let Some(record) = current.as_mut() {
            if line == "bare" {
                record.bare = true;
            } else if let Some(reference) = line.strip_prefix("branch ") {
                let short = reference.strip_prefix(HEADS_NAMESPACE).unwrap_or(reference);
                record.branch = Some(short.to_string());
            }
        }
    }

    if let Some(record) = current.take() {
        entries.push(record.build(spaces_dir));
    }
    entries
}

struct RecordBuilder {
    path: PathBuf,
    branch: Option<String>,
    bare: bool,
}

impl RecordBuilder {
    fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(path),
            branch: None,
            bare: false,
        }
    }

    fn build(self, spaces_dir: &Path) -> WorkspaceEntry {
        let relative = self
            .path
            .starts_with(spaces_dir)
            .then(|| pathdiff::diff_paths(&self.path, spaces_dir))
            .flatten()
            .filter(|p| !p.as_os_str().is_empty());

        let (name, in_spaces) = match relative {
            Some(relative) => (relative.to_string_lossy().into_owned(), true),
            None => (self.path.to_string_lossy().into_owned(), false),
        };

        WorkspaceEntry {
            name,
            branch: self.branch,
            path: self.path,
            is_primary: self.bare,
            in_spaces,
        }
    }
}

/// Worktree registry of one project
pub struct WorktreeRegistry<'a> {
    git: &'a dyn GitOperations,
}

impl<'a> WorktreeRegistry<'a> {
    pub fn new(git: &'a dyn GitOperations) -> Self {
        Self { git }
    }

    /// Every record, the bare entry and worktrees outside the workspaces
    /// directory included
    pub async fn list(&self, layout: &ProjectLayout) -> WspaceResult<Vec<WorkspaceEntry>> {
        let output = self.git.list_worktrees(layout.root()).await?;
        let entries = parse_porcelain(&output, &layout.spaces_dir());
        tracing::debug!(count = entries.len(), "parsed worktree registry");
        Ok(entries)
    }

    /// Workspaces shown to the user
    pub async fn workspaces(&self, layout: &ProjectLayout) -> WspaceResult<Vec<WorkspaceEntry>> {
        Ok(self
            .list(layout)
            .await?
            .into_iter()
            .filter(WorkspaceEntry::is_listed)
            .collect())
    }

    /// Non-primary entry located at `path`
    pub async fn find_by_path(
        &self,
        layout: &ProjectLayout,
        path: &Path,
    ) -> WspaceResult<Option<WorkspaceEntry>> {
        Ok(self
            .list(layout)
            .await?
            .into_iter()
            .find(|entry| entry.is_removable() && entry.matches_path(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ToolConfig;
    use crate::infrastructure::git::MockGitOperations;
    use pretty_assertions::assert_eq;

    const SPACES: &str = "/work/site/spaces";

    #[test]
    fn test_bare_record_is_primary_and_name_is_relative() {
        let output = "worktree /work/site/.bare\nbare\n\n\
                      worktree /work/site/spaces/main\nHEAD 1234abcd\nbranch refs/heads/main\n\n";
        let entries = parse_porcelain(output, Path::new(SPACES));

        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_primary);
        assert!(!entries[0].is_listed());

        let listed: Vec<_> = entries.iter().filter(|e| e.is_listed()).collect();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "main");
        assert_eq!(listed[0].branch.as_deref(), Some("main"));
        assert_eq!(listed[0].path, PathBuf::from("/work/site/spaces/main"));
    }

    #[test]
    fn test_last_record_without_trailing_blank_line() {
        let output = "worktree /work/site/.bare\nbare\n\n\
                      worktree /work/site/spaces/0001-new-task\nHEAD 1234abcd\nbranch refs/heads/0001-new-task";
        let entries = parse_porcelain(output, Path::new(SPACES));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name, "0001-new-task");
        assert_eq!(entries[1].branch.as_deref(), Some("0001-new-task"));
    }

    #[test]
    fn test_detached_and_nested_branch_names() {
        let output = "worktree /work/site/spaces/review\nHEAD 1234abcd\ndetached\n\n\
                      worktree /work/site/spaces/feature/login\nHEAD 5678ef01\nbranch refs/heads/feature/login\n";
        let entries = parse_porcelain(output, Path::new(SPACES));

        assert_eq!(entries[0].branch, None);
        assert_eq!(entries[0].branch_label(), "detached");
        assert_eq!(entries[1].name, "feature/login");
        assert_eq!(entries[1].branch.as_deref(), Some("feature/login"));
    }

    #[test]
    fn test_worktree_outside_spaces_is_not_listed_but_removable() {
        let output = "worktree /elsewhere/hotfix\nHEAD 1234abcd\nbranch refs/heads/hotfix\n\n\
                      worktree /work/site/spacesuit\nHEAD 1234abcd\nbranch refs/heads/suit\n";
        let entries = parse_porcelain(output, Path::new(SPACES));

        assert_eq!(entries.len(), 2);
        for entry in &entries {
            assert!(!entry.in_spaces);
            assert!(!entry.is_listed());
            assert!(entry.is_removable());
        }
        assert_eq!(entries[0].name, "/elsewhere/hotfix");
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_porcelain("", Path::new(SPACES)).is_empty());
        assert!(parse_porcelain("\n\n", Path::new(SPACES)).is_empty());
    }

    #[tokio::test]
    async fn test_registry_lists_from_project_root() {
        let layout = ProjectLayout::new("/work/site", &ToolConfig::default());

        let mut git = MockGitOperations::new();
        git.expect_list_worktrees()
            .withf(|root| root == Path::new("/work/site"))
            .times(2)
            .returning(|_| {
                Ok("worktree /work/site/.bare\nbare\n\n\
                    worktree /work/site/spaces/main\nHEAD 1234abcd\nbranch refs/heads/main\n"
                    .to_string())
            });

        let registry = WorktreeRegistry::new(&git);
        let workspaces = registry.workspaces(&layout).await.unwrap();
        assert_eq!(workspaces.len(), 1);

        let found = registry
            .find_by_path(&layout, Path::new("/work/site/.bare"))
            .await
            .unwrap();
        assert_eq!(found, None);
    }
}
