use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::infrastructure::git::MockGitOperations;

/// Project root on disk with a `.bare` directory, as left by `init`
pub struct TempProject {
    _dir: TempDir,
    pub root: PathBuf,
}

impl TempProject {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = std::fs::canonicalize(dir.path()).unwrap();
        std::fs::create_dir_all(root.join(".bare")).unwrap();
        std::fs::create_dir_all(root.join("spaces")).unwrap();
        Self { _dir: dir, root }
    }

    pub fn workspace(&self, name: &str) -> PathBuf {
        self.root.join("spaces").join(name)
    }

    /// Write `<workspace>/.ddev/config.yaml` declaring `environment_name`
    pub fn declare_environment(&self, workspace: &str, environment_name: &str) {
        write_declaration(&self.workspace(workspace), environment_name);
    }

    /// Git mock that resolves this project from any directory
    pub fn git(&self) -> MockGitOperations {
        let mut git = MockGitOperations::new();
        let common_dir = self.root.join(".bare");
        git.expect_common_dir()
            .returning(move |_| Ok(common_dir.clone()));
        git
    }
}

pub fn write_declaration(workspace: &Path, environment_name: &str) {
    let ddev = workspace.join(".ddev");
    std::fs::create_dir_all(&ddev).unwrap();
    std::fs::write(
        ddev.join("config.yaml"),
        format!("name: {}\ntype: drupal10\ndocroot: web\n", environment_name),
    )
    .unwrap();
}
