use super::tool_config::ToolConfig;
use std::path::{Path, PathBuf};

/// ベアリポジトリのディレクトリ名
pub const BARE_DIR: &str = ".bare";
/// 通常のgitメタデータ（ディレクトリまたは間接参照ファイル）
pub const GIT_ENTRY: &str = ".git";
/// `.git`間接参照ファイルの内容
pub const GITDIR_MARKER: &str = "gitdir: .bare\n";
/// プロジェクト設定ファイル名
pub const CONFIG_FILE: &str = ".wspace.yaml";
/// 同時実行防止用のロックファイル名（gitの共有ディレクトリ内に作成）
pub const LOCK_FILE: &str = "wspace.lock";

/// プロジェクトルート
///
/// gitの共有ディレクトリ（`--git-common-dir`）の親ディレクトリ。
/// 毎回の実行時に算出され、ディスクには保存されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    path: PathBuf,
    common_dir: PathBuf,
}

impl ProjectRoot {
    pub fn new(path: impl Into<PathBuf>, common_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            common_dir: common_dir.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// gitの共有ディレクトリ（`.bare`または`.git`）
    pub fn common_dir(&self) -> &Path {
        &self.common_dir
    }

    pub fn lock_path(&self) -> PathBuf {
        self.common_dir.join(LOCK_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.path.join(CONFIG_FILE)
    }

    /// `.bare`または`.git`がルート直下に存在するか
    pub fn has_metadata(path: &Path) -> bool {
        path.join(BARE_DIR).exists() || path.join(GIT_ENTRY).exists()
    }
}

/// プロジェクト配下の派生パス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    spaces_dir: String,
    snapshot: String,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>, config: &ToolConfig) -> Self {
        Self {
            root: root.into(),
            spaces_dir: config.spaces_dir.clone(),
            snapshot: config.snapshot.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn bare_dir(&self) -> PathBuf {
        self.root.join(BARE_DIR)
    }

    pub fn marker_file(&self) -> PathBuf {
        self.root.join(GIT_ENTRY)
    }

    pub fn spaces_dir(&self) -> PathBuf {
        self.root.join(&self.spaces_dir)
    }

    /// ワークスペースのルートからの相対パス（git worktree addに渡す）
    pub fn workspace_relative(&self, name: &str) -> PathBuf {
        Path::new(&self.spaces_dir).join(name)
    }

    pub fn workspace_path(&self, name: &str) -> PathBuf {
        self.root.join(self.workspace_relative(name))
    }

    /// スナップショットファイルの既定パス
    pub fn snapshot_file(&self) -> PathBuf {
        self.root.join(&self.snapshot)
    }

    /// スナップショットを置くディレクトリ
    pub fn snapshot_dir(&self) -> PathBuf {
        self.snapshot_file()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone())
    }
}
