//! Advisory lock around mutations of a project root
//!
//! `new` and `remove` hold an exclusive `fs2` lock on a file inside the
//! shared git directory. A second invocation fails fast instead of waiting.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::common::error::WspaceError;
use crate::common::result::{ResultExt, WspaceResult};

/// Exclusive lock released on drop
#[derive(Debug)]
pub struct ProjectLock {
    file: File,
    path: PathBuf,
}

impl ProjectLock {
    /// Take the lock at `path`, creating the file if needed.
    pub fn acquire(path: &Path) -> WspaceResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .with_filesystem_error("failed to open lock file", Some(path.to_path_buf()))?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "acquired project lock");
                Ok(Self {
                    file,
                    path: path.to_path_buf(),
                })
            }
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                Err(WspaceError::precondition_error(format!(
                    "another wspace command is already running in this project (lock: {})",
                    path.display()
                )))
            }
            Err(e) => Err(WspaceError::filesystem_error_with_source(
                "failed to lock project",
                Some(path.to_path_buf()),
                e,
            )),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ProjectLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::debug!(path = %self.path.display(), error = %e, "failed to release project lock");
        }
    }
}
