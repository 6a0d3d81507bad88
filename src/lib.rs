//! # wspace - git worktree workspaces with isolated DDEV environments
//!
//! `wspace` manages a project laid out as a bare clone plus one git worktree
//! per task. Every workspace gets its own branch and, when the project
//! declares one, its own DDEV environment with a unique name.
//!
//! ## Project layout
//!
//! ```text
//! <root>/
//!   .bare/            shared object store (bare clone)
//!   .git              "gitdir: .bare"
//!   .wspace.yaml      optional project settings
//!   db/db.sql.gz      default database dump
//!   spaces/
//!     main/           default-branch workspace
//!     0001-new-task/  one workspace per task
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! wspace init git@github.com:user/project.git
//! cd project/spaces/main
//! wspace new 0001-new-task        # DDEV project "0001-<name>"
//! wspace list
//! wspace remove 0001-new-task
//! ```
//!
//! ## Architecture
//!
//! - [`domain`]: workspace names, project layout, cleanup bookkeeping
//! - [`application`]: the `init`, `new`, `remove` and `list` workflows
//! - [`infrastructure`]: git, DDEV, terminal and filesystem adapters
//! - [`presentation`]: CLI interface and output formatting
//! - [`common`]: error type and result helpers
//!
//! Every external command receives an explicit working directory; the
//! process working directory is never changed.
//!
//! ## Error Handling
//!
//! - [`common::error::WspaceError`]: error taxonomy shared by all layers
//! - [`common::result::WspaceResult`]: Type alias for `Result<T, WspaceError>`
//!
//! ## Examples
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wspace::application::use_cases::ListWorkspacesUseCase;
//! use wspace::infrastructure::git::GitCli;
//!
//! # async fn example() -> wspace::Result<()> {
//! let git = GitCli::new();
//! let result = ListWorkspacesUseCase::new(&git)
//!     .execute(Path::new("."))
//!     .await?;
//!
//! for workspace in &result.workspaces {
//!     println!("{} ({})", workspace.name, workspace.branch_label());
//! }
//! # Ok(())
//! # }
//! ```

// Documentation attributes
#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::WspaceError;
pub use crate::common::result::WspaceResult as Result;
