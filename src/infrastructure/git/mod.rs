pub mod git_cli;
pub mod git_interface;

// Re-export main types for convenience
pub use git_cli::GitCli;
pub use git_interface::{GitOperations, WorktreeCheckout, WorktreeSpec};

#[cfg(test)]
pub use git_interface::MockGitOperations;
