/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Git operations through the `git` executable
/// - Development environments through DDEV and the container runtime
/// - File system operations (project config, advisory lock)
/// - Process execution and the interactive terminal
pub mod environment;
pub mod filesystem;
pub mod git;
pub mod process;
pub mod terminal;

// Re-export commonly used types
pub use environment::{DdevEnvironment, EnvironmentManager};
pub use filesystem::{ConfigStore, ProjectLock};
pub use git::{GitCli, GitOperations, WorktreeCheckout, WorktreeSpec};
pub use process::CommandExecutor;
pub use terminal::{Console, TerminalConsole};
