pub mod config_mutator;
pub mod environment_setup;
pub mod project_locator;
pub mod rollback;
pub mod worktree_registry;

pub use config_mutator::ConfigMutator;
pub use environment_setup::{EnvironmentSetup, SetupRequest};
pub use project_locator::{ProjectContext, ProjectLocator};
pub use rollback::{IntoStepFailure, Rollback, StepFailure, StepOutcome, CLEANUP_HEADER};
pub use worktree_registry::{parse_porcelain, WorktreeRegistry};
