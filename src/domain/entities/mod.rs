pub mod cleanup_state;
pub mod project;
pub mod tool_config;
pub mod workspace_entry;

pub use cleanup_state::CleanupState;
pub use project::{ProjectLayout, ProjectRoot};
pub use tool_config::{EnvironmentConfig, ToolConfig};
pub use workspace_entry::WorkspaceEntry;
