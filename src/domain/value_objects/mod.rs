pub mod remote_url;
pub mod step;
pub mod workspace_name;

pub use remote_url::{RemoteUrl, RemoteUrlError};
pub use step::{StepLog, StepResult};
pub use workspace_name::{Identifier, WorkspaceName, WorkspaceNameError};
