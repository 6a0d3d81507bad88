pub mod init;
pub mod list;
pub mod new;
pub mod remove;

pub use init::InitCommand;
pub use list::ListCommand;
pub use new::NewCommand;
pub use remove::RemoveCommand;

use std::path::PathBuf;

use crate::application::use_cases::Collaborators;
use crate::infrastructure::environment::DdevEnvironment;
use crate::infrastructure::git::GitCli;
use crate::infrastructure::terminal::TerminalConsole;
use crate::presentation::ui::DisplayHelper;

/// Everything a command handler needs: the working context and the
/// concrete collaborators built from the global flags
pub struct CommandContext {
    pub cwd: PathBuf,
    pub git: GitCli,
    pub environment: DdevEnvironment,
    pub console: TerminalConsole,
    pub display: DisplayHelper,
}

impl CommandContext {
    pub fn collaborators(&self) -> Collaborators<'_> {
        Collaborators::new(&self.git, &self.environment, &self.console)
    }
}
