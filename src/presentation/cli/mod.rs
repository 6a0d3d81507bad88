pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::env;
use std::path::PathBuf;
use std::process::exit;

use crate::infrastructure::environment::DdevEnvironment;
use crate::infrastructure::git::GitCli;
use crate::infrastructure::terminal::TerminalConsole;
use crate::presentation::ui::{helpers, DisplayHelper};
use commands::{CommandContext, InitCommand, ListCommand, NewCommand, RemoveCommand};

/// Output format options for the list command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    Text,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// Version with the commit and build date stamped by `build.rs`
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("WSPACE_GIT_HASH"),
    " ",
    env!("WSPACE_BUILD_DATE"),
    ")"
);

/// wspace - git worktree workspaces with isolated DDEV environments
#[derive(Parser, Debug)]
#[command(name = "wspace")]
#[command(about = "Manage git worktree workspaces, each with its own DDEV environment")]
#[command(version = LONG_VERSION)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
#[command(after_help = "Examples:
  wspace init git@github.com:user/project.git
  wspace init git@github.com:user/project.git myproject
  wspace new 0001-new-task
  wspace new 0001-new-task t1              (custom DDEV identifier)
  wspace new --base develop 0001-new-task  (branch off develop)
  wspace remove 0001-new-task              (remove by name)
  wspace remove                            (remove current directory's worktree)")]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Working directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// git executable
    #[arg(long, global = true, env = "WSPACE_GIT", default_value = "git")]
    pub git: String,

    /// Environment manager executable
    #[arg(long, global = true, env = "WSPACE_ENV_TOOL", default_value = "ddev")]
    pub env_tool: String,

    /// Container runtime used to prune the build cache
    #[arg(long, global = true, env = "WSPACE_CONTAINER_TOOL", default_value = "docker")]
    pub container_tool: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clone a repository into a bare-clone project structure
    Init {
        /// Remote URL (or local path) of the repository
        url: String,

        /// Project directory name (defaults to the repository name)
        name: Option<String>,
    },

    /// Create a new worktree + DDEV environment
    New {
        /// Branch or ref to start the new branch from
        #[arg(short, long)]
        base: Option<String>,

        /// Workspace name, also used as the branch name
        name: String,

        /// DDEV project name prefix (defaults to the first 4 characters of the name)
        identifier: Option<String>,
    },

    /// Remove a worktree + DDEV environment
    Remove {
        /// Workspace name (defaults to the workspace containing the current directory)
        name: Option<String>,
    },

    /// List all workspaces
    #[command(visible_alias = "ls")]
    List {
        /// Output format (text, json, yaml)
        #[arg(short, long, value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let use_color = helpers::should_use_color(self.cli.no_color);
        colored::control::set_override(use_color);
        let display = DisplayHelper::new(use_color);

        let result = match self.context(use_color) {
            Ok(ctx) => self.handle_command(&ctx).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::debug!(error = ?e, "command failed");
                display.error(&e.to_string());
                exit(1);
            }
        }
    }

    /// Working context from `-C`, resolved against the process directory
    /// without changing it
    fn working_directory(&self) -> anyhow::Result<PathBuf> {
        let current = env::current_dir()?;
        Ok(match &self.cli.directory {
            Some(dir) => current.join(dir),
            None => current,
        })
    }

    fn context(&self, use_color: bool) -> anyhow::Result<CommandContext> {
        let cwd = self.working_directory()?;
        tracing::debug!(cwd = %cwd.display(), git = %self.cli.git, "building command context");
        Ok(CommandContext {
            cwd,
            git: GitCli::with_executable(&self.cli.git),
            environment: DdevEnvironment::with_executables(
                &self.cli.env_tool,
                &self.cli.container_tool,
            ),
            console: TerminalConsole::new(use_color),
            display: DisplayHelper::new(use_color),
        })
    }

    async fn handle_command(&self, ctx: &CommandContext) -> anyhow::Result<()> {
        match &self.cli.command {
            Commands::Init { url, name } => {
                InitCommand::new(url.clone(), name.clone()).execute(ctx).await
            }
            Commands::New {
                base,
                name,
                identifier,
            } => {
                NewCommand::new(name.clone(), identifier.clone(), base.clone())
                    .execute(ctx)
                    .await
            }
            Commands::Remove { name } => RemoveCommand::new(name.clone()).execute(ctx).await,
            Commands::List { output } => ListCommand::new(*output).execute(ctx).await,
        }
    }
}
