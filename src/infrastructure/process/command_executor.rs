use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command as TokioCommand;

use crate::common::error::WspaceError;
use crate::common::result::WspaceResult;

/// How the child's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// stdout/stderr are collected and returned; stdin is closed.
    Captured,
    /// All streams are inherited so the user sees progress live and can
    /// answer the tool's own prompts.
    Live,
}

/// Configuration for command execution
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Working directory for command execution
    pub working_directory: PathBuf,

    pub output: OutputMode,
}

impl ExecutionConfig {
    /// Captured execution in `dir`
    pub fn captured<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            working_directory: dir.as_ref().to_path_buf(),
            output: OutputMode::Captured,
        }
    }

    /// Live execution in `dir`
    pub fn live<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            working_directory: dir.as_ref().to_path_buf(),
            output: OutputMode::Live,
        }
    }
}

/// Result of command execution
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Exit code of the process (`None` when killed by a signal)
    pub exit_code: Option<i32>,

    /// Standard output (empty in live mode)
    pub stdout: String,

    /// Standard error output (empty in live mode)
    pub stderr: String,

    /// Execution time in milliseconds
    pub execution_time_ms: u64,

    /// Whether the command was successful (exit code 0)
    pub success: bool,
}

impl ExecutionResult {
    pub fn new(exit_code: Option<i32>, stdout: String, stderr: String, execution_time_ms: u64) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            execution_time_ms,
            success: exit_code == Some(0),
        }
    }

    /// Trimmed stdout
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }
}

/// Command executor for running external processes.
///
/// Every call takes its working directory explicitly; the process-wide
/// current directory is never changed.
#[derive(Debug, Clone, Default)]
pub struct CommandExecutor;

impl CommandExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Execute a command and report its exit status. A non-zero exit is not
    /// an error here; spawn failures are.
    pub async fn execute(
        &self,
        program: &str,
        args: &[String],
        config: &ExecutionConfig,
    ) -> WspaceResult<ExecutionResult> {
        let command_line = Self::command_line(program, args);
        tracing::debug!(
            command = %command_line,
            cwd = %config.working_directory.display(),
            "executing"
        );
        let start_time = Instant::now();

        let mut cmd = TokioCommand::new(program);
        cmd.args(args).current_dir(&config.working_directory);

        let result = match config.output {
            OutputMode::Captured => {
                cmd.stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped());
                let output = cmd.output().await.map_err(|e| {
                    WspaceError::external_tool_error_with_source(
                        format!("could not run {}: {}", program, e),
                        command_line.clone(),
                        e,
                    )
                })?;
                ExecutionResult::new(
                    output.status.code(),
                    String::from_utf8_lossy(&output.stdout).into_owned(),
                    String::from_utf8_lossy(&output.stderr).into_owned(),
                    start_time.elapsed().as_millis() as u64,
                )
            }
            OutputMode::Live => {
                cmd.stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit());
                let status = cmd.status().await.map_err(|e| {
                    WspaceError::external_tool_error_with_source(
                        format!("could not run {}: {}", program, e),
                        command_line.clone(),
                        e,
                    )
                })?;
                ExecutionResult::new(
                    status.code(),
                    String::new(),
                    String::new(),
                    start_time.elapsed().as_millis() as u64,
                )
            }
        };

        tracing::debug!(
            command = %command_line,
            exit_code = ?result.exit_code,
            elapsed_ms = result.execution_time_ms,
            "finished"
        );
        Ok(result)
    }

    /// Execute a command and turn a non-zero exit into `ExternalToolError`.
    pub async fn execute_checked(
        &self,
        program: &str,
        args: &[String],
        config: &ExecutionConfig,
    ) -> WspaceResult<ExecutionResult> {
        let result = self.execute(program, args, config).await?;
        if result.success {
            return Ok(result);
        }

        let status = match result.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        };
        let stderr = result.stderr.trim();
        let message = if stderr.is_empty() {
            status
        } else {
            format!("{}: {}", status, stderr)
        };
        Err(WspaceError::external_tool_error(
            message,
            Self::command_line(program, args),
            result.exit_code,
        ))
    }

    fn command_line(program: &str, args: &[String]) -> String {
        if args.is_empty() {
            program.to_string()
        } else {
            format!("{} {}", program, args.join(" "))
        }
    }
}

/// Convert string literals into an owned argument vector
pub fn args<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}
