use colored::Colorize;
use std::io::{self, BufRead, Write};

use crate::common::result::{ResultExt, WspaceResult};

/// Interactive terminal used by the workflows.
///
/// Output goes to stdout; warnings and cleanup notices go to stderr. Answers are read line by line
/// from stdin, so piped input works the same as a keyboard.
pub trait Console: Send + Sync {
    /// Print a section header
    fn section(&self, title: &str);

    /// Print a plain line
    fn info(&self, message: &str);

    /// Print a progress line on stderr, keeping stdout for results
    fn notice(&self, message: &str);

    /// Print a warning
    fn warn(&self, message: &str);

    /// Ask a yes/no question; only `y` or `Y` counts as yes
    fn confirm(&self, prompt: &str) -> WspaceResult<bool>;

    /// Ask for a single line of input, returned without surrounding whitespace
    fn read_line(&self, prompt: &str) -> WspaceResult<String>;
}

/// `y`/`Y` only; `yes`, empty input and everything else mean no.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y")
}

/// Console backed by the process's standard streams
#[derive(Debug, Clone)]
pub struct TerminalConsole {
    use_color: bool,
}

impl TerminalConsole {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn prompt_and_read(&self, prompt: &str) -> WspaceResult<String> {
        let mut stdout = io::stdout();
        if self.use_color {
            print!("{}", prompt.bold());
        } else {
            print!("{}", prompt);
        }
        stdout
            .flush()
            .with_filesystem_error("failed to write prompt", None)?;

        let mut input = String::new();
        io::stdin()
            .lock()
            .read_line(&mut input)
            .with_filesystem_error("failed to read from stdin", None)?;
        Ok(input)
    }
}

impl Console for TerminalConsole {
    fn section(&self, title: &str) {
        if self.use_color {
            println!("\n{} {} {}", "---".dimmed(), title.bold(), "---".dimmed());
        } else {
            println!("\n--- {} ---", title);
        }
    }

    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn notice(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn warn(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            eprintln!("[WARNING] {}", message);
        }
    }

    fn confirm(&self, prompt: &str) -> WspaceResult<bool> {
        let answer = self.prompt_and_read(prompt)?;
        Ok(is_affirmative(&answer))
    }

    fn read_line(&self, prompt: &str) -> WspaceResult<String> {
        let answer = self.prompt_and_read(prompt)?;
        Ok(answer.trim().to_string())
    }
}
