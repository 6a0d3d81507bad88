use colored::Colorize;
use console::measure_text_width;

use crate::domain::entities::WorkspaceEntry;
use crate::domain::value_objects::StepLog;

/// Width of the description column in workflow summaries
const SUMMARY_LABEL_WIDTH: usize = 25;

/// Display utilities for the CLI interface
pub struct DisplayHelper {
    pub use_color: bool,
}

impl DisplayHelper {
    /// Create a new DisplayHelper
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "Error:".red().bold(), message);
        } else {
            eprintln!("Error: {}", message);
        }
    }

    /// Print a workflow summary framed by `=== title ===`
    pub fn print_summary(&self, title: &str, steps: &StepLog) {
        println!();
        let header = format!("=== {} ===", title);
        if self.use_color {
            println!("{}", header.bold());
        } else {
            println!("{}", header);
        }
        println!();
        for line in summary_lines(steps) {
            println!("{}", line);
        }
        println!();
    }

    /// Print the workspace listing, or `No workspaces found.`
    pub fn print_workspaces(&self, workspaces: &[WorkspaceEntry]) {
        if workspaces.is_empty() {
            println!("No workspaces found.");
            return;
        }
        for line in workspace_lines(workspaces) {
            println!("{}", line);
        }
    }
}

/// Summary rows: `  <description>:` padded to a fixed column, then the detail
pub fn summary_lines(steps: &StepLog) -> Vec<String> {
    steps
        .steps()
        .iter()
        .map(|step| {
            format!(
                "  {:<width$} {}",
                format!("{}:", step.description),
                step.detail,
                width = SUMMARY_LABEL_WIDTH
            )
        })
        .collect()
}

/// Listing rows with names padded to the longest display width
pub fn workspace_lines(workspaces: &[WorkspaceEntry]) -> Vec<String> {
    let width = workspaces
        .iter()
        .map(|entry| measure_text_width(&entry.name))
        .max()
        .unwrap_or(0);

    workspaces
        .iter()
        .map(|entry| {
            let padding = " ".repeat(width - measure_text_width(&entry.name));
            format!("  {}{}  ({})", entry.name, padding, entry.branch_label())
        })
        .collect()
}

/// Helper functions for common display patterns
pub mod helpers {
    /// Whether stdout should be colored: not disabled by flag or `NO_COLOR`,
    /// and attached to a terminal
    pub fn should_use_color(no_color: bool) -> bool {
        !no_color && std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
    }
}
