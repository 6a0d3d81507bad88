//! Command-line surface: argument parsing, command handlers and output
pub mod cli;
pub mod ui;
