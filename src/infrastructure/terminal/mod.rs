pub mod console;

#[cfg(test)]
pub mod scripted;

pub use console::{is_affirmative, Console, TerminalConsole};

#[cfg(test)]
pub use scripted::ScriptedConsole;
