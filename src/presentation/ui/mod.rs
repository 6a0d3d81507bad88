pub mod display;

pub use display::{helpers, DisplayHelper};
