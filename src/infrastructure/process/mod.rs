pub mod command_executor;

pub use command_executor::{
    args,
    CommandExecutor,
    ExecutionConfig,
    ExecutionResult,
    OutputMode,
};
