use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WspaceError {
    /// Bad arguments, missing input or an ambiguous state. Raised before any
    /// side effect is applied.
    #[error("{message}")]
    PreconditionError { message: String },

    #[error("{message}")]
    NotFoundError {
        message: String,
        path: Option<PathBuf>,
    },

    /// An external tool could not be spawned or exited non-zero.
    #[error("`{command}` failed: {message}")]
    ExternalToolError {
        message: String,
        command: String,
        exit_code: Option<i32>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The expected text was not found in a configuration file. The file is
    /// left untouched.
    #[error("{message}")]
    MutationError { message: String, path: PathBuf },

    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl WspaceError {
    pub fn precondition_error(message: impl Into<String>) -> Self {
        Self::PreconditionError {
            message: message.into(),
        }
    }

    pub fn not_found_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::NotFoundError {
            message: message.into(),
            path,
        }
    }

    pub fn external_tool_error(
        message: impl Into<String>,
        command: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::ExternalToolError {
            message: message.into(),
            command: command.into(),
            exit_code,
            source: None,
        }
    }

    pub fn external_tool_error_with_source(
        message: impl Into<String>,
        command: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::ExternalToolError {
            message: message.into(),
            command: command.into(),
            exit_code: None,
            source: Some(source),
        }
    }

    pub fn mutation_error(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MutationError {
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn filesystem_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn internal_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::InternalError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// True for errors raised by an invoked tool rather than by this crate.
    pub fn is_external(&self) -> bool {
        matches!(self, Self::ExternalToolError { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFoundError { .. })
    }
}

impl From<std::io::Error> for WspaceError {
    fn from(error: std::io::Error) -> Self {
        Self::filesystem_error_with_source(error.to_string(), None, error)
    }
}

impl From<serde_yaml::Error> for WspaceError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::config_error_with_source("YAML parsing failed", error)
    }
}

impl From<validator::ValidationErrors> for WspaceError {
    fn from(error: validator::ValidationErrors) -> Self {
        Self::config_error_with_source("invalid configuration", error)
    }
}

impl From<regex::Error> for WspaceError {
    fn from(error: regex::Error) -> Self {
        Self::internal_error_with_source("invalid pattern", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_error_display() {
        let error = WspaceError::precondition_error("branch \"nope\" does not exist");
        assert_eq!(error.to_string(), "branch \"nope\" does not exist");
        assert!(!error.is_external());
    }

    #[test]
    fn test_external_tool_error_display() {
        let error = WspaceError::external_tool_error(
            "exit code 128: fatal: invalid reference",
            "git worktree add",
            Some(128),
        );
        assert!(error.is_external());
        assert_eq!(
            error.to_string(),
            "`git worktree add` failed: exit code 128: fatal: invalid reference"
        );
    }

    #[test]
    fn test_mutation_error_keeps_path() {
        let error = WspaceError::mutation_error("missing line", "/tmp/config.yaml");
        if let WspaceError::MutationError { path, .. } = error {
            assert_eq!(path, PathBuf::from("/tmp/config.yaml"));
        } else {
            panic!("Expected MutationError");
        }
    }

    #[test]
    fn test_error_conversion_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: WspaceError = io_error.into();
        assert!(matches!(error, WspaceError::FileSystemError { .. }));
    }

    #[test]
    fn test_not_found_predicate() {
        let error = WspaceError::not_found_error("no project root", None);
        assert!(error.is_not_found());
    }
}
