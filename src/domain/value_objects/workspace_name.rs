use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path};
use thiserror::Error;

use crate::common::error::WspaceError;

/// Number of characters taken from a workspace name when no identifier is
/// given explicitly.
pub const IDENTIFIER_LENGTH: usize = 4;

#[derive(Debug, Error, PartialEq)]
pub enum WorkspaceNameError {
    #[error("worktree name cannot be empty")]
    Empty,

    #[error("worktree name must be a relative path inside the workspaces directory: {0}")]
    OutsideSpaces(String),

    #[error("identifier cannot be empty")]
    EmptyIdentifier,

    #[error("identifier cannot contain whitespace: {0:?}")]
    InvalidIdentifier(String),
}

/// Name of a workspace, i.e. its path relative to the workspaces directory.
/// New branches are created under the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkspaceName(String);

impl WorkspaceName {
    pub fn new(name: &str) -> Result<Self, WorkspaceNameError> {
        if name.is_empty() {
            return Err(WorkspaceNameError::Empty);
        }

        let escapes = Path::new(name)
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(WorkspaceNameError::OutsideSpaces(name.to_string()));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier derived from this name: the first four characters, or the
    /// whole name when it is shorter.
    pub fn default_identifier(&self) -> Identifier {
        Identifier(self.0.chars().take(IDENTIFIER_LENGTH).collect())
    }
}

impl fmt::Display for WorkspaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Short token namespacing a workspace's environment name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(identifier: &str) -> Result<Self, WorkspaceNameError> {
        if identifier.is_empty() {
            return Err(WorkspaceNameError::EmptyIdentifier);
        }
        if identifier.chars().any(char::is_whitespace) {
            return Err(WorkspaceNameError::InvalidIdentifier(identifier.to_string()));
        }
        Ok(Self(identifier.to_string()))
    }

    /// Explicit identifier when given, otherwise derived from `name`.
    pub fn resolve(name: &WorkspaceName, explicit: Option<&str>) -> Result<Self, WorkspaceNameError> {
        match explicit {
            Some(identifier) => Self::new(identifier),
            None => Ok(name.default_identifier()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `<identifier>-<original>`. The same string goes into the environment
/// declaration and into the dependent settings file.
pub fn compose_environment_name(identifier: &Identifier, original: &str) -> String {
    format!("{}-{}", identifier, original)
}

impl From<WorkspaceNameError> for WspaceError {
    fn from(error: WorkspaceNameError) -> Self {
        WspaceError::precondition_error(error.to_string())
    }
}
