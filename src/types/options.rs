//! Options for configuring the language server

use crate::types::{LangServerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options sent by the client in `initializationOptions`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializationOptions {
    /// Lint command: executable followed by its base arguments
    #[serde(default)]
    pub command: Vec<String>,
}

impl InitializationOptions {
    /// Deserialize the raw `initializationOptions` value.
    ///
    /// A missing value yields the default (empty) options.
    pub fn from_value(value: Option<serde_json::Value>) -> Result<Self> {
        match value {
            Some(serde_json::Value::Null) | None => Ok(Self::default()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }
}

/// Process-wide options chosen on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerOptions {
    /// Do not prefix diagnostic messages with the linter name
    pub no_linter_name: bool,
}

impl ServerOptions {
    /// Create a new ServerOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the `"<linter>: "` message prefix
    pub fn no_linter_name(mut self) -> Self {
        self.no_linter_name = true;
        self
    }
}

/// A validated lint command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintCommand {
    /// Executable to run
    pub program: String,

    /// Base arguments placed before the directory argument
    pub args: Vec<String>,
}

impl LintCommand {
    /// Split a command vector into executable and base arguments
    pub fn new(command: Vec<String>) -> Result<Self> {
        let mut parts = command.into_iter();
        let program = parts
            .next()
            .filter(|program| !program.trim().is_empty())
            .ok_or_else(|| {
                LangServerError::InvalidConfig(
                    "initializationOptions.command must name an executable".to_string(),
                )
            })?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

/// Session settings fixed by `initialize`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSettings {
    /// Workspace root, when the client sent one
    pub root_dir: Option<PathBuf>,

    /// Command used for every lint run
    pub command: LintCommand,
}

impl LintSettings {
    /// Create settings from a root directory and a command
    pub fn new(root_dir: Option<PathBuf>, command: LintCommand) -> Self {
        Self { root_dir, command }
    }

    /// Workspace root as a path
    pub fn root_dir(&self) -> Option<&Path> {
        self.root_dir.as_deref()
    }
}
