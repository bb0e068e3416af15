use std::path::PathBuf;

use thiserror::Error;

use crate::domain::Version;

/// Unified error type for docs-builder operations
#[derive(Error, Debug)]
pub enum DocsBuildError {
    #[error("Failed to run command: {command} (exit code {code})")]
    Command { command: String, code: i32 },

    #[error("Failed to start command: {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Version {0} already exists")]
    VersionExists(Version),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("No output from: {0}")]
    MissingOutput(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("git checkout {target} failed: {source}")]
    Checkout {
        target: String,
        #[source]
        source: git2::Error,
    },

    #[error("Download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Expected directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Invalid versions list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in docs-builder
pub type Result<T> = std::result::Result<T, DocsBuildError>;

impl DocsBuildError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        DocsBuildError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        DocsBuildError::Version(msg.into())
    }

    /// Create a missing-output error for the given query
    pub fn missing_output(query: impl Into<String>) -> Self {
        DocsBuildError::MissingOutput(query.into())
    }

    /// The command string, if this error came from an external command
    pub fn command(&self) -> Option<&str> {
        match self {
            DocsBuildError::Command { command, .. } | DocsBuildError::Spawn { command, .. } => {
                Some(command)
            }
            _ => None,
        }
    }
}
