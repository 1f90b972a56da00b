//! Error types for the version-tracking engine.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Every failure the engine or CLI can report.
///
/// All variants abort the current command; none are retried.
#[derive(Error, Debug)]
pub enum MvcError {
    #[error("Invalid base path: {0}")]
    InvalidBasePath(PathBuf),

    #[error("Invalid project name: {0:?}")]
    InvalidProjectName(String),

    #[error("Invalid project: {0}")]
    InvalidProject(String),

    #[error("Project already exists: {0}")]
    ProjectAlreadyExists(String),

    #[error("No workspace bound to {0}")]
    NoWorkspace(PathBuf),

    #[error("No files submitted")]
    NoSubmits,

    #[error("Unsaved submits")]
    UnsavedSubmits,

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("File not found in workspace: {0}")]
    FileNotInWorkspace(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record {path}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl MvcError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        MvcError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<config::ConfigError> for MvcError {
    fn from(err: config::ConfigError) -> Self {
        MvcError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MvcError>;
