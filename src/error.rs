//! Error handling for sigbuf-export
//!
//! Every failure aborts the buffer being exported and, through the pool
//! traversal, the whole pool dump. Files already written stay on disk.

use std::collections::TryReserveError;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Main error type for export operations
#[derive(Error, Debug)]
pub enum ExportError {
    // Filename Errors
    #[error("Memory error while building {what}")]
    Allocation {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },

    // Open Errors
    #[error("Cannot create `{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot open `{}' for write: {reason}", .path.display())]
    SinkOpen { path: PathBuf, reason: String },

    #[error("Cannot create directory `{}': {source}", .path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Write Errors
    #[error("Write to `{}' failed: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Write to `{}' failed: {written}/{requested}", .path.display())]
    ShortWrite {
        path: PathBuf,
        written: usize,
        requested: usize,
    },

    #[error("Cannot close `{}': {reason}", .path.display())]
    SinkClose { path: PathBuf, reason: String },

    #[error("Complex samples are not two contiguous scalars: {reason}")]
    ComplexLayout { reason: String },

    // Configuration Errors
    #[error("Failed to read config `{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid export config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl ExportError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ExportError::Allocation { .. } => "ALLOCATION_FAILED",
            ExportError::Open { .. } => "OPEN_FAILED",
            ExportError::SinkOpen { .. } => "SINK_OPEN_FAILED",
            ExportError::DirectoryCreate { .. } => "DIRECTORY_CREATE_FAILED",
            ExportError::Write { .. } => "WRITE_FAILED",
            ExportError::ShortWrite { .. } => "SHORT_WRITE",
            ExportError::SinkClose { .. } => "SINK_CLOSE_FAILED",
            ExportError::ComplexLayout { .. } => "COMPLEX_LAYOUT",
            ExportError::ConfigRead { .. } => "CONFIG_READ_FAILED",
            ExportError::ConfigParse(_) => "CONFIG_PARSE_FAILED",
        }
    }

    /// Path of the file the failure happened on, when there is one
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ExportError::Open { path, .. }
            | ExportError::SinkOpen { path, .. }
            | ExportError::DirectoryCreate { path, .. }
            | ExportError::Write { path, .. }
            | ExportError::ShortWrite { path, .. }
            | ExportError::SinkClose { path, .. }
            | ExportError::ConfigRead { path, .. } => Some(path.as_path()),
            _ => None,
        }
    }
}
