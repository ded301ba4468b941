use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for localization file operations
#[derive(Debug, Error)]
pub enum L10nError {
    /// Failed to read an input file
    #[error("Failed to read {path}: {source}\n\nTip: Check that the file exists and is readable")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file
    #[error("Failed to write {path}: {source}\n\nTip: Check that the destination directory exists and is writable")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Translation map could not be decoded
    #[error("Failed to decode translation map {path}:\n{reason}\n\nTip: The map must be a flat JSON object of string keys to string values")]
    MapDecode { path: PathBuf, reason: String },

    /// Translation map could not be encoded
    #[error("Failed to encode translation map: {0}")]
    MapEncode(#[from] serde_json::Error),

    /// A file required by the workflow does not exist
    #[error("Source file does not exist: {0}")]
    SourceMissing(PathBuf),

    /// Moving the previous output aside failed
    #[error("Failed to back up {from} to {to}: {reason}")]
    BackupFailed {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl L10nError {
    /// Create a ReadFailed error for a path
    pub fn read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a WriteFailed error for a path
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a MapDecode error from a file path and reason
    pub fn map_decode(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MapDecode {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a BackupFailed error
    pub fn backup_failed(
        from: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        Self::BackupFailed {
            from: from.into(),
            to: to.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for L10nError
pub type Result<T> = std::result::Result<T, L10nError>;
