use std::path::PathBuf;

use thiserror::Error;

use crate::codec::{DecodeError, EncodeError};

#[derive(Debug, Error)]
pub enum PersistorError {
    #[error("string persistor file path not set")]
    NotConfigured,

    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while reading line {line} in {path}: {source}")]
    IoLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line} in {path} has malformed timestamp '{value}': {source}")]
    MalformedTimestamp {
        path: PathBuf,
        line: usize,
        value: String,
        #[source]
        source: time::error::Parse,
    },

    #[error("line {line} in {path} has no ': ' delimiter")]
    MalformedRecord { path: PathBuf, line: usize },

    #[error(transparent)]
    TimestampFormat(#[from] EncodeError),
}

impl PersistorError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn io_line(path: impl Into<PathBuf>, line: usize, source: std::io::Error) -> Self {
        Self::IoLine {
            path: path.into(),
            line,
            source,
        }
    }

    #[must_use]
    pub fn decode(path: impl Into<PathBuf>, line: usize, error: DecodeError) -> Self {
        let path = path.into();
        match error {
            DecodeError::MalformedRecord => Self::MalformedRecord { path, line },
            DecodeError::MalformedTimestamp { value, source } => Self::MalformedTimestamp {
                path,
                line,
                value,
                source,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, PersistorError>;
