//! Error types for document storage and section edits.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the document file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error reading, writing, or renaming a file.
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but is not a JSON object.
    #[error("Corrupt document {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors returned by [`SectionEditor`](crate::SectionEditor) operations.
#[derive(Debug, Error)]
pub enum EditError {
    /// An item operation named a section the document does not have.
    #[error("Section '{0}' does not exist")]
    SectionNotFound(String),

    /// A list operation targeted a section that is not an array.
    #[error("Section '{0}' is not a list")]
    NotAList(String),

    #[error("Index {index} out of range for section '{section}' (length {len})")]
    IndexOutOfRange {
        section: String,
        index: usize,
        len: usize,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
