//! Error types for SWC parsing and import.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, SwcError>;

/// Top-level error for file and directory imports.
#[derive(Debug, Error)]
pub enum SwcError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file was read but its contents are not valid SWC.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The directory handed to the batch importer does not exist.
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
}

/// A structural problem in the SWC text.
///
/// Parsing stops at the first one; no partial sample table is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The file contained no sample lines at all.
    #[error("no samples found")]
    Empty,
    /// A sample line had fewer than the seven mandatory fields.
    #[error("line {line}: expected 7 fields, found {found}")]
    MissingFields { line: usize, found: usize },
    /// A mandatory field did not parse as a number.
    #[error("line {line}: field `{field}` is not a number: {token:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        token: String,
    },
}
