//! Subtitle error types.

use std::path::PathBuf;

use crate::timecode::MalformedTimecode;

/// Errors that can occur during subtitle operations.
#[derive(Debug, thiserror::Error)]
pub enum SubtitleError {
    /// File does not exist.
    #[error("'{0}' does not exist")]
    NotFound(PathBuf),

    /// Path exists but is not a regular file.
    #[error("'{0}' is not a file")]
    NotAFile(PathBuf),

    /// Failed to read subtitle file.
    #[error("Failed to read file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write subtitle file.
    #[error("Failed to write file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Backing up the destination failed; the save was aborted before any
    /// write.
    #[error("Failed to back up '{path}': {source}")]
    BackupFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Entry position outside the track.
    #[error("Entry position {position} out of range (track has {len} entries)")]
    IndexOutOfRange { position: usize, len: usize },

    /// Parse error.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
}

/// Diagnostic kinds recorded while parsing.
///
/// The SRT parser is best-effort: every one of these is recovered locally by
/// skipping the affected block, so they surface in logs rather than as
/// failures of the parse itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Unparseable time field in a timing line.
    #[error("Invalid time at line {line}: {source}")]
    MalformedTimecode {
        line: usize,
        source: MalformedTimecode,
    },

    /// A non-integer line where an entry number was expected.
    #[error("Invalid index line {line}: '{value}'")]
    MalformedIndexLine { line: usize, value: String },

    /// Block boundary reached before index, start, and end were all valid.
    #[error("Incomplete block ending at line {line}")]
    IncompleteBlock { line: usize },
}

impl SubtitleError {
    /// Create a read error.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Create a backup error.
    pub fn backup(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::BackupFailed {
            path: path.into(),
            source,
        }
    }
}
