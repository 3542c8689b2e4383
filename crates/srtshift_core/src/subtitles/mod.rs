//! Subtitle store.
//!
//! Provides parsing, serialization, and the in-memory track model for SRT
//! subtitle files.
//!
//! # Components
//!
//! - **types**: Core data structures (SubtitleTrack, SubtitleEntry)
//! - **parsers**: SRT block parser (best-effort, never aborts)
//! - **writers**: SRT writer (applies the display offset at write time)
//!
//! # Usage
//!
//! ```no_run
//! use srtshift_core::subtitles::{parse_file, write_file};
//! use srtshift_core::timecode::TimeOffset;
//!
//! # fn main() -> Result<(), srtshift_core::subtitles::SubtitleError> {
//! let track = parse_file("movie.srt")?;
//! write_file(&track, "movie.shifted.srt", TimeOffset::new(2_000, true))?;
//! # Ok(())
//! # }
//! ```

mod error;
pub mod parsers;
mod types;
pub mod writers;

use std::fs;
use std::path::Path;

use tracing::info;

// Re-export core types
pub use error::{ParseError, SubtitleError};
pub use types::{SubtitleEntry, SubtitleTrack};

// Re-export parser and writer entry points
pub use parsers::parse_srt;
pub use writers::write_srt;

use crate::timecode::TimeOffset;

/// Parse an SRT file from disk.
pub fn parse_file(path: impl AsRef<Path>) -> Result<SubtitleTrack, SubtitleError> {
    let path = path.as_ref();

    let content =
        fs::read_to_string(path).map_err(|e| SubtitleError::read(path.to_path_buf(), e))?;

    let track = parse_srt(&content);
    info!(path = %path.display(), entries = track.len(), "loaded srt file");

    Ok(track)
}

/// Write a track to an SRT file with `offset` baked into the emitted times.
///
/// Stored times are never mutated; only the serialized output is shifted.
pub fn write_file(
    track: &SubtitleTrack,
    path: impl AsRef<Path>,
    offset: TimeOffset,
) -> Result<(), SubtitleError> {
    let path = path.as_ref();

    let content = write_srt(track, offset);
    fs::write(path, content).map_err(|e| SubtitleError::write(path.to_path_buf(), e))?;

    info!(path = %path.display(), entries = track.len(), offset_ms = offset.signed_ms(), "saved srt file");
    Ok(())
}
