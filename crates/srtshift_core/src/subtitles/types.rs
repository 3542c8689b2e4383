//! Core subtitle types.
//!
//! Stored times are the times as loaded from disk. Display and save apply
//! the current offset on the fly; nothing here mutates a stored time except
//! a full-track clear followed by a reparse.

use crate::subtitles::error::SubtitleError;
use crate::timecode::Timecode;

/// A single subtitle entry: one numbered block of an SRT file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    /// 1-based display number as stored in the file. Not guaranteed unique
    /// or monotonic until [`SubtitleTrack::renumber`] runs.
    pub index: u64,
    /// Stored start time.
    pub start: Timecode,
    /// Stored end time.
    pub end: Timecode,
    /// Caption lines in file order.
    pub text_lines: Vec<String>,
}

impl SubtitleEntry {
    pub fn new(index: u64, start: Timecode, end: Timecode, text_lines: Vec<String>) -> Self {
        Self {
            index,
            start,
            end,
            text_lines,
        }
    }

    /// Caption joined with newlines, as a display cell shows it.
    pub fn text(&self) -> String {
        self.text_lines.join("\n")
    }
}

/// Ordered collection of subtitle entries.
///
/// Insertion order is file order is display order; the track is never
/// resorted on load. Entries are appended during parse and removed only by
/// clearing the whole track when a new file is loaded.
#[derive(Debug, Clone, Default)]
pub struct SubtitleTrack {
    entries: Vec<SubtitleEntry>,
}

impl SubtitleTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, preserving file order.
    pub fn push(&mut self, entry: SubtitleEntry) {
        self.entries.push(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bounds-checked entry access.
    pub fn entry(&self, position: usize) -> Result<&SubtitleEntry, SubtitleError> {
        self.entries
            .get(position)
            .ok_or(SubtitleError::IndexOutOfRange {
                position,
                len: self.entries.len(),
            })
    }

    /// All entries in track order.
    pub fn entries(&self) -> &[SubtitleEntry] {
        &self.entries
    }

    /// Drop every entry. Used when a new file replaces the track.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Reassign `index = position + 1` over the whole track.
    ///
    /// Pure bookkeeping; stored times and text are untouched.
    pub fn renumber(&mut self) {
        for (position, entry) in self.entries.iter_mut().enumerate() {
            entry.index = position as u64 + 1;
        }
    }
}
