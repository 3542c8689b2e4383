//! Offset projection.
//!
//! A read-through view over a [`SubtitleTrack`] that reports every start and
//! end time shifted by the current offset. The projection owns only the
//! offset; it reads the track it is handed and never copies or mutates a
//! stored time. Each projected cell is recomputed on demand in O(1), so
//! replacing the offset is invalidate-and-redraw for the caller - there is
//! no per-cell cache to diff.
//!
//! Two independent edit entry points drive the offset:
//! - the direct controls (magnitude + add/subtract toggle), and
//! - an edited *displayed* time, which derives the offset backward from an
//!   anchor entry's stored time.
//!
//! The mutual-recompute discipline between those two lives in [`adjust`].

pub mod adjust;

pub use adjust::AdjustModel;

use crate::subtitles::{SubtitleEntry, SubtitleError, SubtitleTrack};
use crate::timecode::{TimeOffset, Timecode};

/// Display column of the subtitle table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Index,
    StartTime,
    EndTime,
    Text,
}

/// Read-through offset view over a subtitle track.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetProjection {
    offset: TimeOffset,
}

impl OffsetProjection {
    pub fn new(offset: TimeOffset) -> Self {
        Self { offset }
    }

    /// The offset currently applied to every displayed time.
    pub fn offset(&self) -> TimeOffset {
        self.offset
    }

    /// Replace the offset from the magnitude/direction controls.
    pub fn set_offset(&mut self, magnitude_ms: u64, add: bool) {
        self.offset = TimeOffset::new(magnitude_ms, add);
    }

    /// Replace the offset by working backward from an edited displayed time.
    ///
    /// `anchor_original` is the anchor entry's stored start time;
    /// `desired_displayed` is the value the user typed into the displayed
    /// cell. The new offset is whatever maps the former onto the latter.
    pub fn set_offset_from_result_time(
        &mut self,
        anchor_original: Timecode,
        desired_displayed: Timecode,
    ) {
        self.offset = TimeOffset::between(anchor_original, desired_displayed);
    }

    /// Projected start time of the entry at `position`.
    pub fn displayed_start(
        &self,
        track: &SubtitleTrack,
        position: usize,
    ) -> Result<Timecode, SubtitleError> {
        Ok(track.entry(position)?.start.with_offset(self.offset))
    }

    /// Projected end time of the entry at `position`.
    pub fn displayed_end(
        &self,
        track: &SubtitleTrack,
        position: usize,
    ) -> Result<Timecode, SubtitleError> {
        Ok(track.entry(position)?.end.with_offset(self.offset))
    }

    /// Display text for one cell, keyed on column kind.
    ///
    /// Pure formatting, independent of any widget model: time columns show
    /// the offset view, the others show stored data.
    pub fn projected_value(&self, entry: &SubtitleEntry, column: Column) -> String {
        match column {
            Column::Index => entry.index.to_string(),
            Column::StartTime => entry.start.with_offset(self.offset).to_string(),
            Column::EndTime => entry.end.with_offset(self.offset).to_string(),
            Column::Text => entry.text(),
        }
    }
}
