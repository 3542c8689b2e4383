//! SRT subtitle writer.
//!
//! Serializes a [`SubtitleTrack`] with the current offset baked into the
//! emitted start/end times. The offset is applied at serialization time
//! only - the track's stored times are never mutated by a save. Re-loading
//! a saved file with a zero offset therefore displays the same times the
//! offset view showed before saving.

use std::fmt::Write as _;

use crate::subtitles::types::SubtitleTrack;
use crate::timecode::TimeOffset;

/// Write a track to SRT format.
///
/// Each entry emits its stored index, the offset-shifted timing line, the
/// caption lines, and one blank separator line - including after the final
/// entry, matching the block grammar the parser reads back.
pub fn write_srt(track: &SubtitleTrack, offset: TimeOffset) -> String {
    let mut output = String::new();

    for entry in track.entries() {
        let start = entry.start.with_offset(offset);
        let end = entry.end.with_offset(offset);

        let _ = writeln!(output, "{}", entry.index);
        let _ = writeln!(output, "{start} --> {end}");
        for line in &entry.text_lines {
            let _ = writeln!(output, "{line}");
        }
        output.push('\n');
    }

    output
}
