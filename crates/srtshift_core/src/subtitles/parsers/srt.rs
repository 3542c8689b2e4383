//! SRT subtitle parser.
//!
//! Parses SubRip (.srt) subtitle content.
//!
//! # Format Overview
//!
//! SRT files consist of sequential blocks:
//! ```text
//! 1
//! 00:00:01,000 --> 00:00:04,000
//! Hello, world!
//!
//! 2
//! 00:00:05,000 --> 00:00:08,000
//! This is a test.
//! ```
//!
//! Each block has an index line, a timing line `start --> end`, one or more
//! text lines, and a blank separator line.
//!
//! # Recovery policy
//!
//! Parsing is best-effort and never aborts partway through a file. Malformed
//! index lines are skipped, unparseable times invalidate only their own
//! block, and a block boundary reached before index/start/end are all valid
//! discards the pending block. A structurally bad file yields fewer entries
//! than expected, not an error. Skipped input is reported at debug level.

use tracing::debug;

use crate::subtitles::error::ParseError;
use crate::subtitles::types::{SubtitleEntry, SubtitleTrack};
use crate::timecode::Timecode;

/// Marker separating start and end on a timing line.
const TIME_RANGE_MARKER: &str = "-->";

/// Line-oriented scan state.
enum ScanState {
    /// Outside any block, waiting for an entry-number line.
    AwaitingIndex,
    /// Accumulating the block that started with `index`.
    InBlock(Pending),
}

/// Accumulator for the block currently being read.
struct Pending {
    index: u64,
    start: Option<Timecode>,
    end: Option<Timecode>,
    text_lines: Vec<String>,
}

impl Pending {
    fn new(index: u64) -> Self {
        Self {
            index,
            start: None,
            end: None,
            text_lines: Vec::new(),
        }
    }

    /// Commit the block if both times parsed. `require_text` applies the
    /// stricter end-of-stream rule.
    fn commit(self, require_text: bool, line: usize, track: &mut SubtitleTrack) {
        match (self.start, self.end) {
            (Some(start), Some(end)) if !(require_text && self.text_lines.is_empty()) => {
                track.push(SubtitleEntry::new(self.index, start, end, self.text_lines));
            }
            _ => {
                debug!(diagnostic = %ParseError::IncompleteBlock { line }, "discarding block");
            }
        }
    }
}

/// Parse SRT content into a [`SubtitleTrack`].
///
/// Never fails: see the module-level recovery policy.
pub fn parse_srt(content: &str) -> SubtitleTrack {
    let mut track = SubtitleTrack::new();
    let mut state = ScanState::AwaitingIndex;
    let mut last_line = 0;

    for (number, raw) in content.lines().enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        last_line = number + 1;

        state = match state {
            ScanState::AwaitingIndex => scan_index_line(line, last_line),
            ScanState::InBlock(pending) => {
                scan_block_line(line, last_line, pending, &mut track)
            }
        };
    }

    // Files without a trailing blank line still commit their final block,
    // but only when it carries text.
    if let ScanState::InBlock(pending) = state {
        pending.commit(true, last_line, &mut track);
    }

    debug!(entries = track.len(), "parsed srt content");
    track
}

/// One line in the AwaitingIndex state.
fn scan_index_line(line: &str, number: usize) -> ScanState {
    if line.is_empty() {
        return ScanState::AwaitingIndex;
    }
    match line.trim().parse::<u64>() {
        Ok(index) => ScanState::InBlock(Pending::new(index)),
        Err(_) => {
            let diagnostic = ParseError::MalformedIndexLine {
                line: number,
                value: line.to_string(),
            };
            debug!(%diagnostic, "skipping line");
            ScanState::AwaitingIndex
        }
    }
}

/// One line in the InBlock state.
fn scan_block_line(
    line: &str,
    number: usize,
    mut pending: Pending,
    track: &mut SubtitleTrack,
) -> ScanState {
    if line.is_empty() {
        pending.commit(false, number, track);
        return ScanState::AwaitingIndex;
    }

    if let Some(marker) = line.find(TIME_RANGE_MARKER) {
        let start_text = &line[..marker];
        let end_text = &line[marker + TIME_RANGE_MARKER.len()..];
        pending.start = parse_time_field(start_text, number);
        pending.end = parse_time_field(end_text, number);
    } else {
        pending.text_lines.push(line.to_string());
    }

    ScanState::InBlock(pending)
}

/// Parse one side of a timing line; a failure invalidates only that side.
fn parse_time_field(text: &str, number: usize) -> Option<Timecode> {
    match Timecode::parse(text) {
        Ok(tc) => Some(tc),
        Err(source) => {
            let diagnostic = ParseError::MalformedTimecode {
                line: number,
                source,
            };
            debug!(%diagnostic, "time field unusable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_srt() {
        let content = "1\n00:00:01,000 --> 00:00:04,000\nHello, world!\n\n2\n00:00:05,000 --> 00:00:08,000\nThis is a test.\nWith multiple lines.\n\n";

        let track = parse_srt(content);

        assert_eq!(track.len(), 2);

        let first = track.entry(0).unwrap();
        assert_eq!(first.index, 1);
        assert_eq!(first.start.to_millis(), 1_000);
        assert_eq!(first.end.to_millis(), 4_000);
        assert_eq!(first.text(), "Hello, world!");

        let second = track.entry(1).unwrap();
        assert_eq!(second.text(), "This is a test.\nWith multiple lines.");
    }

    #[test]
    fn parse_preserves_stored_indices() {
        let content = "7\n00:01:02,500 --> 00:01:05,000\nHello world\n\n";

        let track = parse_srt(content);

        assert_eq!(track.len(), 1);
        assert_eq!(track.entry(0).unwrap().index, 7);
    }

    #[test]
    fn missing_trailing_blank_line_still_commits() {
        let content = "1\n00:00:01,000 --> 00:00:02,000\nNo trailing blank";

        let track = parse_srt(content);

        assert_eq!(track.len(), 1);
        assert_eq!(track.entry(0).unwrap().text(), "No trailing blank");
    }

    #[test]
    fn final_block_without_text_is_dropped() {
        // The end-of-stream commit requires at least one text line.
        let content = "1\n00:00:01,000 --> 00:00:02,000";

        let track = parse_srt(content);

        assert!(track.is_empty());
    }

    #[test]
    fn malformed_block_between_well_formed_blocks() {
        let content = "1\n00:00:01,000 --> 00:00:02,000\nFirst\n\n2\nbogus --> times\nDropped\n\n3\n00:00:05,000 --> 00:00:06,000\nThird\n\n";

        let track = parse_srt(content);

        assert_eq!(track.len(), 2);
        assert_eq!(track.entry(0).unwrap().text(), "First");
        assert_eq!(track.entry(1).unwrap().text(), "Third");
    }

    #[test]
    fn non_integer_index_lines_are_skipped() {
        // Stray prose between blocks is ignored until the next number line.
        let content = "garbage header\n\n1\n00:00:01,000 --> 00:00:02,000\nKept\n\n";

        let track = parse_srt(content);

        assert_eq!(track.len(), 1);
        assert_eq!(track.entry(0).unwrap().text(), "Kept");
    }

    #[test]
    fn block_missing_timing_line_is_discarded() {
        let content = "1\nJust text, no timing\n\n2\n00:00:03,000 --> 00:00:04,000\nKept\n\n";

        let track = parse_srt(content);

        assert_eq!(track.len(), 1);
        assert_eq!(track.entry(0).unwrap().index, 2);
    }

    #[test]
    fn crlf_line_endings() {
        let content = "1\r\n00:00:01,000 --> 00:00:02,000\r\nWindows line endings\r\n\r\n";

        let track = parse_srt(content);

        assert_eq!(track.len(), 1);
        assert_eq!(track.entry(0).unwrap().text(), "Windows line endings");
    }

    #[test]
    fn timing_line_without_spaces_around_marker() {
        let content = "1\n00:00:01,000-->00:00:02,000\nTight marker\n\n";

        let track = parse_srt(content);

        assert_eq!(track.len(), 1);
        assert_eq!(track.entry(0).unwrap().start.to_millis(), 1_000);
    }

    #[test]
    fn later_timing_line_wins_within_block() {
        let content =
            "1\n00:00:01,000 --> 00:00:02,000\n00:00:09,000 --> 00:00:10,000\nText\n\n";

        let track = parse_srt(content);

        assert_eq!(track.len(), 1);
        assert_eq!(track.entry(0).unwrap().start.to_millis(), 9_000);
    }

    #[test]
    fn empty_content_yields_empty_track() {
        assert!(parse_srt("").is_empty());
        assert!(parse_srt("\n\n\n").is_empty());
    }
}
