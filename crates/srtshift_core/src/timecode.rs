//! Timecode codec.
//!
//! Converts between a wall-clock timecode (hours, minutes, seconds,
//! milliseconds) and both its canonical SRT text form `HH:MM:SS,mmm` and a
//! millisecond count since midnight. All conversions are exact - no rounding
//! anywhere.
//!
//! Offsets are carried as an unsigned magnitude plus a direction flag rather
//! than a signed integer, because the UI exposes direction as a separate
//! add/subtract toggle.

use std::fmt;

/// Milliseconds in a full day; timecodes stay below this.
const MS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// Error for an unparseable timecode string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed timecode: '{0}'")]
pub struct MalformedTimecode(pub String);

/// A wall-clock subtitle timestamp.
///
/// Always non-negative. Round-trips losslessly through both the text form
/// and the millisecond form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timecode {
    /// Hours (0-23).
    pub hours: u32,
    /// Minutes (0-59).
    pub minutes: u32,
    /// Seconds (0-59).
    pub seconds: u32,
    /// Milliseconds (0-999).
    pub millis: u32,
}

impl Timecode {
    /// Parse an SRT timestamp: `HH:MM:SS,mmm`.
    ///
    /// The hour field may be any width; minutes, seconds, and milliseconds
    /// are validated against their wall-clock ranges. Fields tolerate
    /// surrounding whitespace. Any missing separator or non-numeric field
    /// fails with [`MalformedTimecode`].
    pub fn parse(s: &str) -> Result<Self, MalformedTimecode> {
        let fail = || MalformedTimecode(s.trim().to_string());

        let (hours_str, rest) = s.split_once(':').ok_or_else(fail)?;
        let (minutes_str, rest) = rest.split_once(':').ok_or_else(fail)?;
        let (seconds_str, millis_str) = rest.split_once(',').ok_or_else(fail)?;

        let hours: u32 = hours_str.trim().parse().map_err(|_| fail())?;
        let minutes: u32 = minutes_str.trim().parse().map_err(|_| fail())?;
        let seconds: u32 = seconds_str.trim().parse().map_err(|_| fail())?;
        let millis: u32 = millis_str.trim().parse().map_err(|_| fail())?;

        if hours > 23 || minutes > 59 || seconds > 59 || millis > 999 {
            return Err(fail());
        }

        Ok(Self {
            hours,
            minutes,
            seconds,
            millis,
        })
    }

    /// Milliseconds since midnight.
    pub fn to_millis(self) -> u64 {
        u64::from(self.hours) * 3_600_000
            + u64::from(self.minutes) * 60_000
            + u64::from(self.seconds) * 1_000
            + u64::from(self.millis)
    }

    /// Build a timecode from milliseconds since midnight.
    ///
    /// Values past the end of the day saturate at `23:59:59,999` rather than
    /// wrapping.
    pub fn from_millis(ms: u64) -> Self {
        let ms = ms.min(MS_PER_DAY - 1);

        let millis = (ms % 1_000) as u32;
        let total_secs = ms / 1_000;
        let seconds = (total_secs % 60) as u32;
        let total_mins = total_secs / 60;
        let minutes = (total_mins % 60) as u32;
        let hours = (total_mins / 60) as u32;

        Self {
            hours,
            minutes,
            seconds,
            millis,
        }
    }

    /// This timecode shifted by `offset`.
    ///
    /// The stored value is untouched; a shifted copy is returned. Results
    /// clamp at `00:00:00,000` when the offset would drive them negative,
    /// and saturate at the end of the day - never wrap.
    pub fn with_offset(self, offset: TimeOffset) -> Self {
        let ms = self.to_millis();
        let shifted = if offset.add {
            ms.saturating_add(offset.magnitude_ms)
        } else {
            ms.saturating_sub(offset.magnitude_ms)
        };
        Self::from_millis(shifted)
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

/// A uniform time delta: unsigned magnitude plus add/subtract direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeOffset {
    /// Magnitude of the shift in milliseconds.
    pub magnitude_ms: u64,
    /// Direction: `true` adds the magnitude, `false` subtracts it.
    pub add: bool,
}

impl TimeOffset {
    pub fn new(magnitude_ms: u64, add: bool) -> Self {
        Self { magnitude_ms, add }
    }

    /// The offset that maps `original` onto `desired`.
    ///
    /// A zero delta counts as additive, matching the UI's add-by-default
    /// toggle.
    pub fn between(original: Timecode, desired: Timecode) -> Self {
        let delta = desired.to_millis() as i64 - original.to_millis() as i64;
        Self {
            magnitude_ms: delta.unsigned_abs(),
            add: delta >= 0,
        }
    }

    /// Effective signed delta in milliseconds.
    pub fn signed_ms(self) -> i64 {
        let magnitude = self.magnitude_ms.min(i64::MAX as u64) as i64;
        if self.add {
            magnitude
        } else {
            -magnitude
        }
    }
}
