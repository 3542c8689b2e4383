//! Modal adjust-dialog protocol.
//!
//! Holds one fixed base time and two mutually-derived fields: the offset and
//! the result time (`base + offset`). Editing either field recomputes the
//! other:
//!
//! - offset edited -> result time recomputed by direct application;
//! - result time edited -> offset recomputed via the derive rule.
//!
//! A naive bidirectional binding loops: updating the counterpart field
//! notifies its binding, which writes back, which updates the first field
//! again. Each recompute therefore engages a reentrancy guard before
//! touching the counterpart; a setter that finds the guard engaged drops the
//! edit (it is the echo of our own write, not user input). The guard is
//! scoped so it releases on every exit path.
//!
//! Setters take `&self` so a dialog shell can hand bindings plain shared
//! references; everything is single-threaded interior mutability.

use std::cell::Cell;

use crate::timecode::{TimeOffset, Timecode};

/// Scoped reentrancy guard over a shared flag.
///
/// Engaging fails while another guard holds the flag; dropping releases it.
struct RecomputeGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> RecomputeGuard<'a> {
    fn engage(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.get() {
            return None;
        }
        flag.set(true);
        Some(Self { flag })
    }
}

impl Drop for RecomputeGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// State behind the adjust dialog.
///
/// Used standalone and from the anchor-entry flow: the caller seeds it with
/// an entry's stored start time and the current offset, lets the user edit
/// either derived field, and applies [`AdjustModel::accepted`] on OK.
#[derive(Debug)]
pub struct AdjustModel {
    base_time: Timecode,
    offset: Cell<TimeOffset>,
    result_time: Cell<Timecode>,
    recomputing: Cell<bool>,
}

impl AdjustModel {
    /// Seed with the fixed base time and the current offset; the result
    /// field starts as the projected view of the base.
    pub fn new(base_time: Timecode, offset: TimeOffset) -> Self {
        Self {
            base_time,
            offset: Cell::new(offset),
            result_time: Cell::new(base_time.with_offset(offset)),
            recomputing: Cell::new(false),
        }
    }

    /// The anchor time the dialog reconciles against. Never changes.
    pub fn base_time(&self) -> Timecode {
        self.base_time
    }

    pub fn offset(&self) -> TimeOffset {
        self.offset.get()
    }

    pub fn result_time(&self) -> Timecode {
        self.result_time.get()
    }

    /// Offset controls edited: recompute the result time.
    ///
    /// Dropped silently when it arrives as the echo of a recompute already
    /// in progress.
    pub fn set_offset(&self, magnitude_ms: u64, add: bool) {
        let Some(_guard) = RecomputeGuard::engage(&self.recomputing) else {
            return;
        };
        let offset = TimeOffset::new(magnitude_ms, add);
        self.offset.set(offset);
        self.result_time.set(self.base_time.with_offset(offset));
    }

    /// Result time edited: derive the offset backward.
    ///
    /// The direction flag follows the sign of the delta; the magnitude is
    /// its absolute value. Echoes are dropped like in [`Self::set_offset`].
    pub fn set_result_time(&self, desired: Timecode) {
        let Some(_guard) = RecomputeGuard::engage(&self.recomputing) else {
            return;
        };
        self.result_time.set(desired);
        self.offset
            .set(TimeOffset::between(self.base_time, desired));
    }

    /// The final pair the dialog returns on acceptance.
    pub fn accepted(&self) -> TimeOffset {
        self.offset.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Timecode {
        Timecode::parse("00:01:02,500").unwrap()
    }

    #[test]
    fn seeding_projects_the_base_time() {
        let model = AdjustModel::new(base(), TimeOffset::new(2_000, true));

        assert_eq!(model.result_time().to_string(), "00:01:04,500");
        assert_eq!(model.base_time().to_string(), "00:01:02,500");
    }

    #[test]
    fn editing_offset_recomputes_result() {
        let model = AdjustModel::new(base(), TimeOffset::default());

        model.set_offset(1_500, false);

        assert_eq!(model.result_time().to_string(), "00:01:01,000");
        assert_eq!(model.offset(), TimeOffset::new(1_500, false));
    }

    #[test]
    fn editing_result_derives_offset() {
        let model = AdjustModel::new(base(), TimeOffset::default());

        model.set_result_time(Timecode::parse("00:01:00,000").unwrap());

        assert_eq!(model.offset(), TimeOffset::new(2_500, false));
        assert_eq!(model.result_time().to_string(), "00:01:00,000");

        model.set_result_time(Timecode::parse("00:01:05,000").unwrap());

        assert_eq!(model.offset(), TimeOffset::new(2_500, true));
    }

    #[test]
    fn mutual_recompute_does_not_drift() {
        let model = AdjustModel::new(base(), TimeOffset::default());

        model.set_offset(2_000, true);
        let result = model.result_time();
        let offset = model.offset();

        // Reading both fields and echoing the result back must leave the
        // offset exactly as set.
        model.set_result_time(result);
        assert_eq!(model.offset(), offset);
        assert_eq!(model.result_time(), result);
    }

    #[test]
    fn reentrant_edit_is_suppressed() {
        let model = AdjustModel::new(base(), TimeOffset::default());

        // Simulate a binding echoing mid-recompute: engage the guard as a
        // recompute would, then feed edits through the public setters.
        model.recomputing.set(true);
        model.set_offset(9_000, true);
        model.set_result_time(Timecode::parse("00:09:09,000").unwrap());
        model.recomputing.set(false);

        assert_eq!(model.offset(), TimeOffset::default());
        assert_eq!(model.result_time(), base());
    }

    #[test]
    fn accepted_returns_the_final_pair() {
        let model = AdjustModel::new(base(), TimeOffset::new(500, true));

        model.set_result_time(Timecode::parse("00:01:02,000").unwrap());

        assert_eq!(model.accepted(), TimeOffset::new(500, false));
    }
}
