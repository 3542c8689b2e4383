//! Edit session.
//!
//! One session exclusively owns one subtitle track plus the offset
//! projection over it. Everything is single-threaded and synchronous -
//! every operation here is safe to call straight from an event handler.
//!
//! The session performs no path selection and no settings persistence of
//! its own: paths come from the caller, and the recent-files history is an
//! explicit configuration object handed in at construction and read back at
//! teardown.

mod backup;

pub use backup::{BackupPolicy, NoBackup, RenameBackup};

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::HistorySettings;
use crate::projection::{AdjustModel, OffsetProjection};
use crate::subtitles::{self, SubtitleError, SubtitleTrack};
use crate::timecode::{TimeOffset, Timecode};

/// Session controller over one loaded subtitle file.
#[derive(Debug, Default)]
pub struct EditSession {
    track: SubtitleTrack,
    projection: OffsetProjection,
    source_path: Option<PathBuf>,
    history: HistorySettings,
}

impl EditSession {
    /// Create a session seeded with the persisted recent-files history.
    pub fn new(history: HistorySettings) -> Self {
        Self {
            history,
            ..Default::default()
        }
    }

    /// Load an SRT file, replacing the whole track.
    ///
    /// The current offset deliberately survives a load - it belongs to the
    /// controls, not the file. Returns the number of entries parsed.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<usize, SubtitleError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SubtitleError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(SubtitleError::NotAFile(path.to_path_buf()));
        }

        let track = subtitles::parse_file(path)?;

        self.track = track;
        self.source_path = Some(path.to_path_buf());
        self.history.remember(path);

        Ok(self.track.len())
    }

    /// Save the track with the current offset baked into the written times.
    ///
    /// `backup` must relocate any pre-existing file at `path` first; if it
    /// fails the save aborts before anything is written. Stored times are
    /// untouched either way.
    pub fn save(
        &mut self,
        path: impl AsRef<Path>,
        backup: &dyn BackupPolicy,
    ) -> Result<(), SubtitleError> {
        let path = path.as_ref();

        backup
            .backup(path)
            .map_err(|e| SubtitleError::backup(path.to_path_buf(), e))?;

        subtitles::write_file(&self.track, path, self.projection.offset())?;
        self.history.remember(path);
        Ok(())
    }

    /// The loaded track.
    pub fn track(&self) -> &SubtitleTrack {
        &self.track
    }

    /// The projection all display cells read through.
    pub fn projection(&self) -> &OffsetProjection {
        &self.projection
    }

    /// Path of the currently loaded file, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Replace the offset from the magnitude/direction controls.
    pub fn set_offset(&mut self, magnitude_ms: u64, add: bool) {
        self.projection.set_offset(magnitude_ms, add);
        info!(offset_ms = self.projection.offset().signed_ms(), "offset changed");
    }

    pub fn offset(&self) -> TimeOffset {
        self.projection.offset()
    }

    /// Reassign entry numbers by position.
    pub fn renumber(&mut self) {
        self.track.renumber();
    }

    /// Seed the modal adjust dialog from the entry at `position`.
    ///
    /// The entry's stored start is the anchor; the entry itself is never
    /// mutated by the flow.
    pub fn adjust_from_entry(&self, position: usize) -> Result<AdjustModel, SubtitleError> {
        let anchor = self.track.entry(position)?;
        Ok(AdjustModel::new(anchor.start, self.projection.offset()))
    }

    /// Apply the pair an accepted adjust dialog returned.
    pub fn apply_adjustment(&mut self, model: &AdjustModel) {
        let offset = model.accepted();
        self.set_offset(offset.magnitude_ms, offset.add);
    }

    /// Derive the global offset so the entry at `position` displays
    /// `desired` as its start time.
    ///
    /// This is the anchor-entry flow run non-interactively: the dialog
    /// protocol reconciles the result-time edit, and the accepted pair
    /// replaces the offset.
    pub fn align_entry(
        &mut self,
        position: usize,
        desired: Timecode,
    ) -> Result<(), SubtitleError> {
        let model = self.adjust_from_entry(position)?;
        model.set_result_time(desired);
        self.apply_adjustment(&model);
        Ok(())
    }

    /// Hand the (possibly updated) recent-files history back for
    /// persistence at teardown.
    pub fn into_history(self) -> HistorySettings {
        self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io;
    use tempfile::tempdir;

    const SAMPLE: &str = "7\n00:01:02,500 --> 00:01:05,000\nHello world\n\n";

    /// Policy that always refuses, for exercising the hard-abort path.
    struct FailingBackup;

    impl BackupPolicy for FailingBackup {
        fn backup(&self, _path: &Path) -> io::Result<Option<PathBuf>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "refused"))
        }
    }

    fn session_with_sample(dir: &Path) -> EditSession {
        let input = dir.join("input.srt");
        fs::write(&input, SAMPLE).unwrap();

        let mut session = EditSession::new(HistorySettings::default());
        session.load(&input).unwrap();
        session
    }

    #[test]
    fn load_rejects_missing_and_non_file_paths() {
        let dir = tempdir().unwrap();
        let mut session = EditSession::new(HistorySettings::default());

        assert!(matches!(
            session.load(dir.path().join("absent.srt")),
            Err(SubtitleError::NotFound(_))
        ));
        assert!(matches!(
            session.load(dir.path()),
            Err(SubtitleError::NotAFile(_))
        ));
    }

    #[test]
    fn offset_survives_a_load() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.srt");
        fs::write(&input, SAMPLE).unwrap();

        let mut session = EditSession::new(HistorySettings::default());
        session.set_offset(2_000, true);
        session.load(&input).unwrap();

        assert_eq!(session.offset(), TimeOffset::new(2_000, true));
        assert_eq!(
            session
                .projection()
                .displayed_start(session.track(), 0)
                .unwrap()
                .to_string(),
            "00:01:04,500"
        );
    }

    #[test]
    fn save_bakes_offset_and_keeps_stored_times() {
        let dir = tempdir().unwrap();
        let mut session = session_with_sample(dir.path());
        session.set_offset(2_000, true);

        let output = dir.path().join("output.srt");
        session.save(&output, &RenameBackup).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "7\n00:01:04,500 --> 00:01:07,000\nHello world\n\n"
        );
        // In-memory stored start is still the loaded one.
        assert_eq!(
            session.track().entry(0).unwrap().start.to_string(),
            "00:01:02,500"
        );
    }

    #[test]
    fn save_backs_up_existing_destination_first() {
        let dir = tempdir().unwrap();
        let mut session = session_with_sample(dir.path());

        let output = dir.path().join("output.srt");
        fs::write(&output, "previous contents").unwrap();
        session.save(&output, &RenameBackup).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("output.srt.bak")).unwrap(),
            "previous contents"
        );
        assert_eq!(fs::read_to_string(&output).unwrap(), SAMPLE);
    }

    #[test]
    fn backup_failure_aborts_before_any_write() {
        let dir = tempdir().unwrap();
        let mut session = session_with_sample(dir.path());

        let output = dir.path().join("output.srt");
        fs::write(&output, "must survive").unwrap();
        let result = session.save(&output, &FailingBackup);

        assert!(matches!(result, Err(SubtitleError::BackupFailed { .. })));
        assert_eq!(fs::read_to_string(&output).unwrap(), "must survive");
    }

    #[test]
    fn align_entry_drives_offset_from_anchor() {
        let dir = tempdir().unwrap();
        let mut session = session_with_sample(dir.path());

        session
            .align_entry(0, Timecode::parse("00:01:00,500").unwrap())
            .unwrap();

        assert_eq!(session.offset(), TimeOffset::new(2_000, false));
        assert!(matches!(
            session.align_entry(3, Timecode::default()),
            Err(SubtitleError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn adjust_dialog_round_trip() {
        let dir = tempdir().unwrap();
        let mut session = session_with_sample(dir.path());
        session.set_offset(1_000, true);

        let model = session.adjust_from_entry(0).unwrap();
        assert_eq!(model.result_time().to_string(), "00:01:03,500");

        model.set_result_time(Timecode::parse("00:01:07,500").unwrap());
        session.apply_adjustment(&model);

        assert_eq!(session.offset(), TimeOffset::new(5_000, true));
    }

    #[test]
    fn history_records_loads_and_saves() {
        let dir = tempdir().unwrap();
        let mut session = session_with_sample(dir.path());

        let output = dir.path().join("output.srt");
        session.save(&output, &RenameBackup).unwrap();

        let history = session.into_history();
        let recent = history.recent();
        assert_eq!(recent[0], output.display().to_string());
        assert_eq!(recent[1], dir.path().join("input.srt").display().to_string());
    }
}
