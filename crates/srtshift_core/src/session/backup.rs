//! Backup-before-write collaborator.
//!
//! A save must relocate any pre-existing file at the destination before the
//! first byte is written; if that fails the save aborts with no partial
//! write. The trait is the seam - the session only cares that the
//! destination is safe to overwrite afterwards.

use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

/// How many numbered backup slots to probe before giving up.
const MAX_BACKUP_SLOTS: u32 = 9_999;

/// Relocates a pre-existing destination file ahead of an overwrite.
pub trait BackupPolicy {
    /// Move whatever sits at `path` out of the way.
    ///
    /// Returns the location the old file went to, or `None` when nothing
    /// existed. Any error means the save must not proceed.
    fn backup(&self, path: &Path) -> io::Result<Option<PathBuf>>;
}

/// Renames the existing file aside: `name.srt.bak`, then `name.srt.bak1`,
/// `name.srt.bak2`, ... - first free slot wins.
#[derive(Debug, Default)]
pub struct RenameBackup;

impl BackupPolicy for RenameBackup {
    fn backup(&self, path: &Path) -> io::Result<Option<PathBuf>> {
        if !path.exists() {
            return Ok(None);
        }

        let destination = free_backup_slot(path)?;
        std::fs::rename(path, &destination)?;
        info!(from = %path.display(), to = %destination.display(), "backed up existing file");
        Ok(Some(destination))
    }
}

/// No-op policy for callers that explicitly opt out of backups.
#[derive(Debug, Default)]
pub struct NoBackup;

impl BackupPolicy for NoBackup {
    fn backup(&self, _path: &Path) -> io::Result<Option<PathBuf>> {
        Ok(None)
    }
}

/// First `.bak`/`.bakN` sibling that does not exist yet.
fn free_backup_slot(path: &Path) -> io::Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;

    for slot in 0..=MAX_BACKUP_SLOTS {
        let mut candidate = file_name.to_os_string();
        if slot == 0 {
            candidate.push(".bak");
        } else {
            candidate.push(format!(".bak{slot}"));
        }
        let candidate = path.with_file_name(candidate);
        if !candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        "all backup slots taken",
    ))
}
