//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level
//! updates.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Recent-files history.
    #[serde(default)]
    pub history: HistorySettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Recent-files history: deduplicated, most recent first, bounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Previously opened/saved files, most recent first.
    #[serde(default)]
    pub recent_files: Vec<String>,

    /// Cap on the list length.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_max_entries() -> usize {
    10
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            recent_files: Vec::new(),
            max_entries: default_max_entries(),
        }
    }
}

impl HistorySettings {
    /// Record a use of `path`: moved (or inserted) at the front, duplicates
    /// and empty entries dropped, list truncated to the cap.
    pub fn remember(&mut self, path: impl AsRef<Path>) {
        let entry = path.as_ref().display().to_string();
        if entry.is_empty() {
            return;
        }

        self.recent_files.retain(|p| *p != entry && !p.is_empty());
        self.recent_files.insert(0, entry);
        self.recent_files.truncate(self.max_entries.max(1));
    }

    /// The history, most recent first.
    pub fn recent(&self) -> &[String] {
        &self.recent_files
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when RUST_LOG is not set.
    #[serde(default)]
    pub level: LogLevel,
}

/// Identifies one TOML table for section-level updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    History,
    Logging,
}

impl ConfigSection {
    /// The TOML table name this section serializes under.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::History => "history",
            Self::Logging => "logging",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remember_inserts_most_recent_first() {
        let mut history = HistorySettings::default();

        history.remember("a.srt");
        history.remember("b.srt");

        assert_eq!(history.recent(), ["b.srt", "a.srt"]);
    }

    #[test]
    fn remember_deduplicates() {
        let mut history = HistorySettings::default();

        history.remember("a.srt");
        history.remember("b.srt");
        history.remember("a.srt");

        assert_eq!(history.recent(), ["a.srt", "b.srt"]);
    }

    #[test]
    fn remember_respects_the_cap() {
        let mut history = HistorySettings {
            max_entries: 2,
            ..Default::default()
        };

        history.remember("a.srt");
        history.remember("b.srt");
        history.remember("c.srt");

        assert_eq!(history.recent(), ["c.srt", "b.srt"]);
    }

    #[test]
    fn empty_entries_are_dropped() {
        let mut history = HistorySettings {
            recent_files: vec![String::new(), "a.srt".to_string()],
            ..Default::default()
        };

        history.remember("b.srt");

        assert_eq!(history.recent(), ["b.srt", "a.srt"]);
    }
}
