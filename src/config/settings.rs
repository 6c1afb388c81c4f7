//! Query settings file (`KEY="value"` per line).
//!
//! Shared with the query scripts, so the format is deliberately plain:
//! blank lines and `#` comments are skipped, the first `=` splits key from
//! value, and surrounding double quotes are stripped. Unknown keys are
//! ignored on load and dropped on save.

use crate::model::StoreError;
use crate::store::atomic::write_atomic;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file exists but could not be read.
    #[error("Failed to read settings at {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The atomic rewrite failed.
    #[error("Failed to save settings: {0}")]
    Write(#[from] StoreError),
}

/// Values consumed by the flare query and shown in the summary panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuerySettings {
    /// Comma list of wavelength codes (`WAVE`).
    pub wave: String,
    /// Range start, `YYYY-MM-DD` (`START`).
    pub start: String,
    /// Range end, `YYYY-MM-DD` (`END`).
    pub end: String,
    /// Archive source (`SOURCE`).
    pub source: String,
    /// Class threshold such as `M1.0`, or `Any` (`FLARE_CLASS`).
    pub flare_class: String,
    /// Comparator value such as `>=` (`COMPARATOR`).
    pub comparator: String,
    /// Contact address for archive requests (`DL_EMAIL`).
    pub dl_email: String,
}

impl QuerySettings {
    /// Parse settings text. Never fails; malformed lines are skipped.
    pub fn parse(text: &str) -> Self {
        let mut settings = Self::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim_matches('"').to_string();
            match key.trim() {
                "WAVE" => settings.wave = value,
                "START" => settings.start = value,
                "END" => settings.end = value,
                "SOURCE" => settings.source = value,
                "FLARE_CLASS" => settings.flare_class = value,
                "COMPARATOR" => settings.comparator = value,
                "DL_EMAIL" => settings.dl_email = value,
                _ => {}
            }
        }
        settings
    }

    /// Render in the on-disk format, one quoted value per known key.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in [
            ("WAVE", &self.wave),
            ("START", &self.start),
            ("END", &self.end),
            ("SOURCE", &self.source),
            ("FLARE_CLASS", &self.flare_class),
            ("COMPARATOR", &self.comparator),
            ("DL_EMAIL", &self.dl_email),
        ] {
            let _ = writeln!(out, "{key}=\"{value}\"");
        }
        out
    }
}

/// The settings file on disk.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Settings backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings. A missing file yields empty settings.
    pub fn load(&self) -> Result<QuerySettings, SettingsError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(QuerySettings::parse(&text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(QuerySettings::default()),
            Err(source) => Err(SettingsError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Atomically replace the settings file.
    pub fn save(&self, settings: &QuerySettings) -> Result<(), SettingsError> {
        write_atomic(&self.path, &settings.render())?;
        info!(path = %self.path.display(), "Saved query settings");
        Ok(())
    }
}
