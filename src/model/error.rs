//! Error types for flarecat.
//!
//! Every variant here is recoverable. The controller turns them into a
//! transient notice; only terminal I/O failures (see `view::TuiError`)
//! end the process.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Aggregate surfaced by the controller as a notice
//!   - [`StoreError`] - Cache file missing, headerless, or failed I/O
//!   - [`QueryError`] - External flare query could not run or failed
//!   - [`ValidationError`] - Settings rejected before a guarded transition
//!   - [`SettingsError`] - Query settings file could not be written

use crate::config::settings::SettingsError;
use std::path::PathBuf;
use thiserror::Error;

/// Aggregate of every recoverable failure.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cache read or write failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Flare query failed.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Input rejected by a guard.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Query settings could not be persisted.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Failures of the tab-separated cache file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The cache file does not exist.
    #[error("cache not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The cache file has no header line.
    #[error("cache is empty: {path}")]
    Empty {
        /// Path of the empty file.
        path: PathBuf,
    },

    /// Read, write, or rename failed.
    #[error("{path}: {source}")]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures of the external flare query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The query program could not be started.
    #[error("could not start {program}: {source}")]
    Spawn {
        /// Program that failed to launch.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The query exited unsuccessfully.
    #[error("flare listing failed ({status}): {output}")]
    Failed {
        /// Exit status description.
        status: String,
        /// Captured stdout and stderr.
        output: String,
    },

    /// The output file could not be created or read back.
    #[error("flare listing output: {0}")]
    Output(#[from] StoreError),
}

/// Guard failures raised before a mode transition or a settings save.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A date is not `YYYY-MM-DD`.
    #[error("Dates must be YYYY-MM-DD")]
    DateFormat,

    /// Start date falls after end date.
    #[error("Start must be on/before End")]
    DateOrder,

    /// No usable date range is configured.
    #[error("Set a date range first.")]
    MissingDateRange,

    /// No wavelength is selected.
    #[error("Select at least one wavelength first.")]
    MissingWavelength,

    /// No comparator is configured.
    #[error("Set a comparator first.")]
    MissingComparator,
}
