//! Tab-separated flare cache on disk.
//!
//! Line 0 is a header preserved verbatim across rewrites; every following
//! non-blank line is one record. All writes go through [`atomic`].

pub mod atomic;

use crate::model::{FlareRecord, OriginalIndex, OriginalSelection, StoreError, DEFAULT_HEADER};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Header and non-blank data lines of a TSV document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TsvDocument {
    /// First line, verbatim.
    pub header: String,
    /// Remaining non-blank lines in file order.
    pub lines: Vec<String>,
}

/// Split TSV text into header and data lines.
///
/// Returns `None` when the text has no first line at all. Blank data lines
/// are dropped.
pub fn split_tsv(text: &str) -> Option<TsvDocument> {
    let mut lines = text.lines();
    let header = lines.next()?.to_string();
    let lines = lines
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();
    Some(TsvDocument { header, lines })
}

/// A loaded cache.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CacheContents {
    /// Header line as read.
    pub header: String,
    /// Records in file order; position is the original index.
    pub records: Vec<FlareRecord>,
}

/// The flare cache file.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Cache backed by `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the cache file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw header and lines.
    ///
    /// # Errors
    ///
    /// `NotFound` if the file is absent, `Empty` if it has no header line,
    /// `Io` for any other read failure.
    pub fn read_document(&self) -> Result<TsvDocument, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        split_tsv(&text).ok_or_else(|| StoreError::Empty {
            path: self.path.clone(),
        })
    }

    /// Load and parse every record.
    pub fn load(&self) -> Result<CacheContents, StoreError> {
        let doc = self.read_document()?;
        let records = doc
            .lines
            .iter()
            .map(|line| FlareRecord::parse_line(line))
            .collect::<Vec<_>>();
        debug!(path = %self.path.display(), rows = records.len(), "Loaded cache");
        Ok(CacheContents {
            header: doc.header,
            records,
        })
    }

    /// Rewrite the cache without the records at the original positions in
    /// `delete`. Returns how many rows were removed.
    pub fn save_pruned(
        &self,
        header: &str,
        records: &[FlareRecord],
        delete: &OriginalSelection,
    ) -> Result<usize, StoreError> {
        let mut out = String::new();
        push_line(&mut out, header);
        let mut removed = 0;
        for (idx, record) in records.iter().enumerate() {
            if delete.contains(OriginalIndex::new(idx)) {
                removed += 1;
                continue;
            }
            if record.raw_line().trim().is_empty() {
                continue;
            }
            push_line(&mut out, record.raw_line());
        }
        atomic::write_atomic(&self.path, &out)?;
        info!(path = %self.path.display(), removed, "Pruned cache");
        Ok(removed)
    }

    /// Reduce the cache to its header line.
    ///
    /// Keeps the existing header when it can be read and is non-blank,
    /// otherwise writes [`DEFAULT_HEADER`]. Returns the header written.
    pub fn clear(&self) -> Result<String, StoreError> {
        let header = match self.read_document() {
            Ok(doc) if !doc.header.trim().is_empty() => doc.header,
            _ => DEFAULT_HEADER.to_string(),
        };
        let mut out = String::new();
        push_line(&mut out, &header);
        atomic::write_atomic(&self.path, &out)?;
        info!(path = %self.path.display(), "Cleared cache");
        Ok(header)
    }

    /// Write `header`, `existing`, then `new_lines`, dropping blank lines and
    /// any exact repeat of a line already written (the header included).
    /// Returns how many of `new_lines` made it into the file.
    pub fn append_dedup(
        &self,
        header: &str,
        existing: &[String],
        new_lines: &[String],
    ) -> Result<usize, StoreError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut out = String::new();
        seen.insert(header);
        push_line(&mut out, header);

        for line in existing {
            if !line.trim().is_empty() && seen.insert(line.as_str()) {
                push_line(&mut out, line);
            }
        }

        let mut added = 0;
        for line in new_lines {
            if !line.trim().is_empty() && seen.insert(line.as_str()) {
                push_line(&mut out, line);
                added += 1;
            }
        }

        atomic::write_atomic(&self.path, &out)?;
        info!(path = %self.path.display(), added, "Appended to cache");
        Ok(added)
    }

    /// Append chosen query lines to whatever the cache holds now.
    ///
    /// The cache's own header wins; `fallback_header` is used for a missing
    /// or headerless cache, and [`DEFAULT_HEADER`] when that is blank too.
    pub fn save_selection(
        &self,
        fallback_header: &str,
        new_lines: &[String],
    ) -> Result<usize, StoreError> {
        let current = match self.read_document() {
            Ok(doc) => doc,
            Err(StoreError::NotFound { .. } | StoreError::Empty { .. }) => TsvDocument::default(),
            Err(e) => return Err(e),
        };
        let header = if !current.header.trim().is_empty() {
            current.header.as_str()
        } else if !fallback_header.trim().is_empty() {
            fallback_header.trim()
        } else {
            DEFAULT_HEADER
        };
        self.append_dedup(header, &current.lines, new_lines)
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
