//! Flare catalogue records.
//!
//! One record per non-blank data line of the tab-separated cache. Parsing is
//! total: a short line yields empty trailing fields, never an error.

/// Number of display fields a well-formed line carries.
pub const RECORD_FIELDS: usize = 6;

/// Header written when a cache has none of its own.
pub const DEFAULT_HEADER: &str = "description\tflare_class\tstart\tend\tcoordinates\twavelength";

/// One flare catalogue row.
///
/// Identified only by its position in the list it was loaded into.
/// `raw_line` is the exact text the record was parsed from and is what
/// gets written back on every rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlareRecord {
    description: String,
    class: String,
    start: String,
    end: String,
    coordinates: String,
    wavelength: String,
    raw_line: String,
}

impl FlareRecord {
    /// Parse a cache line, tolerating missing trailing fields.
    pub fn parse_line(line: &str) -> Self {
        let mut fields = line.split('\t').map(str::to_string);
        let mut next = || fields.next().unwrap_or_default();
        Self {
            description: next(),
            class: next(),
            start: next(),
            end: next(),
            coordinates: next(),
            wavelength: next(),
            raw_line: line.to_string(),
        }
    }

    /// Parse a line produced by the flare query.
    ///
    /// Lines with fewer than [`RECORD_FIELDS`] fields are rejected. Start and
    /// end timestamps are humanized for display and a blank end falls back to
    /// the start. The raw line is kept verbatim for the cache.
    pub fn from_query_line(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < RECORD_FIELDS {
            return None;
        }
        let start = humanize_timestamp(fields[2]);
        let end = match humanize_timestamp(fields[3]) {
            end if end.is_empty() => start.clone(),
            end => end,
        };
        Some(Self {
            description: fields[0].trim().to_string(),
            class: fields[1].trim().to_string(),
            start,
            end,
            coordinates: fields[4].trim().to_string(),
            wavelength: fields[5].trim().to_string(),
            raw_line: line.to_string(),
        })
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// GOES class, e.g. `M5.2`.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Start time.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// End time.
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Heliographic coordinates.
    pub fn coordinates(&self) -> &str {
        &self.coordinates
    }

    /// Wavelength channel list.
    pub fn wavelength(&self) -> &str {
        &self.wavelength
    }

    /// The line this record was parsed from.
    pub fn raw_line(&self) -> &str {
        &self.raw_line
    }

    /// Every field a filter query is tested against.
    pub fn display_fields(&self) -> [&str; RECORD_FIELDS] {
        [
            &self.description,
            &self.class,
            &self.start,
            &self.end,
            &self.coordinates,
            &self.wavelength,
        ]
    }

    /// Whether any display field contains `needle`.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.display_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Turn `2024-05-14T16:51:00.000Z` into `2024-05-14 16:51:00`.
pub fn humanize_timestamp(value: &str) -> String {
    let trimmed = value.trim().trim_end_matches('Z').replacen('T', " ", 1);
    match trimmed.split_once('.') {
        Some((whole, _fraction)) => whole.to_string(),
        None => trimmed,
    }
}
