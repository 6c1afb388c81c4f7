//! Screen text and animation constants for TUI rendering.
//!
//! Block geometry lives in `view_state::layout`, where the hit tester reads
//! it too. Only values the hit tester never needs are kept here.

/// Application name shown in the title bar.
pub const APP_TITLE: &str = "flarecat";

/// Subtitle shown after the application name.
pub const APP_SUBTITLE: &str = "SDO/AIA solar flare catalogue";

/// Title of the settings summary panel.
pub const SUMMARY_TITLE: &str = " Query Settings ";

/// Spinner frames shown while the flare query runs, one per tick.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Highlight marker in front of the focused menu entry or option.
pub const FOCUS_MARKER: &str = "› ";

/// Spinner frame for tick `n`.
pub fn spinner_frame(n: usize) -> &'static str {
    SPINNER_FRAMES[n % SPINNER_FRAMES.len()]
}
