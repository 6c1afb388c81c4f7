//! UI state machine (pure).
//!
//! All transitions run synchronously on [`AppState`] and are testable
//! without a terminal. The controller routes events; each `*_handler`
//! module owns the keys of one group of modes.

pub mod app_state;
pub mod controller;
pub mod editor_handler;
pub mod filter;
pub mod menu_handler;
pub mod mode;
pub mod mouse_handler;
pub mod notice;
pub mod table_handler;

// Re-export for convenience
pub use app_state::{AppState, DEFAULT_NOTICE_TICKS};
pub use controller::Effect;
pub use filter::{FilterResult, RecordFilter};
pub use mode::Mode;
pub use notice::Notice;
