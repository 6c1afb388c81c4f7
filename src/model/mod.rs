//! Domain model types (pure).
//!
//! All types in this module are plain data with no I/O.

pub mod dates;
pub mod error;
pub mod flare_class;
pub mod key_action;
pub mod record;
pub mod selection;
pub mod wavelength;

// Re-export for convenience
pub use error::{AppError, QueryError, StoreError, ValidationError};
pub use flare_class::{ClassSelection, Comparator};
pub use key_action::KeyAction;
pub use record::{FlareRecord, DEFAULT_HEADER};
pub use selection::{
    DisplayedIndex, DisplayedSelection, OriginalIndex, OriginalSelection, SelectionSet,
};
