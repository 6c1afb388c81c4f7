//! View-state layer - windowing, block geometry, and hit-testing
//!
//! Everything here is pure: given the active mode and the terminal width it
//! says which rows are visible, where they sit on screen, and which row a
//! pointer is over. The renderer and the pointer handler both read from it.
//!
//! # Module Structure
//!
//! - `window`: WindowState cursor/offset invariants and the windowing policies
//! - `layout`: BlockLayout per mode, shared by renderer and hit tester
//! - `hit_test`: map_pointer and HitTestResult

pub mod hit_test;
pub mod layout;
pub mod window;

pub use hit_test::{map_pointer, HeaderHit, HitTestResult};
pub use layout::{mode_layout, BlockLayout, ColumnBand, OptionWindow, RegionLayout};
pub use window::{WindowPolicy, WindowState};
