//! Cursor and viewport bookkeeping for scrolling lists.
//!
//! Two windowing policies exist and both go through [`window_start`]:
//! tables keep a cursor/offset pair and clamp the offset to the list edges,
//! option pickers centre the window on the selected option. Renderer and
//! hit tester call the same function so a drawn row and a clicked row
//! always agree.

use std::ops::Range;

/// Inclusive bounds for a list's on-screen height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightBounds {
    /// Rows shown even when the list is shorter.
    pub min: usize,
    /// Rows shown at most.
    pub max: usize,
}

/// Cache viewer and cache delete table.
pub const CACHE_HEIGHT: HeightBounds = HeightBounds { min: 7, max: 25 };

/// Flare selector table.
pub const SELECTOR_HEIGHT: HeightBounds = HeightBounds { min: 7, max: 12 };

/// Rows to show for a list of `length`: zero for an empty list, otherwise
/// `length` clamped into the bounds.
pub fn compute_height(length: usize, bounds: HeightBounds) -> usize {
    if length == 0 {
        return 0;
    }
    length.clamp(bounds.min, bounds.max.max(bounds.min))
}

/// How a window's first visible option is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPolicy {
    /// Anchor is a scroll offset, pinned so the window never runs past
    /// either end.
    Clamped,
    /// Anchor is the selected option, kept in the middle of the window.
    Centered,
}

/// First visible position of a `size`-row window over `total` options.
pub fn window_start(policy: WindowPolicy, total: usize, size: usize, anchor: usize) -> usize {
    let last_start = total.saturating_sub(size);
    match policy {
        WindowPolicy::Clamped => anchor.min(last_start),
        WindowPolicy::Centered => anchor.saturating_sub(size / 2).min(last_start),
    }
}

/// Positions visible in a `size`-row window over `total` options.
pub fn visible_window(policy: WindowPolicy, total: usize, size: usize, anchor: usize) -> Range<usize> {
    let start = window_start(policy, total, size, anchor);
    start..total.min(start + size)
}

/// Clamp `cursor` into the list and scroll `offset` the least amount that
/// keeps it on screen. Returns the adjusted `(cursor, offset)`.
///
/// A zero `height` forces the offset to zero.
pub fn ensure_visible(cursor: usize, offset: usize, length: usize, height: usize) -> (usize, usize) {
    let cursor = cursor.min(length.saturating_sub(1));
    if height == 0 {
        return (cursor, 0);
    }

    let mut offset = offset;
    if cursor < offset {
        offset = cursor;
    } else if cursor >= offset + height {
        offset = cursor + 1 - height;
    }
    (cursor, offset.min(length.saturating_sub(height)))
}

/// Cursor and scroll offset of one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowState {
    cursor: usize,
    offset: usize,
}

impl WindowState {
    /// Cursor on the first row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlighted row.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// First visible row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Put the cursor back on the first row.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Re-establish the invariants after the list changed size.
    pub fn ensure_visible(&mut self, length: usize, height: usize) {
        (self.cursor, self.offset) = ensure_visible(self.cursor, self.offset, length, height);
    }

    /// Move the cursor to `row` and scroll as needed.
    pub fn set_cursor(&mut self, row: usize, length: usize, height: usize) {
        self.cursor = row;
        self.ensure_visible(length, height);
    }

    /// One row up.
    pub fn move_up(&mut self, length: usize, height: usize) {
        self.set_cursor(self.cursor.saturating_sub(1), length, height);
    }

    /// One row down.
    pub fn move_down(&mut self, length: usize, height: usize) {
        self.set_cursor(self.cursor.saturating_add(1), length, height);
    }

    /// One window up.
    pub fn page_up(&mut self, length: usize, height: usize) {
        self.set_cursor(self.cursor.saturating_sub(height.max(1)), length, height);
    }

    /// One window down.
    pub fn page_down(&mut self, length: usize, height: usize) {
        self.set_cursor(self.cursor.saturating_add(height.max(1)), length, height);
    }

    /// Rows to draw for a list of `length` shown `height` rows tall.
    pub fn visible_range(&self, length: usize, height: usize) -> Range<usize> {
        visible_window(WindowPolicy::Clamped, length, height, self.offset)
    }
}
