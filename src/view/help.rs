//! Key hint line shown at the bottom of the screen.

use crate::state::mode::{Mode, SearchInput, SelectorState};

/// Key hints for the active mode.
pub fn help_text(mode: &Mode) -> &'static str {
    match mode {
        Mode::MainMenu(menu) if menu.cache_menu.is_some() => {
            "↑/↓ move · enter select · esc/← back"
        }
        Mode::MainMenu(_) => "↑/↓ move · enter select · esc quit · ctrl+c quit",
        Mode::WavelengthEditor(_) => {
            "↑/↓ move · space toggle · ctrl+a all · enter save · esc cancel"
        }
        Mode::DateRangeEditor(_) => "type YYYY-MM-DD · tab switch field · enter save · esc cancel",
        Mode::FlareFilterEditor(_) => "←/→ column · ↑/↓ choose · enter save · esc cancel",
        Mode::FlareSelector(SelectorState::Loading { .. }) => "esc cancel",
        Mode::FlareSelector(SelectorState::Ready(_)) => {
            "↑/↓ move · space pick · ctrl+a all · enter save to cache · esc cancel"
        }
        Mode::CacheViewer(_) => "↑/↓ scroll · pgup/pgdn page · esc back",
        Mode::CacheDeleteEditor(delete) => match delete.search {
            SearchInput::Searching { .. } => "type to filter · tab mark · enter done · esc clear",
            SearchInput::Idle => "space/tab mark · / search · enter delete marked · esc cancel",
        },
    }
}
