//! Record tables: flare selector, cache viewer, and cache delete editor.

use crate::model::{DisplayedIndex, KeyAction};
use crate::state::controller::Effect;
use crate::state::mode::{CacheDeleteState, Mode, SearchInput, SelectorState};
use crate::state::AppState;
use crate::view_state::window::WindowState;
use tracing::{debug, info};

/// Apply a movement action to a table window. Returns whether `action` was
/// a movement.
fn navigate(window: &mut WindowState, action: KeyAction, length: usize, height: usize) -> bool {
    match action {
        KeyAction::MoveUp => window.move_up(length, height),
        KeyAction::MoveDown => window.move_down(length, height),
        KeyAction::PageUp => window.page_up(length, height),
        KeyAction::PageDown => window.page_down(length, height),
        _ => return false,
    }
    true
}

// ===== Flare selector =====

/// Handle a bound key in the flare selector.
///
/// While loading only cancel is honored; the pending result is then stale
/// and will be dropped on arrival.
pub fn handle_selector_action(state: &mut AppState, action: KeyAction) -> Effect {
    if matches!(state.mode, Mode::FlareSelector(SelectorState::Loading { .. })) {
        if action == KeyAction::Cancel {
            state.set_notice("Canceled flare query");
            state.return_to_menu();
        }
        return Effect::None;
    }

    let Mode::FlareSelector(SelectorState::Ready(table)) = &mut state.mode else {
        return Effect::None;
    };
    let (length, height) = (table.records.len(), table.height());
    if navigate(&mut table.window, action, length, height) {
        return Effect::None;
    }
    match action {
        KeyAction::Toggle => {
            if length > 0 {
                table.picked.toggle(DisplayedIndex::new(table.window.cursor()));
            }
        }
        KeyAction::ToggleAll => {
            if table.picked.len() == length {
                table.picked.clear();
            } else {
                table.picked = (0..length).map(DisplayedIndex::new).collect();
            }
        }
        KeyAction::Confirm => save_picked_flares(state),
        KeyAction::Cancel => {
            state.set_notice("Canceled flare selection");
            state.return_to_menu();
        }
        _ => {}
    }
    Effect::None
}

/// Append the picked rows, in display order, to the cache.
fn save_picked_flares(state: &mut AppState) {
    let Mode::FlareSelector(SelectorState::Ready(table)) = &state.mode else {
        return;
    };
    if table.picked.is_empty() {
        state.set_notice("No flares selected.");
        return;
    }
    let lines: Vec<String> = table
        .picked
        .iter()
        .filter_map(|idx| table.records.get(idx.get()))
        .map(|record| record.raw_line().to_string())
        .collect();

    match state.store().save_selection(&table.header, &lines) {
        Ok(added) => {
            info!(picked = lines.len(), added, "Saved flares to cache");
            state.set_notice(format!("Saved {} flares", lines.len()));
            state.return_to_menu();
        }
        Err(e) => state.fail("Save failed", e),
    }
}

// ===== Cache viewer =====

/// Handle a bound key in the read-only cache table.
pub fn handle_viewer_action(state: &mut AppState, action: KeyAction) -> Effect {
    let Mode::CacheViewer(viewer) = &mut state.mode else {
        return Effect::None;
    };
    let (length, height) = (viewer.records.len(), viewer.height());
    if navigate(&mut viewer.window, action, length, height) {
        return Effect::None;
    }
    if matches!(
        action,
        KeyAction::Cancel | KeyAction::Confirm | KeyAction::FocusPrev
    ) {
        state.return_to_menu();
    }
    Effect::None
}

// ===== Cache delete editor =====

/// Replace the search input with `edit` applied and re-filter.
fn edit_query(delete: &mut CacheDeleteState, edit: impl FnOnce(&mut String)) {
    let SearchInput::Searching { input } = &mut delete.search else {
        return;
    };
    edit(input);
    let query = input.clone();
    delete.apply_query(&query);
}

/// Type `c` into the search input. Returns whether the editor was searching.
pub fn handle_search_char(delete: &mut CacheDeleteState, c: char) -> bool {
    if !matches!(delete.search, SearchInput::Searching { .. }) {
        return false;
    }
    edit_query(delete, |input| input.push(c));
    true
}

/// Toggle the delete pick of the row shown at `displayed`.
pub fn toggle_delete_pick(delete: &mut CacheDeleteState, displayed: usize) {
    let source_len = delete.records.len();
    if let Some(original) = delete
        .filter
        .original_index(DisplayedIndex::new(displayed), source_len)
    {
        let picked = delete.picks.toggle(original);
        debug!(row = original.get(), picked, "Delete pick toggled");
    }
}

/// Handle a bound key in the cache delete editor.
pub fn handle_delete_action(state: &mut AppState, action: KeyAction) -> Effect {
    let Mode::CacheDeleteEditor(delete) = &mut state.mode else {
        return Effect::None;
    };
    let (length, height) = (delete.visible_len(), delete.height());
    if navigate(&mut delete.window, action, length, height) {
        return Effect::None;
    }

    if matches!(delete.search, SearchInput::Searching { .. }) {
        match action {
            KeyAction::Backspace => edit_query(delete, |input| {
                input.pop();
            }),
            KeyAction::Confirm => {
                debug!(query = delete.filter.query(), "Search committed");
                delete.search = SearchInput::Idle;
            }
            KeyAction::Cancel => {
                delete.search = SearchInput::Idle;
                delete.apply_query("");
            }
            KeyAction::FocusNext => {
                let cursor = delete.window.cursor();
                toggle_delete_pick(delete, cursor);
            }
            _ => {}
        }
        return Effect::None;
    }

    match action {
        KeyAction::Toggle | KeyAction::FocusNext => {
            let cursor = delete.window.cursor();
            toggle_delete_pick(delete, cursor);
        }
        KeyAction::StartSearch => {
            delete.search = SearchInput::Searching {
                input: delete.filter.query().to_string(),
            };
            delete.window.reset();
        }
        KeyAction::Confirm => prune_cache(state),
        KeyAction::Cancel | KeyAction::FocusPrev => {
            state.set_notice("Canceled cache delete");
            state.return_to_menu();
        }
        _ => {}
    }
    Effect::None
}

/// Rewrite the cache without the picked rows.
fn prune_cache(state: &mut AppState) {
    let Mode::CacheDeleteEditor(delete) = &state.mode else {
        return;
    };
    if delete.picks.is_empty() {
        state.set_notice("No rows selected.");
        return;
    }
    match state
        .store()
        .save_pruned(&delete.header, &delete.records, &delete.picks)
    {
        Ok(removed) => {
            state.set_notice(format!("Deleted {removed} rows"));
            state.return_to_menu();
        }
        Err(e) => state.fail("Delete failed", e),
    }
}
