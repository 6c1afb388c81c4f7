//! Mode controller: routes input, timer, and query events to the active mode.
//!
//! Every entry point mutates [`AppState`] synchronously and returns an
//! [`Effect`] for the shell to carry out. The controller never performs
//! terminal I/O and never spawns work itself.

use crate::config::KeyBindings;
use crate::model::KeyAction;
use crate::source::{QueryCompletion, QueryRequest};
use crate::state::mode::{Mode, SelectorState, SelectorTable};
use crate::state::{editor_handler, menu_handler, mouse_handler, table_handler, AppState};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use tracing::{info, warn};

/// Work the shell must do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing beyond redrawing.
    None,
    /// Exit the application.
    Quit,
    /// Start the flare query; its completion comes back through
    /// [`handle_query_completion`].
    RunQuery(QueryRequest),
}

/// Handle a key press.
///
/// Ctrl+C always quits. Text fields see raw characters before bindings are
/// consulted, so typing `j` into a search does not move the cursor.
pub fn handle_key(state: &mut AppState, key: KeyEvent, bindings: &KeyBindings) -> Effect {
    if key.kind == KeyEventKind::Release {
        return Effect::None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        info!("Quit requested");
        return Effect::Quit;
    }
    if intercept_text(state, key) {
        return Effect::None;
    }
    match bindings.get(key) {
        Some(KeyAction::Quit) => {
            info!("Quit requested");
            Effect::Quit
        }
        Some(action) => dispatch_action(state, action),
        None => Effect::None,
    }
}

/// Feed a character to the active text field, if any. Returns whether it
/// was consumed.
fn intercept_text(state: &mut AppState, key: KeyEvent) -> bool {
    let KeyCode::Char(c) = key.code else {
        return false;
    };
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return false;
    }
    match &mut state.mode {
        Mode::DateRangeEditor(editor) => editor_handler::handle_date_char(editor, c),
        Mode::CacheDeleteEditor(delete) => table_handler::handle_search_char(delete, c),
        _ => false,
    }
}

/// Apply a bound action to the active mode.
pub fn dispatch_action(state: &mut AppState, action: KeyAction) -> Effect {
    match &state.mode {
        Mode::MainMenu(_) => menu_handler::handle_menu_action(state, action),
        Mode::WavelengthEditor(_) => editor_handler::handle_wavelength_action(state, action),
        Mode::DateRangeEditor(_) => editor_handler::handle_date_action(state, action),
        Mode::FlareFilterEditor(_) => editor_handler::handle_filter_action(state, action),
        Mode::FlareSelector(_) => table_handler::handle_selector_action(state, action),
        Mode::CacheViewer(_) => table_handler::handle_viewer_action(state, action),
        Mode::CacheDeleteEditor(_) => table_handler::handle_delete_action(state, action),
    }
}

/// Handle a pointer event against the layout currently on screen.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) -> Effect {
    mouse_handler::handle_mouse(state, mouse)
}

/// Advance the animation timer.
pub fn handle_tick(state: &mut AppState) {
    state.tick();
}

/// Record a terminal resize.
pub fn handle_resize(state: &mut AppState, width: u16, height: u16) {
    state.resize(width, height);
}

/// Apply the result of a query run.
///
/// A completion is applied only while the selector is still loading the
/// same request; anything else is stale and dropped.
pub fn handle_query_completion(state: &mut AppState, completion: QueryCompletion) {
    let expected = match &state.mode {
        Mode::FlareSelector(SelectorState::Loading { request_id, .. }) => Some(*request_id),
        _ => None,
    };
    if expected != Some(completion.id) {
        warn!(
            id = completion.id,
            expected = ?expected,
            mode = state.mode.name(),
            "Discarding stale query completion"
        );
        return;
    }

    match completion.result {
        Ok(output) if output.records.is_empty() => {
            info!(id = completion.id, "Query returned no flares");
            state.set_notice("No flares found.");
            state.return_to_menu();
        }
        Ok(output) => {
            info!(id = completion.id, rows = output.records.len(), "Query results ready");
            let table = SelectorTable::new(output.header, output.records);
            state.enter(Mode::FlareSelector(SelectorState::Ready(table)));
        }
        Err(e) => state.fail("Query failed", e),
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
