//! Settings editors: wavelengths, date range, and flare class filter.
//!
//! Each editor works on its own copy of the values. Confirm writes the
//! settings file and returns to the menu; cancel returns without writing.

use crate::config::QuerySettings;
use crate::model::dates::{is_date_char, validate_range, DATE_LEN};
use crate::model::wavelength::{build_wave_value, WAVE_OPTIONS};
use crate::model::KeyAction;
use crate::state::controller::Effect;
use crate::state::mode::{DateEditorState, Mode};
use crate::state::AppState;
use crate::view_state::layout::filter_window_size;
use tracing::debug;

/// Persist `edit` and go back to the menu with `saved` as the notice.
fn save_and_return(state: &mut AppState, saved: &str, edit: impl FnOnce(&mut QuerySettings)) {
    match state.update_settings(edit) {
        Ok(()) => {
            state.set_notice(saved);
            state.return_to_menu();
        }
        Err(e) => state.fail("Save failed", e),
    }
}

/// Leave an editor without saving.
fn cancel(state: &mut AppState, message: &str) {
    debug!(mode = state.mode.name(), "Edit canceled");
    state.set_notice(message);
    state.return_to_menu();
}

// ===== Wavelength editor =====

/// Handle a bound key in the wavelength editor.
pub fn handle_wavelength_action(state: &mut AppState, action: KeyAction) -> Effect {
    let Mode::WavelengthEditor(editor) = &mut state.mode else {
        return Effect::None;
    };
    let last = WAVE_OPTIONS.len() - 1;
    match action {
        KeyAction::MoveUp => editor.focus = editor.focus.saturating_sub(1),
        KeyAction::MoveDown => editor.focus = (editor.focus + 1).min(last),
        KeyAction::PageUp => editor.focus = 0,
        KeyAction::PageDown => editor.focus = last,
        KeyAction::Toggle => {
            let focus = editor.focus;
            editor.toggle(focus);
        }
        KeyAction::ToggleAll => editor.toggle_all(),
        KeyAction::Confirm => {
            let wave = build_wave_value(&editor.selected);
            save_and_return(state, "Wavelength saved", |settings| settings.wave = wave);
        }
        KeyAction::Cancel => cancel(state, "Canceled wavelength edit"),
        _ => {}
    }
    Effect::None
}

// ===== Date range editor =====

/// Type `c` into the focused date field. Only digits and `-` are taken, up
/// to ten characters; returns whether `c` was consumed.
pub fn handle_date_char(editor: &mut DateEditorState, c: char) -> bool {
    if !is_date_char(c) {
        return false;
    }
    let field = editor.focused_mut();
    if field.len() < DATE_LEN {
        field.push(c);
    }
    true
}

/// Handle a bound key in the date range editor.
pub fn handle_date_action(state: &mut AppState, action: KeyAction) -> Effect {
    let Mode::DateRangeEditor(editor) = &mut state.mode else {
        return Effect::None;
    };
    match action {
        KeyAction::FocusNext | KeyAction::FocusPrev | KeyAction::MoveUp | KeyAction::MoveDown => {
            editor.focus = editor.focus.other();
        }
        KeyAction::Backspace => {
            editor.focused_mut().pop();
        }
        KeyAction::Confirm => confirm_dates(state),
        KeyAction::Cancel => cancel(state, "Canceled date edit"),
        _ => {}
    }
    Effect::None
}

/// Validate and save the date range. Blank fields keep the saved value;
/// an invalid range stays in the editor with a notice.
fn confirm_dates(state: &mut AppState) {
    let Mode::DateRangeEditor(editor) = &state.mode else {
        return;
    };
    let saved = state.settings();
    let pick = |typed: &str, kept: &str| {
        if typed.trim().is_empty() {
            kept.trim().to_string()
        } else {
            typed.trim().to_string()
        }
    };
    let start = pick(&editor.start, &saved.start);
    let end = pick(&editor.end, &saved.end);

    if let Err(e) = validate_range(&start, &end) {
        debug!(%start, %end, "Date range rejected");
        state.set_notice(e.to_string());
        return;
    }
    save_and_return(state, "Date range saved", |settings| {
        settings.start = start;
        settings.end = end;
    });
}

// ===== Flare filter editor =====

/// Handle a bound key in the flare class filter editor.
pub fn handle_filter_action(state: &mut AppState, action: KeyAction) -> Effect {
    let Mode::FlareFilterEditor(editor) = &mut state.mode else {
        return Effect::None;
    };
    let focus = editor.focus;
    let page = filter_window_size(focus);
    match action {
        KeyAction::FocusNext => editor.focus = focus.next(),
        KeyAction::FocusPrev => editor.focus = focus.prev(),
        KeyAction::MoveUp => editor.select_prev(),
        KeyAction::MoveDown => editor.select_next(),
        KeyAction::PageUp => editor.select(focus, editor.selected_in(focus).saturating_sub(page)),
        KeyAction::PageDown => editor.select(focus, editor.selected_in(focus) + page),
        KeyAction::Confirm => {
            let (comparator, flare_class) = editor.selection.to_values();
            save_and_return(state, "Flare filter saved", |settings| {
                settings.comparator = comparator;
                settings.flare_class = flare_class;
            });
        }
        KeyAction::Cancel => cancel(state, "Canceled flare filter edit"),
        _ => {}
    }
    Effect::None
}
