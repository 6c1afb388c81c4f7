//! Mouse event handler.
//!
//! Pointer positions are resolved with the same block layout the renderer
//! draws from. Hovering moves focus, the wheel moves the selection, and a
//! left-button release activates or toggles the row under the pointer.

use crate::model::{DisplayedIndex, KeyAction};
use crate::state::controller::{dispatch_action, Effect};
use crate::state::mode::{
    DateField, FilterColumn, Mode, SelectorState, CACHE_MENU_ITEMS, MENU_ITEMS,
};
use crate::state::{menu_handler, table_handler, AppState};
use crate::view_state::hit_test::{map_pointer, HitTestResult};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use tracing::trace;

/// Handle a pointer event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) -> Effect {
    match mouse.kind {
        MouseEventKind::ScrollUp => dispatch_action(state, KeyAction::MoveUp),
        MouseEventKind::ScrollDown => dispatch_action(state, KeyAction::MoveDown),
        MouseEventKind::Moved => {
            let hit = map_pointer(mouse.column, mouse.row, &state.layout());
            handle_hover(state, hit);
            Effect::None
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let hit = map_pointer(mouse.column, mouse.row, &state.layout());
            trace!(x = mouse.column, y = mouse.row, ?hit, "Click");
            handle_click(state, hit)
        }
        _ => Effect::None,
    }
}

/// Move focus to the row under the pointer.
pub fn handle_hover(state: &mut AppState, hit: HitTestResult) {
    let HitTestResult::Hit { region, row, .. } = hit else {
        return;
    };
    match &mut state.mode {
        Mode::MainMenu(menu) => match (region, menu.cache_menu.as_mut()) {
            (0, None) => menu.selected = row,
            (1, Some(sub)) => sub.selected = row,
            _ => {}
        },
        Mode::WavelengthEditor(editor) => editor.focus = row,
        Mode::DateRangeEditor(editor) => editor.focus = DateField::from_index(row),
        Mode::FlareFilterEditor(editor) => {
            if let Some(column) = FilterColumn::from_index(region) {
                editor.focus = column;
            }
        }
        _ => {}
    }
}

/// Activate or toggle the row under the pointer.
pub fn handle_click(state: &mut AppState, hit: HitTestResult) -> Effect {
    let HitTestResult::Hit {
        region,
        row,
        on_header,
    } = hit
    else {
        return Effect::None;
    };

    match &mut state.mode {
        Mode::MainMenu(menu) => {
            if region == 1 {
                let (Some(sub), Some(&item)) =
                    (menu.cache_menu.as_mut(), CACHE_MENU_ITEMS.get(row))
                else {
                    return Effect::None;
                };
                sub.selected = row;
                return menu_handler::activate_cache_item(state, item);
            }
            let Some(&item) = MENU_ITEMS.get(row) else {
                return Effect::None;
            };
            menu.selected = row;
            menu.cache_menu = None;
            return menu_handler::activate_menu_item(state, item);
        }
        Mode::WavelengthEditor(editor) => {
            editor.focus = row;
            editor.toggle(row);
        }
        Mode::DateRangeEditor(editor) => editor.focus = DateField::from_index(row),
        Mode::FlareFilterEditor(editor) => {
            if let Some(column) = FilterColumn::from_index(region) {
                editor.focus = column;
                if !on_header {
                    editor.select(column, row);
                }
            }
        }
        Mode::FlareSelector(SelectorState::Ready(table)) => {
            let (length, height) = (table.records.len(), table.height());
            table.window.set_cursor(row, length, height);
            table.picked.toggle(DisplayedIndex::new(row));
        }
        Mode::FlareSelector(SelectorState::Loading { .. }) => {}
        Mode::CacheViewer(viewer) => {
            let (length, height) = (viewer.records.len(), viewer.height());
            viewer.window.set_cursor(row, length, height);
        }
        Mode::CacheDeleteEditor(delete) => {
            let (length, height) = (delete.visible_len(), delete.height());
            delete.window.set_cursor(row, length, height);
            table_handler::toggle_delete_pick(delete, row);
        }
    }
    Effect::None
}

#[cfg(test)]
#[path = "mouse_handler_tests.rs"]
mod tests;
