//! Main menu and cache submenu.

use crate::config::QuerySettings;
use crate::model::dates::validate_range;
use crate::model::wavelength::{build_wave_value, parse_waves};
use crate::model::{KeyAction, StoreError, ValidationError};
use crate::source::QueryRequest;
use crate::state::controller::Effect;
use crate::state::mode::{
    CacheDeleteState, CacheMenuItem, CacheMenuState, CacheViewerState, DateEditorState,
    FilterEditorState, MainMenuState, MenuItem, Mode, SelectorState, WavelengthEditorState,
    CACHE_MENU_ITEMS, MENU_ITEMS,
};
use crate::state::AppState;
use tracing::{debug, info, warn};

/// What a menu key resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuCommand {
    Stay,
    Main(MenuItem),
    Cache(CacheMenuItem),
    Quit,
}

fn step(selected: usize, len: usize, action: KeyAction) -> usize {
    let last = len.saturating_sub(1);
    match action {
        KeyAction::MoveUp => selected.saturating_sub(1),
        KeyAction::MoveDown => (selected + 1).min(last),
        KeyAction::PageUp => 0,
        KeyAction::PageDown => last,
        _ => selected,
    }
}

fn navigate(menu: &mut MainMenuState, action: KeyAction) -> MenuCommand {
    if let Some(sub) = menu.cache_menu.as_mut() {
        return match action {
            KeyAction::Confirm | KeyAction::Toggle | KeyAction::FocusNext => CACHE_MENU_ITEMS
                .get(sub.selected)
                .map_or(MenuCommand::Stay, |&item| MenuCommand::Cache(item)),
            KeyAction::Cancel | KeyAction::FocusPrev => {
                menu.cache_menu = None;
                debug!("Cache menu closed");
                MenuCommand::Stay
            }
            other => {
                sub.selected = step(sub.selected, CACHE_MENU_ITEMS.len(), other);
                MenuCommand::Stay
            }
        };
    }

    match action {
        KeyAction::Confirm | KeyAction::Toggle => MENU_ITEMS
            .get(menu.selected)
            .map_or(MenuCommand::Stay, |&item| MenuCommand::Main(item)),
        KeyAction::FocusNext if MENU_ITEMS.get(menu.selected) == Some(&MenuItem::CacheOptions) => {
            MenuCommand::Main(MenuItem::CacheOptions)
        }
        KeyAction::Cancel => MenuCommand::Quit,
        other => {
            menu.selected = step(menu.selected, MENU_ITEMS.len(), other);
            MenuCommand::Stay
        }
    }
}

/// Handle a bound key on the main menu.
pub fn handle_menu_action(state: &mut AppState, action: KeyAction) -> Effect {
    let Mode::MainMenu(menu) = &mut state.mode else {
        return Effect::None;
    };
    match navigate(menu, action) {
        MenuCommand::Stay => Effect::None,
        MenuCommand::Main(item) => activate_menu_item(state, item),
        MenuCommand::Cache(item) => activate_cache_item(state, item),
        MenuCommand::Quit => Effect::Quit,
    }
}

/// Run a main menu entry.
pub fn activate_menu_item(state: &mut AppState, item: MenuItem) -> Effect {
    debug!(?item, "Menu item activated");
    match item {
        MenuItem::EditWavelength => {
            let editor = WavelengthEditorState::from_settings(state.settings());
            state.enter(Mode::WavelengthEditor(editor));
        }
        MenuItem::EditDateRange => state.enter(Mode::DateRangeEditor(DateEditorState::default())),
        MenuItem::EditFlareFilter => {
            let editor = FilterEditorState::from_settings(state.settings());
            state.enter(Mode::FlareFilterEditor(editor));
        }
        MenuItem::SelectFlares => return start_query(state),
        MenuItem::CacheOptions => {
            if let Mode::MainMenu(menu) = &mut state.mode {
                menu.cache_menu = Some(CacheMenuState::default());
            }
        }
        MenuItem::Quit => return Effect::Quit,
    }
    Effect::None
}

/// Run a cache submenu entry.
pub fn activate_cache_item(state: &mut AppState, item: CacheMenuItem) -> Effect {
    debug!(?item, "Cache menu item activated");
    match item {
        CacheMenuItem::ViewCache => match state.store().load() {
            Ok(contents) => state.enter(Mode::CacheViewer(CacheViewerState::new(contents.records))),
            Err(e) => cache_read_failed(state, e),
        },
        CacheMenuItem::DeleteRows => match state.store().load() {
            Ok(contents) => state.enter(Mode::CacheDeleteEditor(CacheDeleteState::new(
                contents.header,
                contents.records,
            ))),
            Err(e) => cache_read_failed(state, e),
        },
        CacheMenuItem::ClearCache => match state.store().clear() {
            Ok(_) => {
                state.set_notice("Cleared flare cache");
                state.return_to_menu();
            }
            Err(e) => state.fail("Clear failed", e),
        },
        CacheMenuItem::Back => {
            if let Mode::MainMenu(menu) = &mut state.mode {
                menu.cache_menu = None;
            }
        }
    }
    Effect::None
}

fn cache_read_failed(state: &mut AppState, error: StoreError) {
    match error {
        StoreError::NotFound { .. } | StoreError::Empty { .. } => {
            warn!(error = %error, "Cache unavailable");
            state.set_notice("Cache empty or missing");
            state.return_to_menu();
        }
        other => state.fail("Cache read failed", other),
    }
}

/// Check that the saved settings are enough to run a query.
///
/// Checked in order: a chronological date range, at least one wavelength,
/// a comparator.
pub fn validate_query_settings(settings: &QuerySettings) -> Result<(), ValidationError> {
    if settings.start.trim().is_empty() || settings.end.trim().is_empty() {
        return Err(ValidationError::MissingDateRange);
    }
    validate_range(settings.start.trim(), settings.end.trim())?;
    if parse_waves(&settings.wave).is_empty() {
        return Err(ValidationError::MissingWavelength);
    }
    if settings.comparator.trim().is_empty() {
        return Err(ValidationError::MissingComparator);
    }
    Ok(())
}

/// Query arguments for the saved settings.
pub fn query_request(settings: &QuerySettings, id: u64) -> QueryRequest {
    QueryRequest {
        id,
        start: settings.start.trim().to_string(),
        end: settings.end.trim().to_string(),
        comparator: settings.comparator.trim().to_string(),
        flare_class: settings.flare_class.trim().to_string(),
        wave: build_wave_value(&parse_waves(&settings.wave)),
    }
}

/// Enter the selector's loading state and ask the shell to run the query.
///
/// A failed guard leaves the menu in place and raises a notice.
pub fn start_query(state: &mut AppState) -> Effect {
    if let Err(e) = validate_query_settings(state.settings()) {
        info!(reason = %e, "Flare selection blocked");
        state.set_notice(e.to_string());
        return Effect::None;
    }
    let id = state.next_request_id();
    let request = query_request(state.settings(), id);
    state.enter(Mode::FlareSelector(SelectorState::Loading {
        request_id: id,
        spinner: 0,
    }));
    Effect::RunQuery(request)
}
