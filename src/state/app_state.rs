//! Application state owned by the event loop.
//!
//! AppState composes the persisted query settings, the cache store, the
//! active [`Mode`], and the transient notice. Handlers in this module's
//! siblings take it by `&mut` and perform every transition synchronously.

use crate::config::{QuerySettings, SettingsError, SettingsStore};
use crate::model::AppError;
use crate::state::mode::{MainMenuState, Mode, SelectorState};
use crate::state::notice::Notice;
use crate::store::RecordStore;
use crate::view_state::layout::{
    mode_layout, table_row_limit, BlockLayout, DELETE_TITLE_ROWS, TABLE_TITLE_ROWS,
};
use tracing::{debug, warn};

/// Ticks a notice stays up when the config does not say otherwise.
pub const DEFAULT_NOTICE_TICKS: u64 = 20;

/// Terminal size assumed until the first resize.
pub const DEFAULT_TERMINAL_SIZE: (u16, u16) = (80, 24);

// ===== AppState =====

/// Application state.
///
/// # State Machine
///
/// Exactly one [`Mode`] is active. The app starts at the main menu and every
/// mode returns there on confirm, cancel, or failure. Returning restores the
/// menu entry that was highlighted when the menu was left.
#[derive(Debug, Clone)]
pub struct AppState {
    settings: QuerySettings,
    settings_store: SettingsStore,
    store: RecordStore,

    /// The active screen.
    pub mode: Mode,

    notice: Option<Notice>,
    notice_ticks: u64,
    frame: u64,
    next_request_id: u64,
    menu_position: usize,
    terminal_size: (u16, u16),
}

impl AppState {
    /// State at the main menu with settings loaded from `settings_store`.
    ///
    /// An unreadable settings file leaves the settings empty and raises a
    /// notice.
    pub fn new(settings_store: SettingsStore, store: RecordStore, notice_ticks: u64) -> Self {
        let mut state = Self {
            settings: QuerySettings::default(),
            settings_store,
            store,
            mode: Mode::MainMenu(MainMenuState::default()),
            notice: None,
            notice_ticks,
            frame: 0,
            next_request_id: 0,
            menu_position: 0,
            terminal_size: DEFAULT_TERMINAL_SIZE,
        };
        match state.settings_store.load() {
            Ok(settings) => state.settings = settings,
            Err(e) => {
                warn!(error = %e, "Could not load query settings");
                state.set_notice(format!("Settings unreadable: {e}"));
            }
        }
        state
    }

    /// Persisted query settings.
    pub fn settings(&self) -> &QuerySettings {
        &self.settings
    }

    /// The flare cache.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Apply `edit` to a copy of the settings and save it. The in-memory
    /// settings change only once the write has succeeded.
    pub fn update_settings(
        &mut self,
        edit: impl FnOnce(&mut QuerySettings),
    ) -> Result<(), SettingsError> {
        let mut next = self.settings.clone();
        edit(&mut next);
        self.settings_store.save(&next)?;
        self.settings = next;
        Ok(())
    }

    // ===== Notices =====

    /// Current notice text.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(Notice::message)
    }

    /// Raise a notice, replacing any current one.
    pub fn set_notice(&mut self, message: impl Into<String>) {
        let notice = Notice::new(message, self.frame);
        debug!(notice = notice.message(), "Notice");
        self.notice = Some(notice);
    }

    /// Report a recoverable failure and go back to the main menu.
    pub fn fail(&mut self, context: &str, error: impl Into<AppError>) {
        let error = error.into();
        warn!(error = %error, mode = self.mode.name(), "{context}");
        self.set_notice(format!("{context}: {error}"));
        self.return_to_menu();
    }

    // ===== Timer =====

    /// Frames elapsed since start.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one animation frame: expire the notice and spin the loader.
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.is_expired(self.frame, self.notice_ticks))
        {
            self.notice = None;
        }
        if let Mode::FlareSelector(SelectorState::Loading { spinner, .. }) = &mut self.mode {
            *spinner = spinner.wrapping_add(1);
        }
    }

    // ===== Transitions =====

    /// Switch to `mode`, remembering the menu position when leaving the menu.
    pub fn enter(&mut self, mode: Mode) {
        if let Mode::MainMenu(menu) = &self.mode {
            self.menu_position = menu.selected;
        }
        debug!(from = self.mode.name(), to = mode.name(), "Mode transition");
        self.mode = mode;
        self.fit_tables();
    }

    /// Back to the main menu with the submenu closed.
    pub fn return_to_menu(&mut self) {
        if let Mode::MainMenu(menu) = &self.mode {
            self.menu_position = menu.selected;
        }
        let menu = MainMenuState::at(self.menu_position);
        self.enter(Mode::MainMenu(menu));
    }

    /// Allocate the id for a new query request.
    pub fn next_request_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }

    // ===== Geometry =====

    /// Record the terminal size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width.max(1), height);
        self.fit_tables();
    }

    /// Shrink the active table to the rows between the summary and the
    /// footer and scroll its cursor back on screen.
    pub fn fit_tables(&mut self) {
        let height = self.terminal_size.1;
        match &mut self.mode {
            Mode::FlareSelector(SelectorState::Ready(table)) => {
                table.row_limit = table_row_limit(height, TABLE_TITLE_ROWS);
                let (length, rows) = (table.records.len(), table.height());
                table.window.ensure_visible(length, rows);
            }
            Mode::CacheViewer(viewer) => {
                viewer.row_limit = table_row_limit(height, TABLE_TITLE_ROWS);
                let (length, rows) = (viewer.records.len(), viewer.height());
                viewer.window.ensure_visible(length, rows);
            }
            Mode::CacheDeleteEditor(delete) => {
                delete.row_limit = table_row_limit(height, DELETE_TITLE_ROWS);
                let (length, rows) = (delete.visible_len(), delete.height());
                delete.window.ensure_visible(length, rows);
            }
            _ => {}
        }
    }

    /// Terminal `(width, height)`.
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Layout of the active mode at the current terminal size.
    pub fn layout(&self) -> BlockLayout {
        mode_layout(&self.mode, self.terminal_size.0, self.terminal_size.1)
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
