//! Test harness for controller and rendering tests.
//!
//! Wraps an [`AppState`] backed by a temporary directory and offers a small
//! API for simulating keys, typing, and pointer events.

use crate::config::{KeyBindings, SettingsStore};
use crate::state::controller::{self, Effect};
use crate::state::AppState;
use crate::store::RecordStore;
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::path::PathBuf;

/// Cache header used by fixtures.
pub const HEADER: &str = "description\tflare_class\tstart\tend\tcoordinates\twavelength";

/// Settings that pass every selector guard.
pub const VALID_SETTINGS: &str =
    "WAVE=\"171,304\"\nSTART=\"2024-05-01\"\nEND=\"2024-05-03\"\nCOMPARATOR=\">=\"\nFLARE_CLASS=\"M1.0\"\n";

/// Convert a ratatui buffer to text, one line per row, trailing blanks cut.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}

/// Cache line for flare `n` with `class`.
pub fn cache_line(n: usize, class: &str) -> String {
    format!("flare {n}\t{class}\t2024-05-01 0{}:00\t2024-05-01 0{}:30\tN1{n}E20\t171", n % 10, n % 10)
}

/// Application state over a throwaway directory.
pub struct StateHarness {
    dir: tempfile::TempDir,
    /// State under test.
    pub state: AppState,
    bindings: KeyBindings,
}

impl StateHarness {
    /// Harness with no cache and no settings file.
    pub fn new() -> Self {
        Self::with_files(None, None)
    }

    /// Harness with the given cache and settings file contents.
    pub fn with_files(cache: Option<&str>, settings: Option<&str>) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache_path = dir.path().join("flare_cache.tsv");
        let settings_path = dir.path().join(".vars.env");
        if let Some(text) = cache {
            std::fs::write(&cache_path, text).expect("write cache fixture");
        }
        if let Some(text) = settings {
            std::fs::write(&settings_path, text).expect("write settings fixture");
        }
        let mut state = AppState::new(
            SettingsStore::new(settings_path),
            RecordStore::new(cache_path),
            crate::state::DEFAULT_NOTICE_TICKS,
        );
        state.resize(100, 40);
        Self {
            dir,
            state,
            bindings: KeyBindings::default(),
        }
    }

    /// Harness whose cache holds the header and one line per class.
    pub fn with_cache_rows(classes: &[&str], settings: Option<&str>) -> Self {
        let mut text = format!("{HEADER}\n");
        for (n, class) in classes.iter().enumerate() {
            text.push_str(&cache_line(n, class));
            text.push('\n');
        }
        Self::with_files(Some(&text), settings)
    }

    /// Hand out the state, keeping the directory alive alongside it.
    pub fn into_parts(self) -> (tempfile::TempDir, AppState) {
        (self.dir, self.state)
    }

    /// Path of the cache file.
    pub fn cache_path(&self) -> PathBuf {
        self.dir.path().join("flare_cache.tsv")
    }

    /// Path of the settings file.
    pub fn settings_path(&self) -> PathBuf {
        self.dir.path().join(".vars.env")
    }

    /// Current cache file contents.
    pub fn cache_text(&self) -> String {
        std::fs::read_to_string(self.cache_path()).expect("read cache")
    }

    /// Send a key with no modifiers.
    pub fn press(&mut self, code: KeyCode) -> Effect {
        self.press_with(code, KeyModifiers::NONE)
    }

    /// Send a key with modifiers.
    pub fn press_with(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Effect {
        controller::handle_key(&mut self.state, KeyEvent::new(code, modifiers), &self.bindings)
    }

    /// Type each character of `text`.
    pub fn type_str(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    /// Send a raw pointer event.
    pub fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) -> Effect {
        controller::handle_mouse(
            &mut self.state,
            MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        )
    }

    /// Left click (release) at a screen position.
    pub fn click(&mut self, column: u16, row: u16) -> Effect {
        self.mouse(MouseEventKind::Up(MouseButton::Left), column, row)
    }

    /// Pointer moved to a screen position.
    pub fn hover(&mut self, column: u16, row: u16) -> Effect {
        self.mouse(MouseEventKind::Moved, column, row)
    }

    /// Screen position of `option` in layout region `region`.
    ///
    /// Panics if the option is not on screen.
    pub fn point_of(&self, region: usize, option: usize) -> (u16, u16) {
        let layout = self.state.layout();
        let target = &layout.regions[region];
        let (_, rel_y) = target
            .rows()
            .find(|&(opt, _)| opt == option)
            .expect("option visible");
        (layout.area.x + target.band.start, layout.area.y + rel_y)
    }

    /// Click `option` in layout region `region`.
    pub fn click_option(&mut self, region: usize, option: usize) -> Effect {
        let (x, y) = self.point_of(region, option);
        self.click(x, y)
    }

    /// Advance `n` timer ticks.
    pub fn tick(&mut self, n: usize) {
        for _ in 0..n {
            controller::handle_tick(&mut self.state);
        }
    }
}
