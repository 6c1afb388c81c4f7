//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default arrow and vim-style bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only code and modifiers take part; event kind and state are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    /// Bind `code` with `modifiers` to `action`, replacing any previous binding.
    pub fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };

        // Cursor movement
        keys.bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::MoveUp);
        keys.bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::MoveUp);
        keys.bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::MoveDown);
        keys.bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::MoveDown);
        keys.bind(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);
        keys.bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);
        keys.bind(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);
        keys.bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);

        // Field and column focus
        keys.bind(KeyCode::Tab, KeyModifiers::NONE, KeyAction::FocusNext);
        keys.bind(KeyCode::Right, KeyModifiers::NONE, KeyAction::FocusNext);
        keys.bind(KeyCode::Char('l'), KeyModifiers::NONE, KeyAction::FocusNext);
        keys.bind(KeyCode::BackTab, KeyModifiers::SHIFT, KeyAction::FocusPrev);
        keys.bind(KeyCode::Left, KeyModifiers::NONE, KeyAction::FocusPrev);
        keys.bind(KeyCode::Char('h'), KeyModifiers::NONE, KeyAction::FocusPrev);

        // Activation
        keys.bind(KeyCode::Enter, KeyModifiers::NONE, KeyAction::Confirm);
        keys.bind(KeyCode::Char(' '), KeyModifiers::NONE, KeyAction::Toggle);
        keys.bind(KeyCode::Char('a'), KeyModifiers::CONTROL, KeyAction::ToggleAll);
        keys.bind(KeyCode::Esc, KeyModifiers::NONE, KeyAction::Cancel);

        // Search input
        keys.bind(KeyCode::Char('/'), KeyModifiers::NONE, KeyAction::StartSearch);
        keys.bind(KeyCode::Backspace, KeyModifiers::NONE, KeyAction::Backspace);

        // Application
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}
