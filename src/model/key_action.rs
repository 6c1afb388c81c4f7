//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Each mode decides what an action means for it; text fields read raw
/// characters before bindings are consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Move the cursor up one row. Default: k/↑
    MoveUp,
    /// Move the cursor down one row. Default: j/↓
    MoveDown,
    /// Move the cursor up one page. Default: Page Up/Ctrl+u
    PageUp,
    /// Move the cursor down one page. Default: Page Down/Ctrl+d
    PageDown,
    /// Focus the next field or column. Default: Tab/→/l
    FocusNext,
    /// Focus the previous field or column. Default: Shift+Tab/←/h
    FocusPrev,
    /// Activate or save. Default: Enter
    Confirm,
    /// Toggle the row under the cursor. Default: Space
    Toggle,
    /// Toggle every option. Default: Ctrl+a
    ToggleAll,
    /// Leave the current mode without saving. Default: Esc
    Cancel,
    /// Start typing a cache search. Default: /
    StartSearch,
    /// Delete the last typed character. Default: Backspace
    Backspace,
    /// Exit the application. Default: Ctrl+c
    Quit,
}
