//! Messages produced by key handling and consumed by [`crate::handler::update`]

use crate::storage::MruList;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Exit the application
    Quit,

    // ─────────────────────────────────────────────────────────
    // Main form
    // ─────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    /// Cycle the focused dropdown forward
    SelectNext,
    /// Cycle the focused dropdown backward
    SelectPrev,
    /// Append to the focused text field
    InputChar(char),
    /// Remove the last character of the focused text field
    InputBackspace,
    /// Empty the focused text field
    InputClear,
    Submit,
    ClearStorage,

    // ─────────────────────────────────────────────────────────
    // Add-value screens
    // ─────────────────────────────────────────────────────────
    OpenAddValue(MruList),
    CloseAddValue,
    SaveValue,
}
