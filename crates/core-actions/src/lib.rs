//! Key handling for editable text: translation of key events into
//! [`EditAction`]s and their application to a [`core_state::TextBuffer`].

pub mod dispatcher;
pub mod key_translator;

pub use dispatcher::{DispatchResult, dispatch};
pub use key_translator::KeyTranslator;

/// Caret movement target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// One grapheme cluster left.
    Left,
    Right,
    WordLeft,
    WordRight,
    /// Start of the current paragraph.
    Home,
    End,
    DocStart,
    DocEnd,
}

/// Logical editing operation produced from a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// Committed text (already NFC normalised); replaces the selection.
    InsertText(String),
    InsertNewline,
    /// Backspace; `word` deletes to the previous word start.
    DeleteBackward { word: bool },
    DeleteForward { word: bool },
    /// `extend` keeps the selection anchor (Shift held).
    Move { motion: Motion, extend: bool },
    SelectAll,
    Undo,
    Redo,
}

impl EditAction {
    /// Short name for logs (never includes inserted text).
    pub fn name(&self) -> &'static str {
        match self {
            EditAction::InsertText(_) => "insert_text",
            EditAction::InsertNewline => "insert_newline",
            EditAction::DeleteBackward { .. } => "delete_backward",
            EditAction::DeleteForward { .. } => "delete_forward",
            EditAction::Move { .. } => "move",
            EditAction::SelectAll => "select_all",
            EditAction::Undo => "undo",
            EditAction::Redo => "redo",
        }
    }
}
