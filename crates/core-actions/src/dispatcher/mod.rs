//! Dispatcher applying [`EditAction`] to a [`TextBuffer`].
//!
//! Decomposed by concern:
//! * `edit`   - text mutation (insert / delete)
//! * `motion` - caret movement and selection extension
//! * `undo`   - undo / redo

use crate::EditAction;
use core_state::TextBuffer;

mod edit;
mod motion;
mod undo;

/// Result of dispatching a single action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// Content, caret or selection changed; the owner should repaint.
    pub dirty: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self { dirty: true }
    }

    pub fn clean() -> Self {
        Self { dirty: false }
    }

    fn from_changed(changed: bool) -> Self {
        Self { dirty: changed }
    }
}

pub fn dispatch(action: EditAction, buffer: &mut TextBuffer) -> DispatchResult {
    let op = action.name();
    let result = match action {
        EditAction::InsertText(text) => edit::insert_text(&text, buffer),
        EditAction::InsertNewline => edit::insert_text("\n", buffer),
        EditAction::DeleteBackward { word } => edit::delete_backward(word, buffer),
        EditAction::DeleteForward { word } => edit::delete_forward(word, buffer),
        EditAction::Move { motion, extend } => motion::handle_motion(motion, extend, buffer),
        EditAction::SelectAll => motion::select_all(buffer),
        EditAction::Undo => undo::handle_undo(buffer),
        EditAction::Redo => undo::handle_redo(buffer),
    };
    tracing::trace!(
        target: "actions.dispatch",
        op,
        dirty = result.dirty,
        cursor = buffer.cursor(),
        len = buffer.len(),
        "dispatch"
    );
    result
}
