//! Undo / redo handling.

use super::DispatchResult;
use core_state::TextBuffer;

pub(crate) fn handle_undo(buffer: &mut TextBuffer) -> DispatchResult {
    let applied = buffer.undo();
    tracing::trace!(target: "actions.dispatch", op = "undo", applied, "undo");
    DispatchResult::from_changed(applied)
}

pub(crate) fn handle_redo(buffer: &mut TextBuffer) -> DispatchResult {
    let applied = buffer.redo();
    tracing::trace!(target: "actions.dispatch", op = "redo", applied, "redo");
    DispatchResult::from_changed(applied)
}
