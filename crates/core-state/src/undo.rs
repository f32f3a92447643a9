use core_text::Text;
use tracing::trace;

use crate::Caret;

/// Classification of a recorded edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UndoKind {
    Insert,
    Delete,
    Replace,
    /// Cursor / selection move without content change.
    Cursor,
}

/// A reversible record of one buffer mutation.
///
/// Content is restored by removing `inserted_text` at `at` and putting
/// `replaced_text` back (undo), or the opposite (redo). The caret snapshots
/// restore the exact cursor and selection anchor on either side of the edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UndoAction {
    pub kind: UndoKind,
    pub at: usize,
    pub inserted_text: String,
    pub replaced_text: String,
    pub cursor_before: usize,
    pub cursor_after: usize,
    /// Selection anchor before the edit (`None` = no selection).
    pub selection_before: Option<usize>,
    /// Selection anchor after the edit.
    pub selection_after: Option<usize>,
}

impl UndoAction {
    pub fn new(kind: UndoKind, at: usize, before: Caret, after: Caret) -> Self {
        Self {
            kind,
            at,
            inserted_text: String::new(),
            replaced_text: String::new(),
            cursor_before: before.cursor,
            cursor_after: after.cursor,
            selection_before: before.anchor,
            selection_after: after.anchor,
        }
    }

    pub fn with_inserted(mut self, text: impl Into<String>) -> Self {
        self.inserted_text = text.into();
        self
    }

    pub fn with_replaced(mut self, text: impl Into<String>) -> Self {
        self.replaced_text = text.into();
        self
    }

    pub fn caret_before(&self) -> Caret {
        Caret {
            cursor: self.cursor_before,
            anchor: self.selection_before,
        }
    }

    pub fn caret_after(&self) -> Caret {
        Caret {
            cursor: self.cursor_after,
            anchor: self.selection_after,
        }
    }

    fn revert(&self, text: &mut Text) {
        let inserted = self.inserted_text.chars().count();
        text.remove(self.at, self.at + inserted);
        text.insert(self.at, &self.replaced_text);
    }

    fn reapply(&self, text: &mut Text) {
        let replaced = self.replaced_text.chars().count();
        text.remove(self.at, self.at + replaced);
        text.insert(self.at, &self.inserted_text);
    }
}

/// Retention and coalescing policy for an [`UndoManager`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UndoPolicy {
    /// Maximum retained undo actions; `None` keeps everything.
    pub history_limit: Option<usize>,
    /// Merge consecutive recorded cursor moves into a single action.
    pub coalesce_cursor: bool,
}

impl Default for UndoPolicy {
    fn default() -> Self {
        Self {
            history_limit: None,
            coalesce_cursor: true,
        }
    }
}

/// Undo / redo stacks (most recent last).
#[derive(Debug, Default, Clone)]
pub struct UndoManager {
    undo_stack: Vec<UndoAction>,
    redo_stack: Vec<UndoAction>,
    policy: UndoPolicy,
}

impl UndoManager {
    pub fn new(policy: UndoPolicy) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> UndoPolicy {
        self.policy
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn undo_stack(&self) -> &[UndoAction] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[UndoAction] {
        &self.redo_stack
    }

    /// Record a freshly applied action. Always invalidates redo history.
    pub fn push(&mut self, action: UndoAction) {
        let coalesce = self.policy.coalesce_cursor
            && action.kind == UndoKind::Cursor
            && self
                .undo_stack
                .last()
                .is_some_and(|last| last.kind == UndoKind::Cursor);
        if coalesce {
            if let Some(last) = self.undo_stack.last_mut() {
                last.cursor_after = action.cursor_after;
                last.selection_after = action.selection_after;
            }
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), "cursor_coalesced");
        } else {
            trace!(
                target: "state.undo",
                kind = ?action.kind,
                at = action.at,
                inserted = action.inserted_text.chars().count(),
                replaced = action.replaced_text.chars().count(),
                undo_depth = self.undo_stack.len() + 1,
                "push_action"
            );
            self.undo_stack.push(action);
            if let Some(limit) = self.policy.history_limit
                && self.undo_stack.len() > limit
            {
                let excess = self.undo_stack.len() - limit;
                self.undo_stack.drain(..excess);
                trace!(target: "state.undo", excess, "undo_stack_trimmed");
            }
        }
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    /// Pop the newest action, revert it on `text` and restore its "before"
    /// caret. Returns `false` (no-op) when there is nothing to undo.
    pub fn undo(&mut self, text: &mut Text, caret: &mut Caret) -> bool {
        let Some(action) = self.undo_stack.pop() else {
            return false;
        };
        action.revert(text);
        *caret = action.caret_before().clamped(text.len());
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len() + 1, kind = ?action.kind, "undo_pop");
        self.redo_stack.push(action);
        true
    }

    /// Re-apply the newest undone action and restore its "after" caret.
    pub fn redo(&mut self, text: &mut Text, caret: &mut Caret) -> bool {
        let Some(action) = self.redo_stack.pop() else {
            return false;
        };
        action.reapply(text);
        *caret = action.caret_after().clamped(text.len());
        trace!(target: "state.undo", undo_depth = self.undo_stack.len() + 1, redo_depth = self.redo_stack.len(), kind = ?action.kind, "redo_pop");
        self.undo_stack.push(action);
        true
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caret(cursor: usize) -> Caret {
        Caret {
            cursor,
            anchor: None,
        }
    }

    #[test]
    fn revert_and_reapply_replace() {
        let mut text = Text::from("abXYef");
        let action = UndoAction::new(UndoKind::Replace, 2, caret(2), caret(4))
            .with_inserted("XY")
            .with_replaced("cd");
        action.revert(&mut text);
        assert_eq!(text.to_string(), "abcdef");
        action.reapply(&mut text);
        assert_eq!(text.to_string(), "abXYef");
    }

    #[test]
    fn cursor_actions_coalesce() {
        let mut mgr = UndoManager::new(UndoPolicy::default());
        mgr.push(UndoAction::new(UndoKind::Cursor, 0, caret(0), caret(1)));
        mgr.push(UndoAction::new(UndoKind::Cursor, 0, caret(1), caret(3)));
        assert_eq!(mgr.undo_depth(), 1);
        assert_eq!(mgr.undo_stack()[0].cursor_before, 0);
        assert_eq!(mgr.undo_stack()[0].cursor_after, 3);
    }

    #[test]
    fn cursor_actions_kept_apart_without_coalescing() {
        let mut mgr = UndoManager::new(UndoPolicy {
            history_limit: None,
            coalesce_cursor: false,
        });
        mgr.push(UndoAction::new(UndoKind::Cursor, 0, caret(0), caret(1)));
        mgr.push(UndoAction::new(UndoKind::Cursor, 0, caret(1), caret(3)));
        assert_eq!(mgr.undo_depth(), 2);
    }

    #[test]
    fn history_limit_drops_oldest() {
        let mut mgr = UndoManager::new(UndoPolicy {
            history_limit: Some(2),
            coalesce_cursor: true,
        });
        for i in 0..5 {
            mgr.push(UndoAction::new(UndoKind::Insert, i, caret(i), caret(i + 1)).with_inserted("x"));
        }
        assert_eq!(mgr.undo_depth(), 2);
        assert_eq!(mgr.undo_stack()[0].at, 3);
    }

    #[test]
    fn empty_stacks_are_noops() {
        let mut mgr = UndoManager::default();
        let mut text = Text::from("abc");
        let mut c = caret(2);
        assert!(!mgr.undo(&mut text, &mut c));
        assert!(!mgr.redo(&mut text, &mut c));
        assert_eq!(text.to_string(), "abc");
        assert_eq!(c.cursor, 2);
    }
}
