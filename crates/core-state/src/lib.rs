//! Editable text buffer: content, cursor, selection anchor and undo history.
//!
//! A `TextBuffer` backs every text-bearing widget. It is created with the
//! widget, destroyed with it, and may be swapped wholesale by the owning
//! application (a calendar view re-pointing its notes widget at another day's
//! buffer). Pointer-driven selection code never owns a buffer; it holds a
//! [`WeakBuffer`] and checks liveness before touching it.
//!
//! Invariants (hold after every public call):
//! * `0 <= cursor <= len` and, when present, `0 <= anchor <= len`.
//! * Every change to content pushes exactly one [`UndoAction`].
//! * Any new edit (not an undo/redo) clears the redo stack.
//!
//! Offsets are codepoint indices. Out-of-range offsets are clamped, swapped
//! range endpoints are reordered; no edit entry point can fail.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use core_text::Text;
use tracing::trace;

pub mod undo;
pub use undo::{UndoAction, UndoKind, UndoManager, UndoPolicy};

/// Cursor offset plus optional selection anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Caret {
    pub cursor: usize,
    pub anchor: Option<usize>,
}

impl Caret {
    pub fn at(cursor: usize) -> Self {
        Self {
            cursor,
            anchor: None,
        }
    }

    /// Ordered `[start, end)` of the selection, `None` when there is no
    /// anchor or the range is empty.
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    pub fn clamped(self, len: usize) -> Self {
        Self {
            cursor: self.cursor.min(len),
            anchor: self.anchor.map(|a| a.min(len)),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct TextBuffer {
    text: Text,
    caret: Caret,
    history: UndoManager,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-filled with `content`; the cursor starts at offset 0 and the
    /// initial content is not undoable.
    pub fn with_content(content: &str) -> Self {
        Self {
            text: Text::from(content),
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: UndoPolicy) -> Self {
        self.history = UndoManager::new(policy);
        self
    }

    pub fn content(&self) -> &Text {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.caret.cursor
    }

    pub fn selection_anchor(&self) -> Option<usize> {
        self.caret.anchor
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    /// Ordered non-empty selection range.
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        self.caret.selection()
    }

    pub fn selected_text(&self) -> Option<String> {
        self.selection_range()
            .map(|(start, end)| self.text.slice(start, end))
    }

    pub fn history(&self) -> &UndoManager {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.undo_depth() > 0
    }

    pub fn can_redo(&self) -> bool {
        self.history.redo_depth() > 0
    }

    // ------------------------------------------------------------------
    // Content mutation (each records one UndoAction)
    // ------------------------------------------------------------------

    /// Insert `s` at `at` (clamped). The cursor ends after the inserted text
    /// and any selection is dropped. Inserting nothing records nothing.
    pub fn insert(&mut self, s: &str, at: usize) {
        if s.is_empty() {
            return;
        }
        let before = self.caret;
        let at = self.text.insert(at, s);
        let inserted = s.chars().count();
        self.caret = Caret::at(at + inserted);
        trace!(target: "text.buffer", op = "insert", at, len = inserted, "edit");
        self.history.push(
            UndoAction::new(UndoKind::Insert, at, before, self.caret).with_inserted(s),
        );
    }

    /// Delete `[start, end)` (clamped, endpoints reordered). A cursor inside
    /// the range collapses to `start`, one after it shifts left.
    pub fn delete_range(&mut self, start: usize, end: usize) {
        let (start, end) = self.text.clamp_range(start, end);
        if start == end {
            return;
        }
        let before = self.caret;
        let removed = self.text.remove(start, end);
        let cursor = shift_for_delete(before.cursor, start, end);
        self.caret = Caret::at(cursor);
        trace!(target: "text.buffer", op = "delete", start, len = end - start, "edit");
        self.history.push(
            UndoAction::new(UndoKind::Delete, start, before, self.caret).with_replaced(removed),
        );
    }

    /// Replace `[start, end)` with `s` as a single undoable step.
    pub fn replace_range(&mut self, start: usize, end: usize, s: &str) {
        let (start, end) = self.text.clamp_range(start, end);
        if start == end {
            self.insert(s, start);
            return;
        }
        if s.is_empty() {
            self.delete_range(start, end);
            return;
        }
        let before = self.caret;
        let removed = self.text.remove(start, end);
        self.text.insert(start, s);
        let inserted = s.chars().count();
        self.caret = Caret::at(start + inserted);
        trace!(target: "text.buffer", op = "replace", start, removed = end - start, inserted, "edit");
        self.history.push(
            UndoAction::new(UndoKind::Replace, start, before, self.caret)
                .with_inserted(s)
                .with_replaced(removed),
        );
    }

    /// Type `s`: replaces the selection when there is one, else inserts at
    /// the cursor.
    pub fn replace_selection(&mut self, s: &str) {
        match self.selection_range() {
            Some((start, end)) => self.replace_range(start, end, s),
            None => self.insert(s, self.caret.cursor),
        }
    }

    /// Delete the selection, if any. Returns whether anything was removed.
    pub fn delete_selection(&mut self) -> bool {
        match self.selection_range() {
            Some((start, end)) => {
                self.delete_range(start, end);
                true
            }
            None => false,
        }
    }

    /// Replace the whole content (undoable).
    pub fn set_text(&mut self, s: &str) {
        let len = self.text.len();
        self.replace_range(0, len, s);
    }

    // ------------------------------------------------------------------
    // Caret (not recorded unless asked)
    // ------------------------------------------------------------------

    /// Move the cursor (clamped) and drop the selection.
    pub fn set_cursor(&mut self, offset: usize) {
        self.caret = Caret::at(self.text.clamp(offset));
    }

    /// Move the cursor and record the move as an undoable `Cursor` action.
    pub fn set_cursor_recorded(&mut self, offset: usize) {
        let before = self.caret;
        self.set_cursor(offset);
        if before != self.caret {
            self.history.push(UndoAction::new(
                UndoKind::Cursor,
                self.caret.cursor,
                before,
                self.caret,
            ));
        }
    }

    /// Select `[anchor, cursor)` in either direction (both clamped).
    pub fn select(&mut self, anchor: usize, cursor: usize) {
        self.caret = Caret {
            cursor: self.text.clamp(cursor),
            anchor: Some(self.text.clamp(anchor)),
        };
    }

    /// Move the cursor keeping (or starting) the selection anchor.
    pub fn extend_selection_to(&mut self, offset: usize) {
        let anchor = self.caret.anchor.unwrap_or(self.caret.cursor);
        self.select(anchor, offset);
    }

    pub fn select_all(&mut self) {
        self.select(0, self.text.len());
    }

    pub fn clear_selection(&mut self) {
        self.caret.anchor = None;
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.text, &mut self.caret)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.text, &mut self.caret)
    }
}

fn shift_for_delete(cursor: usize, start: usize, end: usize) -> usize {
    if cursor >= end {
        cursor - (end - start)
    } else if cursor > start {
        start
    } else {
        cursor
    }
}

/// Owning handle to a buffer shared between a widget and its owner.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<TextBuffer>>);

impl SharedBuffer {
    pub fn new(buffer: TextBuffer) -> Self {
        Self(Rc::new(RefCell::new(buffer)))
    }

    pub fn downgrade(&self) -> WeakBuffer {
        WeakBuffer(Rc::downgrade(&self.0))
    }

    pub fn borrow(&self) -> Ref<'_, TextBuffer> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, TextBuffer> {
        self.0.borrow_mut()
    }

    pub fn with<R>(&self, f: impl FnOnce(&TextBuffer) -> R) -> R {
        f(&self.0.borrow())
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut TextBuffer) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    pub fn ptr_eq(&self, other: &SharedBuffer) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<TextBuffer> for SharedBuffer {
    fn from(buffer: TextBuffer) -> Self {
        Self::new(buffer)
    }
}

/// Non-owning handle. Upgrading fails once every [`SharedBuffer`] is gone.
#[derive(Debug, Clone, Default)]
pub struct WeakBuffer(Weak<RefCell<TextBuffer>>);

impl WeakBuffer {
    pub fn upgrade(&self) -> Option<SharedBuffer> {
        self.0.upgrade().map(SharedBuffer)
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Run `f` against the buffer if it is still alive.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut TextBuffer) -> R) -> Option<R> {
        self.upgrade().map(|shared| shared.with_mut(f))
    }

    /// Both handles point at the same buffer allocation.
    pub fn ptr_eq(&self, other: &WeakBuffer) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }
}
