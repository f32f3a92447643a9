//! Property tests for the undo / redo history.

use core_state::{Caret, TextBuffer, UndoKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Edit {
    Insert { text: String, at: usize },
    Delete { start: usize, end: usize },
    Replace { start: usize, end: usize, text: String },
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    let text = "[a-zé漢 \n]{0,6}";
    prop_oneof![
        (text, 0usize..40).prop_map(|(text, at)| Edit::Insert { text, at }),
        (0usize..40, 0usize..40).prop_map(|(start, end)| Edit::Delete { start, end }),
        (0usize..40, 0usize..40, text)
            .prop_map(|(start, end, text)| Edit::Replace { start, end, text }),
    ]
}

fn apply(buffer: &mut TextBuffer, edit: &Edit) {
    match edit {
        Edit::Insert { text, at } => buffer.insert(text, *at),
        Edit::Delete { start, end } => buffer.delete_range(*start, *end),
        Edit::Replace { start, end, text } => buffer.replace_range(*start, *end, text),
    }
}

fn snapshot(buffer: &TextBuffer) -> (String, Caret) {
    (buffer.content().to_string(), buffer.caret())
}

proptest! {
    #[test]
    fn undo_all_restores_initial_and_redo_all_replays(
        initial in "[a-z \n]{0,20}",
        start_cursor in 0usize..25,
        edits in proptest::collection::vec(edit_strategy(), 0..24),
    ) {
        let mut buffer = TextBuffer::with_content(&initial);
        buffer.set_cursor(start_cursor);
        let before = snapshot(&buffer);

        for edit in &edits {
            apply(&mut buffer, edit);
        }
        let after = snapshot(&buffer);

        while buffer.undo() {}
        prop_assert_eq!(snapshot(&buffer), before);
        prop_assert_eq!(buffer.history().undo_depth(), 0);

        while buffer.redo() {}
        prop_assert_eq!(snapshot(&buffer), after);
        prop_assert_eq!(buffer.history().redo_depth(), 0);
    }

    #[test]
    fn new_edit_after_undo_invalidates_redo(
        initial in "[a-z]{1,12}",
        edits in proptest::collection::vec(edit_strategy(), 1..10),
        extra in "[a-z]{1,3}",
    ) {
        let mut buffer = TextBuffer::with_content(&initial);
        for edit in &edits {
            apply(&mut buffer, edit);
        }
        if buffer.undo() {
            prop_assert!(buffer.can_redo());
            buffer.insert(&extra, 0);
            prop_assert_eq!(buffer.history().redo_depth(), 0);
            let snap = snapshot(&buffer);
            prop_assert!(!buffer.redo());
            prop_assert_eq!(snapshot(&buffer), snap);
        }
    }

    #[test]
    fn cursor_stays_in_bounds(
        initial in "[a-z \n]{0,20}",
        edits in proptest::collection::vec(edit_strategy(), 0..24),
    ) {
        let mut buffer = TextBuffer::with_content(&initial);
        for edit in &edits {
            apply(&mut buffer, edit);
            prop_assert!(buffer.cursor() <= buffer.len());
            if let Some(anchor) = buffer.selection_anchor() {
                prop_assert!(anchor <= buffer.len());
            }
        }
    }
}

#[test]
fn hello_world_scenario() {
    let mut buffer = TextBuffer::with_content("hello world");
    buffer.set_cursor(3);

    buffer.insert(" there", 5);
    assert_eq!(buffer.content().to_string(), "hello there world");
    assert_eq!(buffer.history().undo_depth(), 1);
    assert_eq!(buffer.history().undo_stack()[0].kind, UndoKind::Insert);
    assert_eq!(buffer.history().undo_stack()[0].inserted_text, " there");

    assert!(buffer.undo());
    assert_eq!(buffer.content().to_string(), "hello world");
    assert_eq!(buffer.cursor(), 3);
    assert_eq!(buffer.history().redo_depth(), 1);

    assert!(buffer.redo());
    assert_eq!(buffer.content().to_string(), "hello there world");
    assert_eq!(buffer.cursor(), 11);
}

#[test]
fn undo_on_fresh_buffer_is_noop() {
    let mut buffer = TextBuffer::with_content("abc");
    assert!(!buffer.undo());
    assert!(!buffer.redo());
    assert_eq!(buffer.content().to_string(), "abc");
}
