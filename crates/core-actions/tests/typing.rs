mod common;

use common::{press, type_text};
use core_actions::KeyTranslator;
use core_state::TextBuffer;
use pretty_assertions::assert_eq;

#[test]
fn type_edit_undo_redo() {
    let t = KeyTranslator::multiline();
    let mut buf = TextBuffer::new();
    type_text(t, &mut buf, "ab");
    press(t, &mut buf, &["Enter"]);
    type_text(t, &mut buf, "cd");
    press(t, &mut buf, &["Backspace"]);
    assert_eq!(buf.content().to_string(), "ab\nc");
    assert_eq!(buf.cursor(), 4);

    press(t, &mut buf, &["Ctrl+z", "Ctrl+z"]);
    assert_eq!(buf.content().to_string(), "ab\nc");

    press(t, &mut buf, &["Ctrl+y"]);
    assert_eq!(buf.content().to_string(), "ab\ncd");
    press(t, &mut buf, &["Ctrl+Shift+z"]);
    assert_eq!(buf.content().to_string(), "ab\nc");
    assert!(!buf.can_redo());
}

#[test]
fn single_line_ignores_enter() {
    let t = KeyTranslator::single_line();
    let mut buf = TextBuffer::with_content("run");
    buf.set_cursor(3);
    assert_eq!(press(t, &mut buf, &["Enter"]), 0);
    assert_eq!(buf.content().to_string(), "run");
}

#[test]
fn select_all_then_type_replaces_everything() {
    let t = KeyTranslator::single_line();
    let mut buf = TextBuffer::with_content("old text");
    press(t, &mut buf, &["Ctrl+a"]);
    assert_eq!(buf.selected_text().as_deref(), Some("old text"));
    type_text(t, &mut buf, "n");
    assert_eq!(buf.content().to_string(), "n");

    press(t, &mut buf, &["Ctrl+z"]);
    assert_eq!(buf.content().to_string(), "old text");
    assert_eq!(buf.selection_range(), Some((0, 8)));
}

#[test]
fn word_backspace_then_undo_restores_cursor() {
    let t = KeyTranslator::single_line();
    let mut buf = TextBuffer::with_content("launch firefox");
    press(t, &mut buf, &["End"]);
    assert_eq!(buf.cursor(), 14);
    press(t, &mut buf, &["Ctrl+Backspace"]);
    assert_eq!(buf.content().to_string(), "launch ");
    press(t, &mut buf, &["Ctrl+z"]);
    assert_eq!(buf.content().to_string(), "launch firefox");
    assert_eq!(buf.cursor(), 14);
}
