//! Caret movement. Without Shift an existing selection collapses toward the
//! direction of travel instead of moving the caret.

use super::DispatchResult;
use crate::Motion;
use core_state::TextBuffer;
use core_text::{boundary, grapheme};

fn target(motion: Motion, buffer: &TextBuffer) -> usize {
    let text = buffer.content();
    let cursor = buffer.cursor();
    match motion {
        Motion::Left => grapheme::prev_boundary(text, cursor),
        Motion::Right => grapheme::next_boundary(text, cursor),
        Motion::WordLeft => boundary::prev_word_start(text, cursor),
        Motion::WordRight => boundary::next_word_end(text, cursor),
        Motion::Home => boundary::paragraph_at(text, cursor).start,
        Motion::End => boundary::paragraph_at(text, cursor).end,
        Motion::DocStart => 0,
        Motion::DocEnd => text.len(),
    }
}

pub(crate) fn handle_motion(motion: Motion, extend: bool, buffer: &mut TextBuffer) -> DispatchResult {
    let before = buffer.caret();
    if extend {
        let to = target(motion, buffer);
        buffer.extend_selection_to(to);
    } else {
        let to = match (motion, buffer.selection_range()) {
            (Motion::Left, Some((start, _))) => start,
            (Motion::Right, Some((_, end))) => end,
            _ => target(motion, buffer),
        };
        buffer.set_cursor(to);
    }
    DispatchResult::from_changed(buffer.caret() != before)
}

pub(crate) fn select_all(buffer: &mut TextBuffer) -> DispatchResult {
    let before = buffer.caret();
    buffer.select_all();
    DispatchResult::from_changed(buffer.caret() != before)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_collapses_selection_to_start() {
        let mut buf = TextBuffer::with_content("hello");
        buf.select(4, 1);
        handle_motion(Motion::Left, false, &mut buf);
        assert_eq!(buf.cursor(), 1);
        assert_eq!(buf.selection_range(), None);
    }

    #[test]
    fn shift_extends_from_anchor() {
        let mut buf = TextBuffer::with_content("hello world");
        buf.set_cursor(6);
        handle_motion(Motion::WordRight, true, &mut buf);
        handle_motion(Motion::Home, true, &mut buf);
        assert_eq!(buf.selection_range(), Some((0, 6)));
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn home_end_stay_in_paragraph() {
        let mut buf = TextBuffer::with_content("ab\ncdef\ngh");
        buf.set_cursor(5);
        handle_motion(Motion::End, false, &mut buf);
        assert_eq!(buf.cursor(), 7);
        handle_motion(Motion::Home, false, &mut buf);
        assert_eq!(buf.cursor(), 3);
    }
}
