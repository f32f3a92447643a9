//! Text mutation. Deletions step by grapheme cluster (or word) so a
//! combining sequence or emoji is never split.

use super::DispatchResult;
use core_state::TextBuffer;
use core_text::{boundary, grapheme};

pub(crate) fn insert_text(text: &str, buffer: &mut TextBuffer) -> DispatchResult {
    if text.is_empty() {
        return DispatchResult::clean();
    }
    buffer.replace_selection(text);
    DispatchResult::dirty()
}

pub(crate) fn delete_backward(word: bool, buffer: &mut TextBuffer) -> DispatchResult {
    if buffer.delete_selection() {
        return DispatchResult::dirty();
    }
    let cursor = buffer.cursor();
    if cursor == 0 {
        return DispatchResult::clean();
    }
    let start = if word {
        boundary::prev_word_start(buffer.content(), cursor)
    } else {
        grapheme::prev_boundary(buffer.content(), cursor)
    };
    buffer.delete_range(start, cursor);
    DispatchResult::dirty()
}

pub(crate) fn delete_forward(word: bool, buffer: &mut TextBuffer) -> DispatchResult {
    if buffer.delete_selection() {
        return DispatchResult::dirty();
    }
    let cursor = buffer.cursor();
    if cursor >= buffer.len() {
        return DispatchResult::clean();
    }
    let end = if word {
        boundary::next_word_end(buffer.content(), cursor)
    } else {
        grapheme::next_boundary(buffer.content(), cursor)
    };
    buffer.delete_range(cursor, end);
    DispatchResult::dirty()
}
