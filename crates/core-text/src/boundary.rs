//! Word and paragraph runs.
//!
//! Classification is deliberately simple and mirrors what a pointer user
//! expects from double / triple click:
//! * a *word* is a maximal run of non-whitespace codepoints;
//! * a run of whitespace (excluding `\n`) is selectable as a unit too;
//! * `\n` is a paragraph separator and always forms a run of its own.
//!
//! All ranges are half-open `[start, end)` codepoint offsets.

use std::ops::Range;

use crate::Text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Separator,
    Space,
    Word,
}

fn class_of(c: char) -> CharClass {
    if c == '\n' {
        CharClass::Separator
    } else if c.is_whitespace() {
        CharClass::Space
    } else {
        CharClass::Word
    }
}

/// The run under `offset`: the word containing it, or the whitespace run
/// when the offset lands on whitespace. An offset at the very end resolves
/// against the last codepoint. Empty text yields `0..0`.
pub fn word_at(text: &Text, offset: usize) -> Range<usize> {
    let len = text.len();
    if len == 0 {
        return 0..0;
    }
    let hit = offset.min(len - 1);
    let Some(c) = text.char_at(hit) else {
        return hit..hit;
    };
    let class = class_of(c);
    if class == CharClass::Separator {
        return hit..hit + 1;
    }
    let back = text
        .chars_before(hit)
        .take_while(|&c| class_of(c) == class)
        .count();
    let fwd = text
        .chars_from(hit)
        .take_while(|&c| class_of(c) == class)
        .count();
    hit - back..hit + fwd
}

/// The paragraph holding `offset`: maximal run between `\n` separators,
/// separators excluded.
pub fn paragraph_at(text: &Text, offset: usize) -> Range<usize> {
    let offset = text.clamp(offset);
    let back = text.chars_before(offset).take_while(|&c| c != '\n').count();
    let fwd = text.chars_from(offset).take_while(|&c| c != '\n').count();
    offset - back..offset + fwd
}

/// Start of the word before `offset`: skips whitespace backwards, then the
/// word itself (Ctrl+Left).
pub fn prev_word_start(text: &Text, offset: usize) -> usize {
    let offset = text.clamp(offset);
    let mut chars = text.chars_before(offset).peekable();
    let mut moved = 0usize;
    while chars.peek().is_some_and(|&c| class_of(c) != CharClass::Word) {
        chars.next();
        moved += 1;
    }
    while chars.peek().is_some_and(|&c| class_of(c) == CharClass::Word) {
        chars.next();
        moved += 1;
    }
    offset - moved
}

/// End of the word at or after `offset`: skips whitespace forwards, then the
/// word itself (Ctrl+Right).
pub fn next_word_end(text: &Text, offset: usize) -> usize {
    let offset = text.clamp(offset);
    let mut chars = text.chars_from(offset).peekable();
    let mut moved = 0usize;
    while chars.peek().is_some_and(|&c| class_of(c) != CharClass::Word) {
        chars.next();
        moved += 1;
    }
    while chars.peek().is_some_and(|&c| class_of(c) == CharClass::Word) {
        chars.next();
        moved += 1;
    }
    offset + moved
}
