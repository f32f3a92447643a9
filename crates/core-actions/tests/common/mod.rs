#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchResult, KeyTranslator, dispatch};
use core_events::{KeyEvent, parse_chord};
use core_state::TextBuffer;

pub fn chord(s: &str) -> KeyEvent {
    parse_chord(s).unwrap_or_else(|e| panic!("bad chord {s:?}: {e}"))
}

/// Feed chords through the translator and dispatcher; returns how many
/// produced a dirty result.
pub fn press(translator: KeyTranslator, buffer: &mut TextBuffer, chords: &[&str]) -> usize {
    chords
        .iter()
        .filter_map(|c| translator.translate(&chord(c)))
        .map(|action| dispatch(action, buffer))
        .filter(|r: &DispatchResult| r.dirty)
        .count()
}

/// Type literal text one character at a time.
pub fn type_text(translator: KeyTranslator, buffer: &mut TextBuffer, text: &str) {
    for c in text.chars() {
        if let Some(action) = translator.translate(&KeyEvent::char(c)) {
            dispatch(action, buffer);
        }
    }
}
