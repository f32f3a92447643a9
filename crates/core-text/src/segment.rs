//! Segmentation and normalization adapter.
//!
//! Contract:
//! - [`segment`] splits a string into grapheme clusters carrying absolute
//!   *codepoint* offsets and a display cell width. Offsets index the input as
//!   given (no normalization), so they line up with buffer offsets.
//! - [`normalize`] converts committed input (typed text, IME commits, paste)
//!   to NFC before it reaches a buffer.
//! - Does not log content; callers log lengths only.

use crate::egc_width;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub cluster: String,
    pub start: usize, // codepoint offset (inclusive)
    pub end: usize,   // codepoint offset (exclusive)
    pub width: u16,   // display cells
}

/// Segment into grapheme clusters with widths and codepoint ranges.
pub fn segment(input: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut offset = 0usize;
    for g in input.graphemes(true) {
        let len = g.chars().count();
        out.push(Segment {
            cluster: g.to_string(),
            start: offset,
            end: offset + len,
            width: egc_width(g),
        });
        offset += len;
    }
    out
}

/// Normalize committed input to NFC.
pub fn normalize(input: &str) -> String {
    input.nfc().collect()
}
