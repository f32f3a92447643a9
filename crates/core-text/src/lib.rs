//! Rope-backed text content addressed by codepoint offsets.
//!
//! Every offset accepted or returned by this crate is a `char` index into the
//! content, never a byte index. Callers holding offsets from an older layout
//! (the text may have changed underneath them) are protected by clamping:
//! no method in this crate panics on an out-of-range offset.
//!
//! Modules:
//! * [`grapheme`] - cluster boundaries for caret movement.
//! * [`boundary`] - word / paragraph runs used by multi-click selection and
//!   word-wise motions.
//! * [`segment`] - grapheme segmentation with cell widths (measurement input)
//!   and NFC normalization of committed input.
//! * [`width`] - display cell width of a single grapheme cluster.

use std::fmt;

use ropey::Rope;

pub mod boundary;
pub mod segment;
pub mod width;

pub use width::egc_width;

/// Mutable text content. Cheap to clone (ropey shares chunks).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Text {
    rope: Rope,
}

impl Text {
    pub fn new() -> Self {
        Self::default()
    }

    /// Length in codepoints.
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Clamp an offset into `0..=len`.
    pub fn clamp(&self, offset: usize) -> usize {
        offset.min(self.len())
    }

    /// Clamp and order a range so that `start <= end <= len`.
    pub fn clamp_range(&self, start: usize, end: usize) -> (usize, usize) {
        let (a, b) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        (self.clamp(a), self.clamp(b))
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        if offset < self.len() {
            Some(self.rope.char(offset))
        } else {
            None
        }
    }

    /// Owned copy of `[start, end)` (clamped).
    pub fn slice(&self, start: usize, end: usize) -> String {
        let (s, e) = self.clamp_range(start, end);
        if s == e {
            return String::new();
        }
        self.rope.slice(s..e).to_string()
    }

    /// Insert `s` at `at` (clamped). Returns the offset actually used.
    pub fn insert(&mut self, at: usize, s: &str) -> usize {
        let at = self.clamp(at);
        if !s.is_empty() {
            self.rope.insert(at, s);
        }
        at
    }

    /// Remove `[start, end)` (clamped) and return the removed text.
    pub fn remove(&mut self, start: usize, end: usize) -> String {
        let (s, e) = self.clamp_range(start, end);
        if s == e {
            return String::new();
        }
        let removed = self.rope.slice(s..e).to_string();
        self.rope.remove(s..e);
        removed
    }

    /// Number of `\n`-separated paragraphs (an empty text has one).
    pub fn paragraph_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Start offset and owned content (including any trailing `\n`) of the
    /// paragraph holding `offset`.
    pub fn paragraph_containing(&self, offset: usize) -> (usize, String) {
        let offset = self.clamp(offset);
        let line = self.rope.char_to_line(offset);
        let start = self.rope.line_to_char(line);
        (start, self.rope.line(line).to_string())
    }

    /// Iterate codepoints starting at `offset` (clamped).
    pub fn chars_from(&self, offset: usize) -> impl Iterator<Item = char> + '_ {
        self.rope.chars_at(self.clamp(offset))
    }

    /// Iterate codepoints backwards, starting with the one before `offset`.
    pub fn chars_before(&self, offset: usize) -> impl Iterator<Item = char> + '_ {
        let mut chars = self.rope.chars_at(self.clamp(offset));
        std::iter::from_fn(move || chars.prev())
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Text {
    // Content stays out of debug output; only the shape is printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Text")
            .field("chars", &self.len())
            .field("paragraphs", &self.paragraph_count())
            .finish()
    }
}

/// Grapheme cluster boundaries expressed in codepoint offsets.
pub mod grapheme {
    use crate::Text;
    use unicode_segmentation::UnicodeSegmentation;

    /// Codepoint offsets at which each cluster of `s` starts.
    pub fn cluster_starts(s: &str) -> impl Iterator<Item = usize> + '_ {
        s.graphemes(true).scan(0usize, |acc, g| {
            let start = *acc;
            *acc += g.chars().count();
            Some(start)
        })
    }

    /// Next cluster boundary after `offset` (returns `len` at or beyond the end).
    pub fn next_boundary(text: &Text, offset: usize) -> usize {
        let len = text.len();
        if offset >= len {
            return len;
        }
        let (start, para) = text.paragraph_containing(offset);
        let rel = offset - start;
        cluster_starts(&para)
            .find(|&c| c > rel)
            .map(|c| start + c)
            .unwrap_or_else(|| start + para.chars().count())
    }

    /// Previous cluster boundary before `offset` (returns 0 at the start).
    pub fn prev_boundary(text: &Text, offset: usize) -> usize {
        let offset = text.clamp(offset);
        if offset == 0 {
            return 0;
        }
        // The cluster ending at `offset` lives in the paragraph of `offset - 1`.
        let (start, para) = text.paragraph_containing(offset - 1);
        let rel = offset - start;
        let mut last = 0;
        for c in cluster_starts(&para) {
            if c >= rel {
                break;
            }
            last = c;
        }
        start + last
    }

    /// Snap `offset` back onto the start of the cluster containing it.
    pub fn snap(text: &Text, offset: usize) -> usize {
        let offset = text.clamp(offset);
        if offset == 0 || offset == text.len() {
            return offset;
        }
        let next = next_boundary(text, offset);
        let prev = prev_boundary(text, next);
        if prev <= offset { prev } else { offset }
    }
}
