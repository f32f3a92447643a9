//! Display width of a single grapheme cluster (EGC), in cells.
//!
//! One authoritative function, [`egc_width`], used by the monospace
//! measurement service. It wraps `unicode_width` with a small heuristic
//! classifier because the baseline crate under-measures several emoji
//! sequences.
//!
//! Precedence:
//! 1. Classifier (semantic kind -> width mapping).
//! 2. Conservative widen fallback (pictographic signal but width 1).
//!
//! The classifier favours over-estimation: an extra blank cell is harmless,
//! under-estimation makes hit testing drift away from what is drawn.

use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EgcKind {
    Narrow,
    Wide,
    Emoji,
    Combining(bool), // bool: base is wide or pictographic
    Control,
}

const KEYCAP_COMBINING: char = '\u{20E3}';

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

// Rough Extended Pictographic heuristic (main emoji blocks + misc symbols).
fn is_extended_pictographic(c: char) -> bool {
    ('\u{1F300}'..='\u{1FAFF}').contains(&c) || ('\u{2600}'..='\u{27BF}').contains(&c)
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
        || ('\u{1AB0}'..='\u{1AFF}').contains(&c)
        || ('\u{1DC0}'..='\u{1DFF}').contains(&c)
        || ('\u{20D0}'..='\u{20FF}').contains(&c)
        || ('\u{FE20}'..='\u{FE2F}').contains(&c)
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

fn classify(egc: &str) -> EgcKind {
    let mut chars = egc.chars();
    let Some(first) = chars.next() else {
        return EgcKind::Control;
    };
    if first.is_control() {
        return EgcKind::Control;
    }
    let single = chars.next().is_none();
    if single {
        if is_extended_pictographic(first) {
            return EgcKind::Emoji;
        }
        return if char_width(first) == 2 {
            EgcKind::Wide
        } else {
            EgcKind::Narrow
        };
    }

    let mut count_ep = 0usize;
    let mut count_ri = 0usize;
    let mut has_combining = false;
    let mut ends_with_keycap = false;
    let mut any_wide = false;
    let base_wide = is_extended_pictographic(first) || char_width(first) == 2;

    for c in egc.chars() {
        if is_extended_pictographic(c) {
            count_ep += 1;
        }
        if is_regional_indicator(c) {
            count_ri += 1;
        }
        if is_combining_mark(c) {
            has_combining = true;
        }
        ends_with_keycap = c == KEYCAP_COMBINING;
        if char_width(c) == 2 {
            any_wide = true;
        }
    }

    // keycaps, flags, ZWJ families and modifier sequences all render as one wide glyph
    if ends_with_keycap || count_ri == 2 || count_ep >= 1 {
        return EgcKind::Emoji;
    }
    if has_combining {
        return EgcKind::Combining(base_wide);
    }
    if any_wide {
        return EgcKind::Wide;
    }
    EgcKind::Narrow
}

/// Cell width of one grapheme cluster. Control clusters (including `\n`)
/// occupy no cells.
pub fn egc_width(egc: &str) -> u16 {
    match classify(egc) {
        EgcKind::Narrow => 1,
        EgcKind::Wide | EgcKind::Emoji => 2,
        EgcKind::Combining(true) => 2,
        EgcKind::Combining(false) => 1,
        EgcKind::Control => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_and_cjk() {
        assert_eq!(egc_width("a"), 1);
        assert_eq!(egc_width("漢"), 2);
    }

    #[test]
    fn emoji_sequences_are_wide() {
        assert_eq!(egc_width("😀"), 2);
        assert_eq!(egc_width("👨\u{200D}👩\u{200D}👧"), 2);
        assert_eq!(egc_width("🇯🇵"), 2);
        assert_eq!(egc_width("1\u{FE0F}\u{20E3}"), 2);
    }

    #[test]
    fn combining_follows_base() {
        assert_eq!(egc_width("e\u{0301}"), 1);
    }

    #[test]
    fn controls_take_no_cells() {
        assert_eq!(egc_width("\n"), 0);
        assert_eq!(egc_width("\r\n"), 0);
        assert_eq!(egc_width(""), 0);
    }
}
