//! Multi-click classification.
//!
//! Presses closer together than the threshold extend a sequence whose count
//! cycles 1 -> 2 -> 3 -> 1. The count picks the selection granularity.
//! Timestamps are supplied by the caller so sequences are deterministic in
//! tests.

use tracing::trace;

pub const DEFAULT_MULTI_CLICK_MS: u64 = 400;

/// Selection unit chosen by the click count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    #[default]
    Character,
    Word,
    Paragraph,
}

impl Granularity {
    pub fn from_count(count: u8) -> Self {
        match count {
            2 => Granularity::Word,
            3 => Granularity::Paragraph,
            _ => Granularity::Character,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickClassifier {
    threshold_ms: u64,
    last_ms: Option<u64>,
    count: u8,
}

impl Default for ClickClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_MULTI_CLICK_MS)
    }
}

impl ClickClassifier {
    pub fn new(threshold_ms: u64) -> Self {
        Self {
            threshold_ms,
            last_ms: None,
            count: 0,
        }
    }

    pub fn threshold_ms(&self) -> u64 {
        self.threshold_ms
    }

    /// Count of the most recent press (0 before the first one).
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Register a press at `now_ms` and return its count in `1..=3`.
    ///
    /// A clock that runs backwards starts a new sequence.
    pub fn classify(&mut self, now_ms: u64) -> u8 {
        let within = self
            .last_ms
            .and_then(|last| now_ms.checked_sub(last))
            .is_some_and(|gap| gap < self.threshold_ms);
        self.count = if within { self.count % 3 + 1 } else { 1 };
        self.last_ms = Some(now_ms);
        trace!(target: "select.click", now_ms, count = self.count, within, "classify");
        self.count
    }

    /// Forget the current sequence; the next press counts as 1.
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_cycle_and_reset() {
        let mut c = ClickClassifier::new(400);
        let t = 10_000;
        assert_eq!(c.classify(t), 1);
        assert_eq!(c.classify(t + 100), 2);
        assert_eq!(c.classify(t + 200), 3);
        assert_eq!(c.classify(t + 250), 1);
        assert_eq!(c.classify(t + 900), 1);
    }

    #[test]
    fn gap_equal_to_threshold_starts_new_sequence() {
        let mut c = ClickClassifier::new(400);
        assert_eq!(c.classify(0), 1);
        assert_eq!(c.classify(399), 2);
        assert_eq!(c.classify(799), 1);
    }

    #[test]
    fn backwards_clock_and_reset() {
        let mut c = ClickClassifier::default();
        c.classify(1_000);
        assert_eq!(c.classify(900), 1);
        c.classify(950);
        c.reset();
        assert_eq!(c.count(), 0);
        assert_eq!(c.classify(960), 1);
    }

    #[test]
    fn granularity_from_count() {
        assert_eq!(Granularity::from_count(1), Granularity::Character);
        assert_eq!(Granularity::from_count(2), Granularity::Word);
        assert_eq!(Granularity::from_count(3), Granularity::Paragraph);
    }
}
