//! Layout cache.
//!
//! Keyed by `(content hash, max_width, style)`; the hash is ahash64 over
//! the UTF-8 content with its length folded in to cut collisions. Entries
//! are shared out as `Rc` so a widget can keep using a layout while the
//! cache is flushed underneath it.

use ahash::{AHashMap, AHasher};
use core_layout::TextStyle;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use tracing::debug;

pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutKey {
    pub content_hash: u64,
    pub len: usize,
    pub max_width: Option<i32>,
    pub style: TextStyle,
}

impl LayoutKey {
    pub fn new(text: &str, max_width: Option<i32>, style: TextStyle) -> Self {
        Self {
            content_hash: content_hash(text),
            len: text.len(),
            max_width,
            style,
        }
    }
}

pub fn content_hash(text: &str) -> u64 {
    let mut hasher = AHasher::default();
    text.hash(&mut hasher);
    hasher.finish()
}

#[derive(Debug)]
pub struct LayoutCache<L> {
    entries: AHashMap<LayoutKey, Rc<L>>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<L> Default for LayoutCache<L> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<L> LayoutCache<L> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: AHashMap::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Cached layout for `key`, built with `measure` on a miss. A full cache
    /// is flushed before inserting.
    pub fn get_or_insert_with(&mut self, key: LayoutKey, measure: impl FnOnce() -> L) -> Rc<L> {
        if let Some(layout) = self.entries.get(&key) {
            self.hits += 1;
            return Rc::clone(layout);
        }
        self.misses += 1;
        if self.entries.len() >= self.capacity {
            debug!(target: "ui", entries = self.entries.len(), "layout_cache_flush");
            self.entries.clear();
        }
        let layout = Rc::new(measure());
        self.entries.insert(key, Rc::clone(&layout));
        layout
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
