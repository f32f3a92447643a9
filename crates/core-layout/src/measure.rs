//! The measurement service seam.
//!
//! Font shaping lives outside this workspace. Everything that needs to turn
//! positions into offsets talks to it through [`TextMeasurementPort`], which
//! hands back an opaque layout plus per-line geometry in layout units.

use crate::hit::Hit;

/// Line wrapping mode requested from the measurement service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Wrap {
    /// Break only at `\n`.
    None,
    /// Break at `\n` and before any grapheme that would overflow `max_width`.
    #[default]
    Char,
}

/// Text style hints. Opaque to the hit tester, forwarded to the port and
/// used as part of layout cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextStyle {
    /// Font size in whole pixels.
    pub font_size: u16,
    /// Line height in whole pixels.
    pub line_height: u16,
    pub wrap: Wrap,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 14,
            line_height: 20,
            wrap: Wrap::Char,
        }
    }
}

/// Geometry of one visual line, in layout units. `start..end` is the
/// codepoint range the line displays (line separators excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineExtent {
    pub top: i32,
    pub height: i32,
    pub width: i32,
    /// Horizontal origin of the line inside the layout (alignment offset).
    pub left: i32,
    pub start: usize,
    pub end: usize,
}

impl LineExtent {
    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }
}

/// Opaque text measurement service.
///
/// All coordinates are layout units relative to the layout's top-left
/// corner, except where noted as line-relative.
pub trait TextMeasurementPort {
    type Layout;

    /// Lay out `text`. `max_width` is the wrap width in layout units;
    /// `None` leaves lines unbounded.
    fn measure(&self, text: &str, max_width: Option<i32>, style: &TextStyle) -> Self::Layout;

    /// Visual lines in top-to-bottom order.
    fn line_extents(&self, layout: &Self::Layout) -> Vec<LineExtent>;

    /// Resolve a line-relative point (`x` from the line's left edge, `y` from
    /// its top) on visual line `line`. `None` when the line does not exist.
    fn index_for_xy(&self, layout: &Self::Layout, line: usize, x: i32, y: i32) -> Option<Hit>;

    /// Line-relative x of the caret placed before codepoint `offset` on
    /// visual line `line`. Offsets past the line end map to its width.
    fn x_for_index(&self, layout: &Self::Layout, line: usize, offset: usize) -> i32;
}
