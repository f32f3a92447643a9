//! Pointer position to text offset.

use tracing::trace;

use crate::measure::TextMeasurementPort;

/// x used to probe "far right" of the last line when the pointer is below
/// the text.
pub const FAR_PROBE: i32 = i32::MAX / 2;

/// Result of a hit test.
///
/// `offset` is the first codepoint of the grapheme under the point and
/// `trailing` is either 0 (leading half) or that grapheme's length in
/// codepoints (trailing half).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hit {
    pub offset: usize,
    pub trailing: usize,
}

impl Hit {
    pub const fn new(offset: usize, trailing: usize) -> Self {
        Self { offset, trailing }
    }

    /// Caret position the hit resolves to.
    pub const fn caret(self) -> usize {
        self.offset + self.trailing
    }
}

/// Map a layout-space point (layout units) to a text position.
///
/// * above the first line → `(0, 0)`;
/// * at or below the bottom of the last line → end of text, found by probing
///   the last line at [`FAR_PROBE`];
/// * otherwise the line whose vertical span contains `y` resolves `x`.
///
/// Returns `None` only when the port cannot resolve a line that is in range;
/// callers treat that as "leave the selection alone".
pub fn locate<P>(port: &P, layout: &P::Layout, x: i32, y: i32) -> Option<Hit>
where
    P: TextMeasurementPort + ?Sized,
{
    let lines = port.line_extents(layout);
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        trace!(target: "layout.hit", x, y, "empty_layout");
        return Some(Hit::default());
    };

    if y < first.top {
        trace!(target: "layout.hit", x, y, "above_first_line");
        return Some(Hit::default());
    }

    let last_index = lines.len() - 1;
    if y >= last.bottom() {
        let probe = port.index_for_xy(layout, last_index, FAR_PROBE, last.height / 2)?;
        let hit = Hit::new(probe.caret(), 0);
        trace!(target: "layout.hit", x, y, offset = hit.offset, "below_last_line");
        return Some(hit);
    }

    let mut line_top = first.top;
    for (index, line) in lines.iter().enumerate() {
        let line_bottom = line_top.saturating_add(line.height);
        if y >= line_top && y < line_bottom {
            let hit = port.index_for_xy(layout, index, x.saturating_sub(line.left), y - line_top);
            trace!(target: "layout.hit", x, y, line = index, hit = ?hit, "line_hit");
            return hit;
        }
        line_top = line_bottom;
    }

    trace!(target: "layout.hit", x, y, "unresolved");
    None
}

/// Index of the visual line whose span contains `y` (layout units).
pub fn line_at<P>(port: &P, layout: &P::Layout, y: i32) -> Option<usize>
where
    P: TextMeasurementPort + ?Sized,
{
    port.line_extents(layout)
        .iter()
        .position(|line| y >= line.top && y < line.bottom())
}
