//! Seams between the session and the surfaces it drives.

use core_layout::{Hit, Point, Rect};
use core_state::WeakBuffer;
use core_text::Text;

/// A text-bearing block inside a scroll region.
pub trait TextBlock {
    /// Bounds in content space (pixels).
    fn bounds(&self) -> Rect;

    /// Current text, used for word and paragraph expansion.
    fn text(&self) -> Text;

    /// Hit test a block-local point (pixels). Implementations measure their
    /// text and resolve through [`core_layout::locate`].
    fn hit_test(&self, local: Point) -> Option<Hit>;

    /// Visual line whose band contains block-local `y`.
    fn line_at(&self, local_y: f32) -> Option<usize>;

    /// Ordered `(start, end)`; `(0, 0)` means no selection.
    fn selection(&self) -> (usize, usize);

    /// Select from `anchor` to `caret`. The two may come in either order;
    /// editable blocks leave their buffer's cursor on `caret`.
    fn set_selection(&mut self, anchor: usize, caret: usize);

    /// Drop the selection. Editable blocks keep their cursor where it is.
    fn clear_selection(&mut self) {
        self.set_selection(0, 0);
    }

    /// Editable blocks expose their buffer. The session never holds a
    /// strong reference.
    fn buffer(&self) -> Option<WeakBuffer> {
        None
    }

    fn is_multiline(&self) -> bool {
        true
    }

    /// `false` once the backing buffer has been dropped.
    fn is_alive(&self) -> bool {
        self.buffer().is_none_or(|b| b.is_alive())
    }

    /// Caret position of the block's buffer, when it has one.
    fn cursor_offset(&self) -> Option<usize> {
        self.buffer()?.upgrade().map(|b| b.borrow().cursor())
    }

    /// Half-open selection range, `None` when empty.
    fn selection_range(&self) -> Option<(usize, usize)> {
        let (start, end) = self.selection();
        (start != end).then(|| (start.min(end), start.max(end)))
    }
}

/// The scrollable region owning the blocks.
pub trait ScrollHost {
    /// Current scroll position (content-space point at the viewport origin).
    fn scroll_offset(&self) -> Point;

    /// Request a new scroll position. Hosts clamp to their content and may
    /// animate; the session only reads back [`ScrollHost::scroll_offset`].
    fn set_scroll_target(&mut self, x: f32, y: f32);

    /// Visible region, in the coordinate space pointer events arrive in.
    fn viewport_bounds(&self) -> Rect;

    fn blocks(&self) -> Vec<&dyn TextBlock>;

    fn blocks_mut(&mut self) -> Vec<&mut dyn TextBlock>;
}
