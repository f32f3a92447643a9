//! Widget identity and paint output.

use core_actions::DispatchResult;
use core_events::KeyEvent;
use core_layout::{Point, Rect};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Drawing commands in content-space pixels, emitted back to front.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    /// One visual line of text with its top-left corner.
    Text { x: f32, y: f32, content: String },
    Selection(Rect),
    Caret(Rect),
}

/// Capabilities a widget may implement. Everything but `id` defaults to a
/// no-op; the `on_*` hooks return whether the widget consumed the input.
pub trait Widget {
    fn id(&self) -> WidgetId;

    /// Append this widget's drawing commands to `ops`.
    fn paint(&self, _ops: &mut Vec<PaintOp>) {}

    /// Keyboard focus changed. Only focused widgets draw a caret.
    fn set_focused(&mut self, _focused: bool) {}

    /// Pointer press at widget-local `local` with its click count.
    fn on_click(&mut self, _local: Point, _count: u8) -> bool {
        false
    }

    fn on_drag(&mut self, _local: Point) -> bool {
        false
    }

    fn on_key(&mut self, _key: &KeyEvent) -> DispatchResult {
        DispatchResult::clean()
    }
}
