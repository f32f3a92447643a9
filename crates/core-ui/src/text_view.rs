//! Text widget backed by a shared buffer.
//!
//! Layout comes from the UI context cache, so a `TextView` only works
//! between [`crate::init_ui`] and [`crate::teardown_ui`]. Outside that
//! window it reports no hits and paints nothing.

use std::rc::Rc;

use core_actions::{DispatchResult, KeyTranslator, dispatch};
use core_events::KeyEvent;
use core_layout::{
    Hit, MonoLayout, MonospaceMeasurer, Point, Rect, TextMeasurementPort, TextStyle, caret_rect,
    line_at, locate, px_to_units, selection_rects, units_to_px,
};
use core_select::TextBlock;
use core_state::{SharedBuffer, WeakBuffer};
use core_text::Text;
use tracing::{trace, warn};

use crate::widget::{PaintOp, Widget, WidgetId};
use crate::{UiError, with_ui};

#[derive(Debug)]
pub struct TextView {
    id: WidgetId,
    buffer: SharedBuffer,
    origin: Point,
    /// Wrap width in pixels; `None` lays out on unbounded lines.
    width: Option<f32>,
    style: TextStyle,
    multiline: bool,
    focused: bool,
}

impl TextView {
    /// New view at `origin` (content space). Allocates an id from the UI
    /// context.
    pub fn new(buffer: SharedBuffer, origin: Point, width: Option<f32>) -> Result<Self, UiError> {
        let id = with_ui(|ui| ui.allocate_id())?;
        Ok(Self {
            id,
            buffer,
            origin,
            width,
            style: TextStyle::default(),
            multiline: true,
            focused: false,
        })
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn single_line(mut self) -> Self {
        self.multiline = false;
        self
    }

    pub fn buffer(&self) -> &SharedBuffer {
        &self.buffer
    }

    /// Point the view at another buffer. Handles held by an in-flight
    /// selection session keep referring to the old one.
    pub fn set_buffer(&mut self, buffer: SharedBuffer) {
        self.buffer = buffer;
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn layout(&self) -> Option<(MonospaceMeasurer, Rc<MonoLayout>)> {
        let text = self.buffer.borrow().content().to_string();
        let max_width = self.width.map(px_to_units);
        let style = self.style;
        match with_ui(|ui| (*ui.measurer(), ui.layout_for(&text, max_width, style))) {
            Ok(pair) => Some(pair),
            Err(err) => {
                warn!(target: "ui", widget = %self.id, error = %err, "layout_unavailable");
                None
            }
        }
    }
}

impl TextBlock for TextView {
    fn bounds(&self) -> Rect {
        let Some((_, layout)) = self.layout() else {
            return Rect::new(self.origin.x, self.origin.y, 0.0, 0.0);
        };
        let width = self
            .width
            .unwrap_or_else(|| units_to_px(layout.width()));
        Rect::new(
            self.origin.x,
            self.origin.y,
            width,
            units_to_px(layout.height()),
        )
    }

    fn text(&self) -> Text {
        self.buffer.borrow().content().clone()
    }

    fn hit_test(&self, local: Point) -> Option<Hit> {
        let (measurer, layout) = self.layout()?;
        locate(
            &measurer,
            layout.as_ref(),
            px_to_units(local.x),
            px_to_units(local.y),
        )
    }

    fn line_at(&self, local_y: f32) -> Option<usize> {
        let (measurer, layout) = self.layout()?;
        line_at(&measurer, layout.as_ref(), px_to_units(local_y))
    }

    fn selection(&self) -> (usize, usize) {
        self.buffer.borrow().selection_range().unwrap_or((0, 0))
    }

    fn set_selection(&mut self, anchor: usize, caret: usize) {
        let mut buffer = self.buffer.borrow_mut();
        if anchor == caret {
            buffer.set_cursor(caret);
        } else {
            buffer.select(anchor, caret);
        }
    }

    fn clear_selection(&mut self) {
        self.buffer.borrow_mut().clear_selection();
    }

    fn buffer(&self) -> Option<WeakBuffer> {
        Some(self.buffer.downgrade())
    }

    fn is_multiline(&self) -> bool {
        self.multiline
    }
}

impl Widget for TextView {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn paint(&self, ops: &mut Vec<PaintOp>) {
        let Some((measurer, layout)) = self.layout() else {
            return;
        };
        let layout = layout.as_ref();
        let (ox, oy) = (self.origin.x, self.origin.y);
        let buffer = self.buffer.borrow();
        if let Some((start, end)) = buffer.selection_range() {
            ops.extend(
                selection_rects(&measurer, layout, start, end)
                    .into_iter()
                    .map(|r| PaintOp::Selection(r.translate(ox, oy))),
            );
        }
        for line in measurer.line_extents(layout) {
            let content = buffer.content().slice(line.start, line.end);
            ops.push(PaintOp::Text {
                x: ox + units_to_px(line.left),
                y: oy + units_to_px(line.top),
                content: content.trim_end_matches('\n').to_string(),
            });
        }
        if self.focused
            && let Some(rect) = caret_rect(&measurer, layout, buffer.cursor())
        {
            ops.push(PaintOp::Caret(rect.translate(ox, oy)));
        }
    }

    /// Keys typed while the view has focus edit its buffer directly.
    fn on_key(&mut self, key: &KeyEvent) -> DispatchResult {
        let Some(action) = KeyTranslator::new(self.multiline).translate(key) else {
            return DispatchResult::clean();
        };
        trace!(target: "ui", widget = %self.id, action = action.name(), "widget_key");
        self.buffer.with_mut(|buffer| dispatch(action, buffer))
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        let id = self.id;
        let _ = with_ui(|ui| {
            if focused {
                ui.set_active_widget(Some(id));
            } else if ui.active_widget() == Some(id) {
                ui.set_active_widget(None);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{init_ui, teardown_ui};
    use core_config::Config;
    use core_state::TextBuffer;
    use pretty_assertions::assert_eq;

    struct Ui;

    impl Ui {
        fn start() -> Self {
            init_ui(&Config::default()).unwrap();
            Ui
        }
    }

    impl Drop for Ui {
        fn drop(&mut self) {
            teardown_ui();
        }
    }

    fn view(text: &str) -> TextView {
        let buffer = SharedBuffer::new(TextBuffer::with_content(text));
        TextView::new(buffer, Point::new(10.0, 50.0), Some(80.0)).unwrap()
    }

    #[test]
    fn needs_ui_context() {
        let buffer = SharedBuffer::new(TextBuffer::with_content("abc"));
        let err = TextView::new(buffer, Point::default(), None).unwrap_err();
        assert_eq!(err, UiError::NotInitialised);
    }

    #[test]
    fn bounds_follow_layout() {
        let _ui = Ui::start();
        // 8px cells, 80px wrap width -> 10 cells per line, 20px lines
        let v = view("0123456789abc");
        assert_eq!(v.bounds(), Rect::new(10.0, 50.0, 80.0, 40.0));
    }

    #[test]
    fn hit_test_local_points() {
        let _ui = Ui::start();
        let v = view("hello\nworld");
        let hit = v.hit_test(Point::new(17.0, 25.0)).unwrap();
        assert_eq!(hit.caret(), 8);
        assert_eq!(v.line_at(25.0), Some(1));
    }

    #[test]
    fn selection_writes_through_to_buffer() {
        let _ui = Ui::start();
        let mut v = view("hello world");
        v.set_selection(6, 11);
        assert_eq!(v.selection(), (6, 11));
        assert_eq!(v.buffer.borrow().selected_text().as_deref(), Some("world"));
        v.set_selection(3, 3);
        assert_eq!(v.selection(), (0, 0));
        assert_eq!(v.buffer.borrow().cursor(), 3);
    }

    #[test]
    fn weak_handle_tracks_swapped_buffer() {
        let _ui = Ui::start();
        let mut v = view("old");
        let weak = TextBlock::buffer(&v).unwrap();
        v.set_buffer(SharedBuffer::new(TextBuffer::with_content("new")));
        assert!(!weak.is_alive());
        assert!(TextBlock::buffer(&v).unwrap().is_alive());
    }

    #[test]
    fn keys_edit_own_buffer() {
        let _ui = Ui::start();
        let mut v = view("ab").single_line();
        v.set_selection(2, 2);
        assert!(v.on_key(&KeyEvent::char('c')).dirty);
        assert!(!v.on_key(&core_events::parse_chord("Enter").unwrap()).dirty);
        assert_eq!(v.buffer.borrow().content().to_string(), "abc");
        assert!(!v.on_click(Point::new(1.0, 1.0), 1));
        assert!(!v.on_drag(Point::new(1.0, 1.0)));
    }

    #[test]
    fn paint_emits_selection_text_and_caret() {
        let _ui = Ui::start();
        let mut v = view("hello");
        v.set_selection(1, 3);
        let mut ops = Vec::new();
        v.paint(&mut ops);
        assert_eq!(
            ops,
            vec![
                PaintOp::Selection(Rect::new(18.0, 50.0, 16.0, 20.0)),
                PaintOp::Text { x: 10.0, y: 50.0, content: "hello".to_string() },
            ]
        );
        v.set_focused(true);
        assert_eq!(with_ui(|ui| ui.active_widget()).unwrap(), Some(v.id()));
        ops.clear();
        v.paint(&mut ops);
        assert_eq!(ops.last(), Some(&PaintOp::Caret(Rect::new(34.0, 50.0, 1.0, 20.0))));
    }
}
