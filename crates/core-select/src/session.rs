//! Drag selection across the text blocks of one scroll region.
//!
//! Points are kept in content space (viewport point + scroll offset) so a
//! selection stays attached to the text while the region scrolls under a
//! stationary pointer. Each update hit-tests the ordered first and last
//! points against every block the drag rectangle touches; blocks outside it
//! are cleared.

use core_actions::{DispatchResult, KeyTranslator, dispatch};
use core_config::Config;
use core_events::KeyEvent;
use core_layout::{Hit, Point, Rect};
use core_state::WeakBuffer;
use core_text::{Text, boundary};
use tracing::{debug, trace};

use crate::autoscroll::{AutoScroller, TickOutcome};
use crate::click::{ClickClassifier, DEFAULT_MULTI_CLICK_MS, Granularity};
use crate::host::{ScrollHost, TextBlock};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub multi_click_ms: u64,
    pub autoscroll: AutoScroller,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            multi_click_ms: DEFAULT_MULTI_CLICK_MS,
            autoscroll: AutoScroller::default(),
        }
    }
}

impl SessionSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            multi_click_ms: cfg.file.click.multi_click_ms,
            autoscroll: AutoScroller::from_config(&cfg.file.autoscroll, cfg.dpi_scale()),
        }
    }
}

/// Selection state for one scroll region. Also known as the drag
/// controller: it owns the gesture from pointer-down to pointer-up.
#[derive(Debug, Clone)]
pub struct SelectionSession {
    classifier: ClickClassifier,
    autoscroll: AutoScroller,
    anchor: Point,
    current: Point,
    ordered: (Point, Point),
    /// Last pointer position in viewport space, replayed by auto-scroll ticks.
    pointer: Point,
    pressed: bool,
    granularity: Granularity,
    /// Buffer of the block receiving key events. Held weakly and matched by
    /// identity, so blocks may be added or reordered between gestures.
    focus: Option<WeakBuffer>,
    /// Set when a timer is requested, cleared only when a tick stops it.
    timer_armed: bool,
}

impl Default for SelectionSession {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

fn to_content<H: ScrollHost + ?Sized>(host: &H, pos: Point) -> Point {
    let viewport = host.viewport_bounds();
    let offset = host.scroll_offset();
    Point::new(pos.x - viewport.x + offset.x, pos.y - viewport.y + offset.y)
}

fn local(point: Point, bounds: Rect) -> Point {
    Point::new(point.x - bounds.x, point.y - bounds.y)
}

fn within_rows(bounds: Rect, y: f32) -> bool {
    y >= bounds.top() && y < bounds.bottom()
}

/// Widen `first..last` hits to whole units.
fn expand(granularity: Granularity, text: &Text, first: Hit, last: Hit) -> (usize, usize) {
    let unit = match granularity {
        Granularity::Character => {
            let (a, b) = (first.caret(), last.caret());
            return (a.min(b), a.max(b));
        }
        Granularity::Word => boundary::word_at,
        Granularity::Paragraph => boundary::paragraph_at,
    };
    let start = first.offset.min(last.offset);
    let end = first.caret().max(last.caret());
    let head = unit(text, start);
    let tail = if end > start { unit(text, end - 1) } else { head.clone() };
    (head.start, tail.end.max(head.end))
}

impl SelectionSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            classifier: ClickClassifier::new(settings.multi_click_ms),
            autoscroll: settings.autoscroll,
            anchor: Point::default(),
            current: Point::default(),
            ordered: (Point::default(), Point::default()),
            pointer: Point::default(),
            pressed: false,
            granularity: Granularity::Character,
            focus: None,
            timer_armed: false,
        }
    }

    pub fn anchor_point(&self) -> Point {
        self.anchor
    }

    pub fn current_point(&self) -> Point {
        self.current
    }

    /// Anchor and current point in reading order: horizontal order when both
    /// sit on the same visual line of a block, vertical order otherwise.
    pub fn ordered_points(&self) -> (Point, Point) {
        self.ordered
    }

    pub fn is_dragging(&self) -> bool {
        self.pressed
    }

    pub fn click_count(&self) -> u8 {
        self.classifier.count()
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn focused_buffer(&self) -> Option<&WeakBuffer> {
        self.focus.as_ref()
    }

    /// Current index (into [`ScrollHost::blocks`]) of the focused block.
    pub fn focused_index<H: ScrollHost + ?Sized>(&self, host: &H) -> Option<usize> {
        host.blocks().iter().position(|block| self.holds_focus(*block))
    }

    pub fn set_focus(&mut self, buffer: Option<WeakBuffer>) {
        self.focus = buffer;
    }

    pub fn is_timer_armed(&self) -> bool {
        self.timer_armed
    }

    pub fn autoscroller(&self) -> &AutoScroller {
        &self.autoscroll
    }

    /// Start a gesture at viewport point `pos`: anchor and current collapse
    /// onto it and every block loses its selection. An editable block under
    /// the pointer receives the caret and keyboard focus.
    pub fn begin<H: ScrollHost + ?Sized>(&mut self, host: &mut H, pos: Point) {
        let point = to_content(&*host, pos);
        self.anchor = point;
        self.current = point;
        self.ordered = (point, point);
        self.pointer = pos;
        self.pressed = true;
        self.granularity = Granularity::Character;
        self.focus = None;

        let mut focused = None;
        for (index, block) in host.blocks_mut().into_iter().enumerate() {
            if !block.is_alive() {
                continue;
            }
            block.clear_selection();
            let bounds = block.bounds();
            if self.focus.is_none()
                && bounds.contains(point)
                && let Some(buffer) = block.buffer()
            {
                if let Some(hit) = block.hit_test(local(point, bounds)) {
                    block.set_selection(hit.caret(), hit.caret());
                }
                self.focus = Some(buffer);
                focused = Some(index);
            }
        }
        debug!(target: "select.drag", x = point.x, y = point.y, ?focused, "begin");
    }

    /// Move the current point to viewport point `pos` and recompute every
    /// block's selection.
    pub fn update<H: ScrollHost + ?Sized>(&mut self, host: &mut H, pos: Point) {
        self.pointer = pos;
        self.current = to_content(&*host, pos);
        self.ordered = self.order(&*host);
        let (first, last) = self.ordered;
        let rect = Rect::spanning(self.anchor, self.current);
        let granularity = self.granularity;
        let backward = first != self.anchor;

        for (index, block) in host.blocks_mut().into_iter().enumerate() {
            if !block.is_alive() {
                trace!(target: "select.drag", block = index, "skip_dead_block");
                continue;
            }
            let bounds = block.bounds();
            if !bounds.intersects(&rect) {
                if block.selection() != (0, 0) {
                    block.clear_selection();
                }
                continue;
            }
            let (Some(start), Some(end)) = (
                block.hit_test(local(first, bounds)),
                block.hit_test(local(last, bounds)),
            ) else {
                trace!(target: "select.drag", block = index, "unresolved_hit");
                continue;
            };
            let (start, end) = expand(granularity, &block.text(), start, end);
            if start == end && !self.holds_focus(&*block) {
                block.clear_selection();
            } else if backward {
                block.set_selection(end, start);
            } else {
                block.set_selection(start, end);
            }
            trace!(target: "select.drag", block = index, start, end, "block_selection");
        }
    }

    /// Finish the gesture with one last update. Selections stay as they are.
    /// A running timer keeps its arm until its next tick reports
    /// [`TickOutcome::Stop`].
    pub fn end<H: ScrollHost + ?Sized>(&mut self, host: &mut H, pos: Point) {
        self.update(host, pos);
        self.pressed = false;
        debug!(target: "select.drag", x = self.current.x, y = self.current.y, "end");
    }

    /// Pointer pressed at viewport point `pos`. Returns the click count.
    /// Double and triple clicks select the word or paragraph under the
    /// pointer, and a drag continuing the gesture keeps that unit.
    pub fn on_pointer_down<H: ScrollHost + ?Sized>(&mut self, host: &mut H, pos: Point, time_ms: u64) -> u8 {
        let count = self.classifier.classify(time_ms);
        self.begin(host, pos);
        self.granularity = Granularity::from_count(count);
        if self.granularity != Granularity::Character {
            self.select_unit_at_anchor(host);
        }
        count
    }

    /// Pointer moved. Returns `true` when an auto-scroll timer should be
    /// started (the drag just left the viewport and none is running).
    pub fn on_pointer_move<H: ScrollHost + ?Sized>(&mut self, host: &mut H, pos: Point) -> bool {
        if !self.pressed {
            return false;
        }
        self.update(host, pos);
        let outside = self.autoscroll.delta(pos.y, host.viewport_bounds()) != 0.0;
        if outside && !self.timer_armed {
            self.timer_armed = true;
            debug!(target: "select.autoscroll", tick_ms = self.autoscroll.tick_ms, "arm");
            return true;
        }
        false
    }

    pub fn on_pointer_up<H: ScrollHost + ?Sized>(&mut self, host: &mut H, pos: Point) {
        if self.pressed {
            self.end(host, pos);
        }
    }

    /// One auto-scroll timer tick: scroll toward the pointer and refresh the
    /// selection. Keeps firing while the button is held.
    pub fn on_tick<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> TickOutcome {
        if !self.pressed {
            self.timer_armed = false;
            debug!(target: "select.autoscroll", "disarm");
            return TickOutcome::Stop;
        }
        let delta = self.autoscroll.delta(self.pointer.y, host.viewport_bounds());
        if delta != 0.0 {
            let offset = host.scroll_offset();
            host.set_scroll_target(offset.x, offset.y + delta);
            trace!(target: "select.autoscroll", delta, from = offset.y, to = host.scroll_offset().y, "tick_scroll");
        }
        self.update(host, self.pointer);
        TickOutcome::Continue
    }

    /// Route a key press to the focused block's buffer. Focus is dropped
    /// once that buffer is gone or no block in the host shows it.
    pub fn on_key_event<H: ScrollHost + ?Sized>(&mut self, host: &mut H, key: &KeyEvent) -> DispatchResult {
        let Some(buffer) = self.focus.clone() else {
            return DispatchResult::clean();
        };
        let multiline = host
            .blocks()
            .into_iter()
            .find(|block| self.holds_focus(*block))
            .map(|block| block.is_multiline());
        let Some(multiline) = multiline.filter(|_| buffer.is_alive()) else {
            trace!(target: "select.drag", key = %key, "focus_lost");
            self.focus = None;
            return DispatchResult::clean();
        };
        let Some(action) = KeyTranslator::new(multiline).translate(key) else {
            return DispatchResult::clean();
        };
        trace!(target: "select.drag", key = %key, "key_event");
        buffer.with_mut(|buf| dispatch(action, buf)).unwrap_or_else(DispatchResult::clean)
    }

    fn holds_focus(&self, block: &dyn TextBlock) -> bool {
        match (&self.focus, block.buffer()) {
            (Some(focus), Some(buffer)) => focus.ptr_eq(&buffer),
            _ => false,
        }
    }

    fn select_unit_at_anchor<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        let point = self.anchor;
        let granularity = self.granularity;
        let Some(block) = host
            .blocks_mut()
            .into_iter()
            .find(|b| b.is_alive() && b.bounds().contains(point))
        else {
            return;
        };
        if let Some(hit) = block.hit_test(local(point, block.bounds())) {
            let (start, end) = expand(granularity, &block.text(), hit, hit);
            block.set_selection(start, end);
            debug!(target: "select.click", ?granularity, start, end, "unit_selected");
        }
    }

    fn order<H: ScrollHost + ?Sized>(&self, host: &H) -> (Point, Point) {
        let (a, b) = (self.anchor, self.current);
        let same_line = host.blocks().iter().any(|block| {
            let bounds = block.bounds();
            within_rows(bounds, a.y)
                && within_rows(bounds, b.y)
                && block
                    .line_at(a.y - bounds.y)
                    .is_some_and(|line| block.line_at(b.y - bounds.y) == Some(line))
        });
        let anchor_first = if same_line {
            a.x <= b.x
        } else {
            (a.y, a.x) <= (b.y, b.x)
        };
        if anchor_first { (a, b) } else { (b, a) }
    }
}
