#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_layout::{
    Hit, MonoLayout, MonospaceMeasurer, Point, Rect, TextMeasurementPort, TextStyle, line_at,
    locate, px_to_units,
};
use core_select::{ScrollHost, TextBlock};
use core_state::{SharedBuffer, TextBuffer, WeakBuffer};
use core_text::Text;

pub const CELL: f32 = 10.0;
pub const LINE: f32 = 20.0;

pub fn style() -> TextStyle {
    TextStyle {
        font_size: 16,
        line_height: LINE as u16,
        wrap: core_layout::Wrap::Char,
    }
}

/// Monospace block, optionally backed by a buffer.
pub struct FakeBlock {
    pub bounds: Rect,
    text: String,
    layout: MonoLayout,
    measurer: MonospaceMeasurer,
    selection: (usize, usize),
    buffer: Option<WeakBuffer>,
}

impl FakeBlock {
    pub fn label(text: &str, top: f32, width: f32) -> Self {
        let measurer = MonospaceMeasurer::new(CELL);
        let layout = measurer.measure(text, Some(px_to_units(width)), &style());
        let height = layout.height() as f32 / 1024.0;
        Self {
            bounds: Rect::new(0.0, top, width, height),
            text: text.to_string(),
            layout,
            measurer,
            selection: (0, 0),
            buffer: None,
        }
    }

    pub fn editable(buffer: &SharedBuffer, top: f32, width: f32) -> Self {
        let text = buffer.borrow().content().to_string();
        let mut block = Self::label(&text, top, width);
        block.buffer = Some(buffer.downgrade());
        block
    }

    pub fn bottom(&self) -> f32 {
        self.bounds.bottom()
    }
}

impl TextBlock for FakeBlock {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn text(&self) -> Text {
        Text::from(self.text.as_str())
    }

    fn hit_test(&self, local: Point) -> Option<Hit> {
        locate(
            &self.measurer,
            &self.layout,
            px_to_units(local.x),
            px_to_units(local.y),
        )
    }

    fn line_at(&self, local_y: f32) -> Option<usize> {
        line_at(&self.measurer, &self.layout, px_to_units(local_y))
    }

    fn selection(&self) -> (usize, usize) {
        self.selection
    }

    fn set_selection(&mut self, anchor: usize, caret: usize) {
        self.selection = (anchor.min(caret), anchor.max(caret));
        if let Some(buffer) = &self.buffer {
            buffer.with_mut(|b: &mut TextBuffer| b.select(anchor, caret));
        }
    }

    fn clear_selection(&mut self) {
        self.selection = (0, 0);
        if let Some(buffer) = &self.buffer {
            buffer.with_mut(|b: &mut TextBuffer| b.clear_selection());
        }
    }

    fn buffer(&self) -> Option<WeakBuffer> {
        self.buffer.clone()
    }
}

/// Vertical stack of blocks in a viewport; scroll targets apply at once.
pub struct FakeHost {
    pub viewport: Rect,
    pub offset: Point,
    pub blocks: Vec<FakeBlock>,
}

impl FakeHost {
    pub fn new(viewport: Rect, blocks: Vec<FakeBlock>) -> Self {
        Self {
            viewport,
            offset: Point::default(),
            blocks,
        }
    }

    pub fn content_height(&self) -> f32 {
        self.blocks.iter().map(|b| b.bottom()).fold(0.0, f32::max)
    }

    pub fn selections(&self) -> Vec<(usize, usize)> {
        self.blocks.iter().map(|b| b.selection()).collect()
    }
}

impl ScrollHost for FakeHost {
    fn scroll_offset(&self) -> Point {
        self.offset
    }

    fn set_scroll_target(&mut self, x: f32, y: f32) {
        let max_y = (self.content_height() - self.viewport.height).max(0.0);
        self.offset = Point::new(x, y.clamp(0.0, max_y));
    }

    fn viewport_bounds(&self) -> Rect {
        self.viewport
    }

    fn blocks(&self) -> Vec<&dyn TextBlock> {
        self.blocks.iter().map(|b| b as &dyn TextBlock).collect()
    }

    fn blocks_mut(&mut self) -> Vec<&mut dyn TextBlock> {
        self.blocks
            .iter_mut()
            .map(|b| b as &mut dyn TextBlock)
            .collect()
    }
}

/// Three labels stacked with a 10px gap, 200px wide (20 cells).
pub fn three_blocks() -> FakeHost {
    let a = FakeBlock::label("alpha beta", 0.0, 200.0);
    let b = FakeBlock::label("gamma delta\nepsilon", a.bottom() + 10.0, 200.0);
    let c = FakeBlock::label("zeta eta theta", a.bottom() + 10.0 + 40.0 + 10.0, 200.0);
    FakeHost::new(Rect::new(0.0, 0.0, 200.0, 400.0), vec![a, b, c])
}
