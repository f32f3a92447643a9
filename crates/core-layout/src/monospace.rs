//! Fixed-advance reference measurement service.
//!
//! Every grapheme cluster advances by `cells * cell_width`, where `cells`
//! comes from [`core_text::egc_width`] (wide CJK and emoji take two cells,
//! controls none). Lines break at `\n` and, with [`Wrap::Char`], before a
//! cluster that would overflow `max_width`.

use core_text::segment::segment;

use crate::hit::Hit;
use crate::measure::{LineExtent, TextMeasurementPort, TextStyle, Wrap};
use crate::{UNIT_SCALE, px_to_units};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cluster {
    start: usize,
    end: usize,
    x: i32,
    width: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MonoLine {
    start: usize,
    width: i32,
    clusters: Vec<Cluster>,
}

impl MonoLine {
    fn empty(start: usize) -> Self {
        Self {
            start,
            width: 0,
            clusters: Vec::new(),
        }
    }

    fn end(&self) -> usize {
        self.clusters.last().map_or(self.start, |c| c.end)
    }

    fn push(&mut self, start: usize, end: usize, width: i32) {
        self.clusters.push(Cluster {
            start,
            end,
            x: self.width,
            width,
        });
        self.width = self.width.saturating_add(width);
    }
}

/// Layout produced by [`MonospaceMeasurer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoLayout {
    lines: Vec<MonoLine>,
    line_height: i32,
    char_len: usize,
}

impl MonoLayout {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Length of the measured text in codepoints.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Total height in layout units.
    pub fn height(&self) -> i32 {
        self.line_height.saturating_mul(self.lines.len() as i32)
    }

    /// Width of the widest line in layout units.
    pub fn width(&self) -> i32 {
        self.lines.iter().map(|l| l.width).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceMeasurer {
    cell_width: i32,
}

impl MonospaceMeasurer {
    /// `cell_px` is the advance of a single-cell glyph in pixels.
    pub fn new(cell_px: f32) -> Self {
        Self {
            cell_width: px_to_units(cell_px).max(1),
        }
    }

    /// Advance of one cell in layout units.
    pub fn cell_width(&self) -> i32 {
        self.cell_width
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(8.0)
    }
}

impl TextMeasurementPort for MonospaceMeasurer {
    type Layout = MonoLayout;

    fn measure(&self, text: &str, max_width: Option<i32>, style: &TextStyle) -> MonoLayout {
        let limit = match style.wrap {
            Wrap::None => None,
            Wrap::Char => max_width,
        };
        let mut lines = Vec::new();
        let mut paragraph_start = 0usize;
        for paragraph in text.split('\n') {
            let mut line = MonoLine::empty(paragraph_start);
            for seg in segment(paragraph) {
                let width = i32::from(seg.width).saturating_mul(self.cell_width);
                let start = paragraph_start + seg.start;
                if let Some(limit) = limit
                    && !line.clusters.is_empty()
                    && line.width.saturating_add(width) > limit
                {
                    lines.push(std::mem::replace(&mut line, MonoLine::empty(start)));
                }
                line.push(start, paragraph_start + seg.end, width);
            }
            lines.push(line);
            paragraph_start += paragraph.chars().count() + 1;
        }
        MonoLayout {
            lines,
            line_height: i32::from(style.line_height.max(1)) * UNIT_SCALE,
            char_len: text.chars().count(),
        }
    }

    fn line_extents(&self, layout: &MonoLayout) -> Vec<LineExtent> {
        let mut top = 0i32;
        layout
            .lines
            .iter()
            .map(|line| {
                let extent = LineExtent {
                    top,
                    height: layout.line_height,
                    width: line.width,
                    left: 0,
                    start: line.start,
                    end: line.end(),
                };
                top = top.saturating_add(layout.line_height);
                extent
            })
            .collect()
    }

    fn index_for_xy(&self, layout: &MonoLayout, line: usize, x: i32, _y: i32) -> Option<Hit> {
        let line = layout.lines.get(line)?;
        let (Some(first), Some(last)) = (line.clusters.first(), line.clusters.last()) else {
            return Some(Hit::new(line.start, 0));
        };
        if x < 0 {
            return Some(Hit::new(first.start, 0));
        }
        for cluster in line.clusters.iter().filter(|c| c.width > 0) {
            if x < cluster.x + cluster.width {
                let trailing = if x >= cluster.x + cluster.width / 2 {
                    cluster.end - cluster.start
                } else {
                    0
                };
                return Some(Hit::new(cluster.start, trailing));
            }
        }
        Some(Hit::new(last.start, last.end - last.start))
    }

    fn x_for_index(&self, layout: &MonoLayout, line: usize, offset: usize) -> i32 {
        layout.lines.get(line).map_or(0, |line| {
            line.clusters
                .iter()
                .take_while(|c| c.start < offset)
                .fold(0i32, |acc, c| acc.saturating_add(c.width))
        })
    }
}
