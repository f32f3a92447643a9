//! Caret and selection geometry for renderers.

use crate::measure::{LineExtent, TextMeasurementPort};
use crate::{Rect, units_to_px};

pub const CARET_WIDTH_PX: f32 = 1.0;

/// Visual line showing the caret at `offset`. At a soft-wrap boundary the
/// caret belongs to the following line.
fn line_for_offset(lines: &[LineExtent], offset: usize) -> Option<usize> {
    lines.iter().rposition(|line| line.start <= offset)
}

/// Pixel rectangle of a caret placed before `offset`, relative to the
/// layout origin. `None` for a layout without lines.
pub fn caret_rect<P>(port: &P, layout: &P::Layout, offset: usize) -> Option<Rect>
where
    P: TextMeasurementPort + ?Sized,
{
    let lines = port.line_extents(layout);
    let index = line_for_offset(&lines, offset)?;
    let line = &lines[index];
    let x = line.left.saturating_add(port.x_for_index(layout, index, offset.min(line.end)));
    Some(Rect::new(
        units_to_px(x),
        units_to_px(line.top),
        CARET_WIDTH_PX,
        units_to_px(line.height),
    ))
}

/// One pixel rectangle per visual line covered by `start..end` (either
/// order). Lines contributing no width are skipped.
pub fn selection_rects<P>(port: &P, layout: &P::Layout, start: usize, end: usize) -> Vec<Rect>
where
    P: TextMeasurementPort + ?Sized,
{
    let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
    if lo == hi {
        return Vec::new();
    }
    port.line_extents(layout)
        .iter()
        .enumerate()
        .filter(|(_, line)| lo <= line.end && hi > line.start)
        .filter_map(|(index, line)| {
            let left = port.x_for_index(layout, index, lo.max(line.start));
            let right = port.x_for_index(layout, index, hi.min(line.end));
            (right > left).then(|| {
                Rect::new(
                    units_to_px(line.left.saturating_add(left)),
                    units_to_px(line.top),
                    units_to_px(right - left),
                    units_to_px(line.height),
                )
            })
        })
        .collect()
}
