//! Geometry and text measurement for hit testing.
//!
//! Two coordinate systems meet here:
//! * pixel space (`f32`): pointer positions, block bounds, viewport rects;
//! * layout units (`i32`): pixels scaled by [`UNIT_SCALE`], the resolution
//!   the measurement service works in.
//!
//! The measurement service itself is opaque ([`TextMeasurementPort`]); this
//! crate only derives answers from the line extents and per-line index
//! queries it exposes. [`MonospaceMeasurer`] is a fixed-advance reference
//! implementation used by tests and the command line tool.

pub mod hit;
pub mod measure;
pub mod monospace;
pub mod rects;

pub use hit::{Hit, line_at, locate};
pub use measure::{LineExtent, TextMeasurementPort, TextStyle, Wrap};
pub use monospace::{MonoLayout, MonospaceMeasurer};
pub use rects::{caret_rect, selection_rects};

/// Layout units per pixel.
pub const UNIT_SCALE: i32 = 1024;

/// Convert pixels to layout units. Saturates at the `i32` range.
pub fn px_to_units(px: f32) -> i32 {
    (px * UNIT_SCALE as f32).round() as i32
}

pub fn units_to_px(units: i32) -> f32 {
    units as f32 / UNIT_SCALE as f32
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle in pixels. `width`/`height` are never negative
/// when built through [`Rect::new`] or [`Rect::spanning`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Smallest rectangle containing both points.
    pub fn spanning(a: Point, b: Point) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self::new(left, top, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Edges count as inside so a zero-height drag box still meets the
    /// line it runs along.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Closed-interval overlap test (touching edges intersect).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_conversion_round_trips_whole_pixels() {
        assert_eq!(px_to_units(3.0), 3 * UNIT_SCALE);
        assert_eq!(units_to_px(px_to_units(12.0)), 12.0);
        assert_eq!(px_to_units(f32::MAX), i32::MAX);
    }

    #[test]
    fn spanning_normalises_corners() {
        let r = Rect::spanning(Point::new(30.0, 5.0), Point::new(10.0, 25.0));
        assert_eq!(r, Rect::new(10.0, 5.0, 20.0, 20.0));
    }

    #[test]
    fn degenerate_rect_still_intersects() {
        let line = Rect::new(0.0, 10.0, 100.0, 20.0);
        let flat = Rect::spanning(Point::new(5.0, 15.0), Point::new(50.0, 15.0));
        assert!(flat.intersects(&line));
        assert!(!flat.intersects(&Rect::new(0.0, 40.0, 100.0, 20.0)));
        let clipped = flat.intersection(&line).unwrap();
        assert_eq!(clipped.height, 0.0);
        assert_eq!(clipped.width, 45.0);
    }

    #[test]
    fn disjoint_rects_have_no_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert_eq!(a.intersection(&b), None);
    }
}
