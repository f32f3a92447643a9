//! Edge auto-scroll while a drag leaves the viewport vertically.
//!
//! Speed grows with the overshoot: `scalar = min(max(d / divisor * dpi, 1), max_scalar)`
//! and each tick moves the scroll target by `scalar * step * dpi` pixels.

use core_config::AutoScrollConfig;
use core_layout::Rect;
use tracing::trace;

/// Whether a periodic timer should fire again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScroller {
    pub distance_divisor: f32,
    pub max_scalar: f32,
    pub step: f32,
    pub tick_ms: u64,
    pub dpi_scale: f32,
}

impl Default for AutoScroller {
    fn default() -> Self {
        Self::from_config(&AutoScrollConfig::default(), 1.0)
    }
}

impl AutoScroller {
    pub fn from_config(cfg: &AutoScrollConfig, dpi_scale: f32) -> Self {
        Self {
            distance_divisor: cfg.distance_divisor,
            max_scalar: cfg.max_scalar,
            step: cfg.step,
            tick_ms: cfg.tick_ms,
            dpi_scale,
        }
    }

    /// Speed multiplier for a pointer `distance` pixels past the edge.
    pub fn scalar(&self, distance: f32) -> f32 {
        (distance / self.distance_divisor * self.dpi_scale)
            .max(1.0)
            .min(self.max_scalar)
    }

    /// Signed scroll delta per tick for a pointer at viewport-space `y`:
    /// negative above the viewport, positive below, 0 inside.
    pub fn delta(&self, y: f32, viewport: Rect) -> f32 {
        let (distance, sign) = if y < viewport.top() {
            (viewport.top() - y, -1.0)
        } else if y > viewport.bottom() {
            (y - viewport.bottom(), 1.0)
        } else {
            return 0.0;
        };
        let delta = sign * self.scalar(distance) * self.step * self.dpi_scale;
        trace!(target: "select.autoscroll", distance, delta, "delta");
        delta
    }
}
