//! Pointer-driven selection across the text blocks of a scroll region.
//!
//! * [`ClickClassifier`] turns press timestamps into click counts.
//! * [`SelectionSession`] runs a gesture: begin on press, update on drag,
//!   end on release, auto-scroll ticks in between.
//! * [`ScrollHost`] and [`TextBlock`] are implemented by the surfaces.

pub mod autoscroll;
pub mod click;
pub mod host;
pub mod session;

pub use autoscroll::{AutoScroller, TickOutcome};
pub use click::{ClickClassifier, Granularity};
pub use host::{ScrollHost, TextBlock};
pub use session::{SelectionSession, SessionSettings};
