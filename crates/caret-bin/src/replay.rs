//! Replays a [`Script`] against text views in a simulated scroll region.

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use core_config::Config;
use core_events::PointerKind;
use core_layout::{Point, Rect};
use core_select::{ScrollHost, SelectionSession, TextBlock, TickOutcome};
use core_state::{SharedBuffer, TextBuffer, UndoPolicy};
use core_ui::{TextView, Widget, init_ui, teardown_ui, with_ui};
use tokio::time::{Instant, Interval, interval_at, sleep_until};
use tracing::{debug, info, trace};

use crate::script::{Script, Step};

/// Scroll region owning the replayed views. Scroll targets apply at once,
/// clamped to the content.
pub struct Panel {
    viewport: Rect,
    offset: Point,
    views: Vec<TextView>,
}

impl Panel {
    fn content_height(&self) -> f32 {
        self.views
            .iter()
            .map(|v| v.bounds().bottom())
            .fold(0.0, f32::max)
    }
}

impl ScrollHost for Panel {
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
        self.views.iter().map(|v| v as &dyn TextBlock).collect()
    }

    fn blocks_mut(&mut self) -> Vec<&mut dyn TextBlock> {
        self.views
            .iter_mut()
            .map(|v| v as &mut dyn TextBlock)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockReport {
    pub selection: (usize, usize),
    pub cursor: usize,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub blocks: Vec<BlockReport>,
    pub scroll: Point,
    pub focused: Option<usize>,
    pub ticks: u32,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, block) in self.blocks.iter().enumerate() {
            let (start, end) = block.selection;
            let marker = if self.focused == Some(index) { "*" } else { " " };
            writeln!(
                f,
                "{marker}block {index}: selection {start}..{end} cursor {} {:?}",
                block.cursor, block.content
            )?;
        }
        write!(f, "scroll {},{} after {} ticks", self.scroll.x, self.scroll.y, self.ticks)
    }
}

/// Tears the UI context down when the replay ends, early returns included.
struct UiScope;

impl UiScope {
    fn enter(config: &Config) -> Result<Self> {
        init_ui(config)?;
        Ok(Self)
    }
}

impl Drop for UiScope {
    fn drop(&mut self) {
        teardown_ui();
    }
}

fn build_panel(script: &Script, config: &Config) -> Result<Panel> {
    let policy = UndoPolicy {
        history_limit: config.file.undo.history_limit,
        coalesce_cursor: config.file.undo.coalesce_cursor,
    };
    let mut views = Vec::with_capacity(script.blocks.len());
    let mut next_top = 0.0f32;
    for block in &script.blocks {
        let buffer = SharedBuffer::new(TextBuffer::with_content(&block.text).with_policy(policy));
        let origin = Point::new(block.x.unwrap_or(0.0), block.y.unwrap_or(next_top));
        let width = block.width.unwrap_or(script.viewport.width);
        let mut view = TextView::new(buffer, origin, Some(width))?;
        if block.single_line {
            view = view.single_line();
        }
        next_top = view.bounds().bottom();
        views.push(view);
    }
    Ok(Panel {
        viewport: Rect::new(0.0, 0.0, script.viewport.width, script.viewport.height),
        offset: Point::default(),
        views,
    })
}

fn scaled(ms: u64, speed: f64) -> Duration {
    Duration::from_secs_f64(ms as f64 / 1000.0 / speed)
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

enum Wake {
    Step,
    Tick,
}

/// Run `script` to completion. Event times are divided by `speed`; the
/// auto-scroll interval is scaled the same way.
pub async fn replay(script: &Script, config: &Config, speed: f64) -> Result<Report> {
    let _ui = UiScope::enter(config)?;
    let mut panel = build_panel(script, config)?;
    let mut session = SelectionSession::new(with_ui(|ui| ui.settings())?);
    let period = scaled(session.autoscroller().tick_ms, speed).max(Duration::from_millis(1));

    info!(target: "runtime", blocks = panel.views.len(), steps = script.steps.len(), speed, "replay_start");
    let start = Instant::now();
    let mut ticker: Option<Interval> = None;
    let mut ticks = 0u32;
    let mut steps = script.steps.iter();
    let mut pending = steps.next();

    while let Some(step) = pending {
        let due = start + scaled(step.at_ms(), speed);
        let wake = tokio::select! {
            biased;
            _ = sleep_until(due) => Wake::Step,
            _ = next_tick(&mut ticker) => Wake::Tick,
        };
        match wake {
            Wake::Tick => {
                ticks += 1;
                if session.on_tick(&mut panel) == TickOutcome::Stop {
                    ticker = None;
                }
            }
            Wake::Step => {
                if apply_step(&mut session, &mut panel, step) {
                    ticker = Some(interval_at(Instant::now() + period, period));
                }
                pending = steps.next();
            }
        }
    }

    let report = Report {
        blocks: panel
            .views
            .iter()
            .map(|view| {
                let buffer = view.buffer().borrow();
                BlockReport {
                    selection: buffer.selection_range().unwrap_or((0, 0)),
                    cursor: buffer.cursor(),
                    content: buffer.content().to_string(),
                }
            })
            .collect(),
        scroll: panel.scroll_offset(),
        focused: session.focused_index(&panel),
        ticks,
    };
    info!(target: "runtime", ticks, "replay_complete");
    Ok(report)
}

/// Feed one step to the session. Returns `true` when the auto-scroll timer
/// should start.
fn apply_step(session: &mut SelectionSession, panel: &mut Panel, step: &Step) -> bool {
    match step {
        Step::Pointer(ev) => match ev.kind {
            PointerKind::Down => {
                let count = session.on_pointer_down(panel, ev.pos, ev.time_ms);
                let focused = session.focused_index(&*panel);
                for (index, view) in panel.views.iter_mut().enumerate() {
                    view.set_focused(focused == Some(index));
                }
                debug!(target: "runtime", count, focused = ?focused, "pointer_down");
                false
            }
            PointerKind::Move => session.on_pointer_move(panel, ev.pos),
            PointerKind::Up => {
                session.on_pointer_up(panel, ev.pos);
                false
            }
        },
        Step::Key { key, .. } => {
            let result = session.on_key_event(panel, key);
            trace!(target: "runtime", key = %key, dirty = result.dirty, "key");
            false
        }
        Step::Wait { .. } => false,
    }
}
