//! Process-wide UI state and text widgets.
//!
//! The UI thread owns a single [`UiContext`] created by [`init_ui`] and
//! dropped by [`teardown_ui`]. Widgets reach it through [`with_ui`]; using
//! it outside that window is an error rather than a lazily created default.

pub mod cache;
pub mod text_view;
pub mod widget;

use std::cell::RefCell;
use std::rc::Rc;

use core_config::Config;
use core_layout::{MonoLayout, MonospaceMeasurer, TextMeasurementPort, TextStyle};
use core_select::SessionSettings;
use tracing::debug;

pub use cache::{LayoutCache, LayoutKey};
pub use text_view::TextView;
pub use widget::{PaintOp, Widget, WidgetId};

/// Pixel advance of one cell in the monospace measurer.
pub const DEFAULT_CELL_PX: f32 = 8.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UiError {
    #[error("UI state used before init_ui")]
    NotInitialised,
    #[error("init_ui called twice without teardown_ui")]
    AlreadyInitialised,
}

#[derive(Debug)]
pub struct UiContext {
    measurer: MonospaceMeasurer,
    layouts: LayoutCache<MonoLayout>,
    settings: SessionSettings,
    dpi_scale: f32,
    active: Option<WidgetId>,
    next_id: u64,
}

impl UiContext {
    fn new(config: &Config) -> Self {
        let dpi_scale = config.dpi_scale();
        Self {
            measurer: MonospaceMeasurer::new(DEFAULT_CELL_PX * dpi_scale),
            layouts: LayoutCache::default(),
            settings: SessionSettings::from_config(config),
            dpi_scale,
            active: None,
            next_id: 1,
        }
    }

    pub fn measurer(&self) -> &MonospaceMeasurer {
        &self.measurer
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    pub fn dpi_scale(&self) -> f32 {
        self.dpi_scale
    }

    pub fn layouts(&self) -> &LayoutCache<MonoLayout> {
        &self.layouts
    }

    /// Measured layout for `text`, served from the cache when possible.
    pub fn layout_for(&mut self, text: &str, max_width: Option<i32>, style: TextStyle) -> Rc<MonoLayout> {
        let key = LayoutKey::new(text, max_width, style);
        let measurer = self.measurer;
        self.layouts
            .get_or_insert_with(key, || measurer.measure(text, max_width, &style))
    }

    pub fn allocate_id(&mut self) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Widget holding keyboard focus.
    pub fn active_widget(&self) -> Option<WidgetId> {
        self.active
    }

    pub fn set_active_widget(&mut self, id: Option<WidgetId>) {
        if self.active != id {
            debug!(target: "ui", from = ?self.active, to = ?id, "active_widget_changed");
            self.active = id;
        }
    }
}

thread_local! {
    static UI: RefCell<Option<UiContext>> = const { RefCell::new(None) };
}

pub fn init_ui(config: &Config) -> Result<(), UiError> {
    UI.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return Err(UiError::AlreadyInitialised);
        }
        *slot = Some(UiContext::new(config));
        debug!(target: "ui", dpi_scale = config.dpi_scale(), "ui_init");
        Ok(())
    })
}

/// Drop the UI state. Returns `false` if there was none.
pub fn teardown_ui() -> bool {
    let had = UI.with(|slot| slot.borrow_mut().take()).is_some();
    debug!(target: "ui", had, "ui_teardown");
    had
}

pub fn is_initialised() -> bool {
    UI.with(|slot| slot.borrow().is_some())
}

/// Run `f` against the UI state. Must not be re-entered from inside `f`.
pub fn with_ui<R>(f: impl FnOnce(&mut UiContext) -> R) -> Result<R, UiError> {
    UI.with(|slot| {
        let mut slot = slot.borrow_mut();
        let ctx = slot.as_mut().ok_or(UiError::NotInitialised)?;
        Ok(f(ctx))
    })
}
