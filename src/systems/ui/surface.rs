//! Control-surface capability contract.
//!
//! The settings overlay never renders or routes input itself. It talks to a
//! GUI toolkit through [`ControlSurface`]: the toolkit creates controls on
//! request, hands back opaque [`ControlId`]s and reports user edits as
//! [`ControlEvent`]s drained once per frame from [`ControlSurface::update`].
use std::{error::Error, fmt, ops::RangeInclusive};

use bevy::prelude::*;
use smallvec::SmallVec;

use crate::startup::overlay_config::ThemeConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Children stacked top to bottom.
    Column { spacing: u32 },
    /// Children laid out left to right.
    Row { spacing: u32 },
    Grid { columns: u32, spacing: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    pub rect: URect,
    pub min_size: UVec2,
    pub max_size: UVec2,
    pub title_bar_height: u32,
    pub modal: bool,
    pub draggable: bool,
    pub resizable: bool,
}

/// Control-native value carried by a change event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlValue {
    Int(i32),
    Toggle(bool),
    Choice(usize),
    Clicked,
    /// The window was moved or resized by its chrome.
    WindowChanged(URect),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlEvent {
    pub control: ControlId,
    pub value: ControlValue,
}

pub type ControlEvents = SmallVec<[ControlEvent; 4]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    MissingAsset { role: String, asset: String },
    Backend(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAsset { role, asset } => {
                write!(f, "missing theme asset `{asset}` for {role}")
            }
            Self::Backend(err) => write!(f, "surface backend error: {err}"),
        }
    }
}

impl Error for SurfaceError {}

pub trait ControlSurface {
    /// Target handed to [`ControlSurface::draw`].
    type Canvas;

    /// Resolves theme assets. Called once before any window is opened.
    fn prepare(&mut self, theme: &ThemeConfig) -> Result<(), SurfaceError>;

    /// Opens a window and returns its content container.
    fn open_window(&mut self, spec: &WindowSpec) -> ControlId;
    /// Destroys a window and every control below it.
    fn close_window(&mut self, window: ControlId);

    fn container(&mut self, parent: ControlId, layout: Layout) -> ControlId;
    fn label(&mut self, parent: ControlId, text: &str) -> ControlId;
    fn button(&mut self, parent: ControlId, text: &str) -> ControlId;
    fn slider(&mut self, parent: ControlId, range: RangeInclusive<i32>, value: i32) -> ControlId;
    fn checkbox(&mut self, parent: ControlId, text: &str, checked: bool) -> ControlId;
    fn combo_box(
        &mut self,
        parent: ControlId,
        entries: &[String],
        selected: Option<usize>,
    ) -> ControlId;
    /// Read-only colour indicator.
    fn swatch(&mut self, parent: ControlId, color: Color) -> ControlId;
    fn separator(&mut self, parent: ControlId) -> ControlId;

    /// Container that shows exactly one of its pages at a time.
    fn flip_book(&mut self, parent: ControlId) -> ControlId;
    /// Adds a hidden page container to a flip book.
    fn page(&mut self, flip_book: ControlId, layout: Layout) -> ControlId;
    /// Atomically swaps the visible page of a flip book.
    fn show_page(&mut self, flip_book: ControlId, page: ControlId);
    fn request_relayout(&mut self, control: ControlId);

    fn set_text(&mut self, control: ControlId, text: &str);
    fn set_swatch(&mut self, control: ControlId, color: Color);

    /// Per-frame tick. Returns the change events raised since the last tick.
    fn update(&mut self, dt: f32) -> ControlEvents;
    fn draw(&mut self, canvas: &mut Self::Canvas);
}
