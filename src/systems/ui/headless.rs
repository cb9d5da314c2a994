//! Retained, renderer-free [`ControlSurface`].
//!
//! Keeps the control tree in memory and lets callers inject user edits
//! (`slide`, `toggle`, `select`, `click`) that surface as change events on the
//! next `update`. Used for automation and by the overlay tests.
use std::{
    collections::{HashMap, HashSet},
    ops::RangeInclusive,
};

use bevy::prelude::*;

use crate::startup::overlay_config::ThemeConfig;

use super::surface::{
    ControlEvent, ControlEvents, ControlId, ControlSurface, ControlValue, Layout, SurfaceError,
    WindowSpec,
};

#[derive(Clone, Debug, PartialEq)]
pub enum HeadlessControl {
    Window(WindowSpec),
    Container(Layout),
    Label(String),
    Button(String),
    Slider { range: RangeInclusive<i32>, value: i32 },
    Checkbox { text: String, checked: bool },
    ComboBox { entries: Vec<String>, selected: Option<usize> },
    Swatch(Color),
    Separator,
    FlipBook { visible: Option<ControlId> },
    Page(Layout),
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<ControlId>,
    children: Vec<ControlId>,
    control: HeadlessControl,
}

/// Per-frame surface calls, in the order they happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameCall {
    Update,
    Draw,
}

/// Canvas for [`HeadlessSurface`]; counts presented frames.
#[derive(Resource, Clone, Debug, Default, PartialEq, Eq)]
pub struct HeadlessCanvas {
    pub frames_drawn: u64,
    pub last_window_title: Option<String>,
}

#[derive(Debug, Default)]
pub struct HeadlessSurface {
    nodes: HashMap<ControlId, Node>,
    windows: Vec<ControlId>,
    next_id: u32,
    queued: Vec<ControlEvent>,
    frame_calls: Vec<FrameCall>,
    relayouts: usize,
    available_assets: Option<HashSet<String>>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts `prepare` to the given asset names.
    pub fn with_available_assets<I, S>(assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available_assets: Some(assets.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    fn insert(&mut self, parent: Option<ControlId>, control: HeadlessControl) -> ControlId {
        let id = ControlId(self.next_id);
        self.next_id += 1;
        if let Some(parent) = parent {
            match self.nodes.get_mut(&parent) {
                Some(node) => node.children.push(id),
                None => warn!("headless surface: parent {parent:?} does not exist"),
            }
        }
        self.nodes.insert(
            id,
            Node {
                parent,
                children: Vec::new(),
                control,
            },
        );
        id
    }

    fn remove_subtree(&mut self, root: ControlId) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.remove(&id) {
                stack.extend(node.children);
            }
        }
    }

    fn queue(&mut self, control: ControlId, value: ControlValue) {
        self.queued.push(ControlEvent { control, value });
    }

    pub fn control(&self, id: ControlId) -> Option<&HeadlessControl> {
        self.nodes.get(&id).map(|node| &node.control)
    }

    pub fn children(&self, id: ControlId) -> &[ControlId] {
        self.nodes
            .get(&id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    pub fn next_sibling(&self, id: ControlId) -> Option<ControlId> {
        let siblings = self.children(self.parent(id)?);
        let position = siblings.iter().position(|&sibling| sibling == id)?;
        siblings.get(position + 1).copied()
    }

    pub fn windows(&self) -> &[ControlId] {
        &self.windows
    }

    pub fn control_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn frame_calls(&self) -> &[FrameCall] {
        &self.frame_calls
    }

    pub fn relayout_requests(&self) -> usize {
        self.relayouts
    }

    /// Text of a label, button or checkbox.
    pub fn text(&self, id: ControlId) -> Option<&str> {
        match self.control(id)? {
            HeadlessControl::Label(text) | HeadlessControl::Button(text) => Some(text.as_str()),
            HeadlessControl::Checkbox { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn slider_value(&self, id: ControlId) -> Option<i32> {
        match self.control(id)? {
            HeadlessControl::Slider { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn is_checked(&self, id: ControlId) -> Option<bool> {
        match self.control(id)? {
            HeadlessControl::Checkbox { checked, .. } => Some(*checked),
            _ => None,
        }
    }

    pub fn combo_state(&self, id: ControlId) -> Option<(&[String], Option<usize>)> {
        match self.control(id)? {
            HeadlessControl::ComboBox { entries, selected } => {
                Some((entries.as_slice(), *selected))
            }
            _ => None,
        }
    }

    pub fn swatch_color(&self, id: ControlId) -> Option<Color> {
        match self.control(id)? {
            HeadlessControl::Swatch(color) => Some(*color),
            _ => None,
        }
    }

    pub fn visible_page(&self, flip_book: ControlId) -> Option<ControlId> {
        match self.control(flip_book)? {
            HeadlessControl::FlipBook { visible } => *visible,
            _ => None,
        }
    }

    /// Finds the first label whose text matches exactly, in creation order.
    pub fn find_label(&self, text: &str) -> Option<ControlId> {
        self.find(|control| matches!(control, HeadlessControl::Label(label) if label == text))
    }

    pub fn find_button(&self, text: &str) -> Option<ControlId> {
        self.find(|control| matches!(control, HeadlessControl::Button(label) if label == text))
    }

    pub fn find_checkbox(&self, text: &str) -> Option<ControlId> {
        self.find(|control| {
            matches!(control, HeadlessControl::Checkbox { text: label, .. } if label == text)
        })
    }

    pub fn find_flip_book(&self) -> Option<ControlId> {
        self.find(|control| matches!(control, HeadlessControl::FlipBook { .. }))
    }

    /// The control placed right after the label with `text`.
    pub fn labelled(&self, text: &str) -> Option<ControlId> {
        self.next_sibling(self.find_label(text)?)
    }

    fn find(&self, predicate: impl Fn(&HeadlessControl) -> bool) -> Option<ControlId> {
        let mut ids: Vec<&ControlId> = self.nodes.keys().collect();
        ids.sort_unstable();
        ids.into_iter()
            .find(|id| predicate(&self.nodes[*id].control))
            .copied()
    }

    /// Drags a slider; the value is clamped to the slider range like a real toolkit would.
    pub fn slide(&mut self, id: ControlId, value: i32) {
        let Some(Node {
            control: HeadlessControl::Slider { range, value: current },
            ..
        }) = self.nodes.get_mut(&id)
        else {
            warn!("headless surface: {id:?} is not a slider");
            return;
        };
        *current = value.clamp(*range.start(), *range.end());
        let current = *current;
        self.queue(id, ControlValue::Int(current));
    }

    pub fn toggle(&mut self, id: ControlId) {
        let Some(Node {
            control: HeadlessControl::Checkbox { checked, .. },
            ..
        }) = self.nodes.get_mut(&id)
        else {
            warn!("headless surface: {id:?} is not a checkbox");
            return;
        };
        *checked = !*checked;
        let checked = *checked;
        self.queue(id, ControlValue::Toggle(checked));
    }

    pub fn select(&mut self, id: ControlId, index: usize) {
        let Some(Node {
            control: HeadlessControl::ComboBox { entries, selected },
            ..
        }) = self.nodes.get_mut(&id)
        else {
            warn!("headless surface: {id:?} is not a combo box");
            return;
        };
        if index >= entries.len() {
            warn!("headless surface: entry {index} out of range for {id:?}");
            return;
        }
        *selected = Some(index);
        self.queue(id, ControlValue::Choice(index));
    }

    pub fn click(&mut self, id: ControlId) {
        if !matches!(self.control(id), Some(HeadlessControl::Button(_))) {
            warn!("headless surface: {id:?} is not a button");
            return;
        }
        self.queue(id, ControlValue::Clicked);
    }

    /// Queues a raw event without touching control state.
    pub fn inject(&mut self, event: ControlEvent) {
        self.queued.push(event);
    }
}

impl ControlSurface for HeadlessSurface {
    type Canvas = HeadlessCanvas;

    fn prepare(&mut self, theme: &ThemeConfig) -> Result<(), SurfaceError> {
        let Some(available) = &self.available_assets else {
            return Ok(());
        };
        for (role, asset) in theme.assets() {
            if !available.contains(asset) {
                return Err(SurfaceError::MissingAsset {
                    role: role.to_string(),
                    asset: asset.to_string(),
                });
            }
        }
        Ok(())
    }

    fn open_window(&mut self, spec: &WindowSpec) -> ControlId {
        let window = self.insert(None, HeadlessControl::Window(spec.clone()));
        self.windows.push(window);
        window
    }

    fn close_window(&mut self, window: ControlId) {
        self.windows.retain(|&open| open != window);
        self.remove_subtree(window);
        self.queued
            .retain(|event| self.nodes.contains_key(&event.control));
    }

    fn container(&mut self, parent: ControlId, layout: Layout) -> ControlId {
        self.insert(Some(parent), HeadlessControl::Container(layout))
    }

    fn label(&mut self, parent: ControlId, text: &str) -> ControlId {
        self.insert(Some(parent), HeadlessControl::Label(text.to_string()))
    }

    fn button(&mut self, parent: ControlId, text: &str) -> ControlId {
        self.insert(Some(parent), HeadlessControl::Button(text.to_string()))
    }

    fn slider(&mut self, parent: ControlId, range: RangeInclusive<i32>, value: i32) -> ControlId {
        self.insert(Some(parent), HeadlessControl::Slider { range, value })
    }

    fn checkbox(&mut self, parent: ControlId, text: &str, checked: bool) -> ControlId {
        self.insert(
            Some(parent),
            HeadlessControl::Checkbox {
                text: text.to_string(),
                checked,
            },
        )
    }

    fn combo_box(
        &mut self,
        parent: ControlId,
        entries: &[String],
        selected: Option<usize>,
    ) -> ControlId {
        self.insert(
            Some(parent),
            HeadlessControl::ComboBox {
                entries: entries.to_vec(),
                selected,
            },
        )
    }

    fn swatch(&mut self, parent: ControlId, color: Color) -> ControlId {
        self.insert(Some(parent), HeadlessControl::Swatch(color))
    }

    fn separator(&mut self, parent: ControlId) -> ControlId {
        self.insert(Some(parent), HeadlessControl::Separator)
    }

    fn flip_book(&mut self, parent: ControlId) -> ControlId {
        self.insert(Some(parent), HeadlessControl::FlipBook { visible: None })
    }

    fn page(&mut self, flip_book: ControlId, layout: Layout) -> ControlId {
        self.insert(Some(flip_book), HeadlessControl::Page(layout))
    }

    fn show_page(&mut self, flip_book: ControlId, page: ControlId) {
        match self.nodes.get_mut(&flip_book) {
            Some(Node {
                control: HeadlessControl::FlipBook { visible },
                ..
            }) => *visible = Some(page),
            _ => warn!("headless surface: {flip_book:?} is not a flip book"),
        }
    }

    fn request_relayout(&mut self, _control: ControlId) {
        self.relayouts += 1;
    }

    fn set_text(&mut self, control: ControlId, text: &str) {
        match self.nodes.get_mut(&control).map(|node| &mut node.control) {
            Some(HeadlessControl::Label(label)) | Some(HeadlessControl::Button(label)) => {
                *label = text.to_string();
            }
            _ => warn!("headless surface: {control:?} has no text"),
        }
    }

    fn set_swatch(&mut self, control: ControlId, color: Color) {
        match self.nodes.get_mut(&control).map(|node| &mut node.control) {
            Some(HeadlessControl::Swatch(current)) => *current = color,
            _ => warn!("headless surface: {control:?} is not a swatch"),
        }
    }

    fn update(&mut self, _dt: f32) -> ControlEvents {
        self.frame_calls.push(FrameCall::Update);
        self.queued.drain(..).collect()
    }

    fn draw(&mut self, canvas: &mut HeadlessCanvas) {
        self.frame_calls.push(FrameCall::Draw);
        canvas.frames_drawn += 1;
        canvas.last_window_title = self.windows.last().and_then(|window| {
            match self.control(*window) {
                Some(HeadlessControl::Window(spec)) => Some(spec.title.clone()),
                _ => None,
            }
        });
    }
}
