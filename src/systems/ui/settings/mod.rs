//! In-game settings overlay.
//!
//! [`SettingsMenu`] owns one [`ControlSurface`] and, while open, one session:
//! the modal window, the page navigator, the field bindings of every mutable
//! control and the pending light snapshot. The host is never stored; every
//! call that touches engine state receives it as `&mut dyn EngineHost`.
//!
//! Per frame the caller runs [`SettingsMenu::update`] then
//! [`SettingsMenu::draw`]. Both are no-ops while the menu is closed.
use std::{collections::HashMap, error::Error, fmt};

use bevy::prelude::*;

use crate::{
    startup::overlay_config::{OverlayConfig, OverlayConfigError},
    systems::ui::surface::{
        ControlId, ControlSurface, ControlValue, Layout, SurfaceError, WindowSpec,
    },
};

pub mod binding;
pub mod catalog;
pub mod defs;
pub mod host;
pub mod navigator;
pub mod page_content;
pub mod pending;

#[cfg(test)]
mod flow_tests;

pub use binding::{BindingContext, Commit, RenderScale};
pub use catalog::{AspectRatio, Resolution};
pub use defs::{MenuAction, PageKind};
pub use host::EngineHost;
pub use pending::PendingEdits;

use binding::BindingTable;
use defs::{TAB_SPACING, WINDOW_TITLE};
use navigator::PageNavigator;
use page_content::{build_page, PageBuilder};

#[derive(Debug)]
pub enum OverlayError {
    Config(OverlayConfigError),
    Surface(SurfaceError),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "settings overlay config is invalid: {err}"),
            Self::Surface(err) => write!(f, "settings overlay surface failed to prepare: {err}"),
        }
    }
}

impl Error for OverlayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Surface(err) => Some(err),
        }
    }
}

impl From<OverlayConfigError> for OverlayError {
    fn from(err: OverlayConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<SurfaceError> for OverlayError {
    fn from(err: SurfaceError) -> Self {
        Self::Surface(err)
    }
}

/// State that only exists while the menu is open.
struct Session {
    window: ControlId,
    pending: PendingEdits,
    bindings: BindingTable,
    actions: HashMap<ControlId, MenuAction>,
    navigator: PageNavigator,
}

#[derive(Resource)]
pub struct SettingsMenu<S: ControlSurface> {
    surface: S,
    config: OverlayConfig,
    session: Option<Session>,
    viewport: Option<UVec2>,
}

impl<S: ControlSurface> SettingsMenu<S> {
    pub fn new(mut surface: S, config: OverlayConfig) -> Result<Self, OverlayError> {
        config.validate()?;
        surface.prepare(&config.theme)?;
        Ok(Self {
            surface,
            config,
            session: None,
            viewport: None,
        })
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_page(&self) -> Option<usize> {
        self.session.as_ref()?.navigator.active()
    }

    pub fn pending(&self) -> Option<&PendingEdits> {
        self.session.as_ref().map(|session| &session.pending)
    }

    /// Root control of the open window.
    pub fn window(&self) -> Option<ControlId> {
        self.session.as_ref().map(|session| session.window)
    }

    pub fn viewport(&self) -> Option<UVec2> {
        self.viewport
    }

    pub fn overlay_config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn window_spec(&self, window_size: (u32, u32)) -> WindowSpec {
        let placement = &self.config.window;
        let (width, height) = window_size;
        let scale = |value: u32, fraction: f32| (value as f32 * fraction) as u32;

        let origin = UVec2::new(
            scale(width, placement.offset_x_fraction),
            scale(height, placement.offset_y_fraction),
        );
        let size = UVec2::new(
            scale(width, placement.size_fraction),
            scale(height, placement.size_fraction),
        );
        WindowSpec {
            title: WINDOW_TITLE.to_string(),
            rect: URect::from_corners(origin, origin + size),
            min_size: UVec2::new(
                scale(width, placement.min_size_fraction),
                scale(height, placement.min_size_fraction),
            ),
            max_size: UVec2::new(width, height),
            title_bar_height: placement.title_bar_height,
            modal: true,
            draggable: true,
            resizable: true,
        }
    }

    /// Builds the window and every page, then shows the first page.
    ///
    /// Opening an already open menu tears the old window down first.
    pub fn open(&mut self, host: &mut dyn EngineHost) {
        if let Some(session) = self.session.take() {
            debug!("settings menu already open; rebuilding");
            self.surface.close_window(session.window);
        }

        let pending = PendingEdits::capture(host.config());
        host.pause();
        host.set_cursor_visible(true);

        let window_size = host.window_size();
        let spec = self.window_spec(window_size);
        let window = self.surface.open_window(&spec);
        let tabs = self.surface.container(window, Layout::Row { spacing: TAB_SPACING });
        let title_label = self.surface.label(window, "");
        let flip_book = self.surface.flip_book(window);

        let mut bindings = BindingTable::default();
        let mut actions = HashMap::new();
        for (index, kind) in PageKind::ALL.into_iter().enumerate() {
            let tab = self.surface.button(tabs, kind.title());
            actions.insert(tab, MenuAction::SelectPage(index));
        }

        let config = host.config();
        let resolutions = catalog::with_current(
            catalog::generate(&self.config.aspect_ratios, &self.config.widths),
            (config.width, config.height),
            window_size,
        );
        let mut builder = PageBuilder {
            surface: &mut self.surface,
            config,
            pending: &pending,
            resolutions: &resolutions,
            bindings: &mut bindings,
            actions: &mut actions,
            flip_book,
        };
        let pages = PageKind::ALL
            .into_iter()
            .map(|kind| build_page(kind, &mut builder))
            .collect();

        let mut navigator = PageNavigator::new(title_label, flip_book, pages);
        navigator.select_page(&mut self.surface, 0);

        info!(
            "settings menu opened at {:?} with {} bound controls",
            spec.rect,
            bindings.len()
        );
        self.session = Some(Session {
            window,
            pending,
            bindings,
            actions,
            navigator,
        });
    }

    /// Resumes the host and releases the whole control tree.
    pub fn close(&mut self, host: &mut dyn EngineHost) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.surface.close_window(session.window);
        host.resume();
        info!("settings menu closed");
    }

    pub fn toggle(&mut self, host: &mut dyn EngineHost) {
        if self.is_open() {
            self.close(host);
        } else {
            self.open(host);
        }
    }

    /// Ticks the surface once and dispatches its events in order.
    pub fn update(&mut self, host: &mut dyn EngineHost, dt: f32) {
        if self.session.is_none() {
            return;
        }

        for event in self.surface.update(dt) {
            let Some(session) = self.session.as_mut() else {
                break;
            };

            if let Some(binding) = session.bindings.get(event.control) {
                let mut cx = BindingContext {
                    host: &mut *host,
                    pending: &mut session.pending,
                };
                let commit = binding.apply(&mut cx, &mut self.surface, event.value);
                if commit == Commit::Applied {
                    debug!("{:?} committed {:?}", event.control, event.value);
                }
                continue;
            }

            match session.actions.get(&event.control).copied() {
                Some(MenuAction::Resume) => {
                    // Events queued behind Resume belong to a closed window.
                    self.close(host);
                    return;
                }
                Some(MenuAction::Exit) => {
                    info!("exit requested from settings menu");
                    host.request_exit();
                }
                Some(MenuAction::SelectPage(index)) => {
                    session.navigator.select_page(&mut self.surface, index);
                }
                None => match event.value {
                    ControlValue::WindowChanged(rect) if event.control == session.window => {
                        debug!("settings window moved/resized to {rect:?}");
                    }
                    _ => debug!("ignoring event from unbound control {event:?}"),
                },
            }
        }
    }

    pub fn draw(&mut self, canvas: &mut S::Canvas) {
        if self.session.is_some() {
            self.surface.draw(canvas);
        }
    }

    /// Records the host viewport. The open window keeps its placement.
    pub fn layout(&mut self, width: u32, height: u32) {
        let viewport = UVec2::new(width, height);
        if self.viewport != Some(viewport) {
            debug!("settings viewport {width}x{height}");
            self.viewport = Some(viewport);
        }
    }
}
