//! Bevy glue for the settings overlay.
//!
//! The menu lives in a [`SettingsMenu`] resource. Each frame Escape may toggle
//! it, then the surface is updated and drawn, in that order. Engine settings
//! are edited on the [`EngineConfig`] resource and mirrored into the primary
//! window whenever it changes.
use std::{marker::PhantomData, path::Path};

use bevy::{
    app::AppExit,
    ecs::system::SystemParam,
    prelude::*,
    time::{Real, Virtual},
    window::{
        CursorOptions, MonitorSelection, PresentMode, PrimaryWindow, WindowMode, WindowResized,
    },
};

use crate::{
    data::engine_config::{EngineConfig, LightRgb},
    startup::overlay_config::{OverlayConfig, OverlayConfigError, DEFAULT_OVERLAY_CONFIG},
    systems::ui::{
        settings::{EngineHost, SettingsMenu},
        surface::ControlSurface,
    },
};

pub struct SettingsOverlayPlugin<S> {
    config: OverlayConfig,
    _surface: PhantomData<fn() -> S>,
}

impl<S> SettingsOverlayPlugin<S> {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            _surface: PhantomData,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OverlayConfigError> {
        OverlayConfig::from_file(path).map(Self::new)
    }
}

impl<S> Default for SettingsOverlayPlugin<S> {
    fn default() -> Self {
        Self::new(DEFAULT_OVERLAY_CONFIG.clone())
    }
}

impl<S> Plugin for SettingsOverlayPlugin<S>
where
    S: ControlSurface + Default + Send + Sync + 'static,
    S::Canvas: Resource + Default,
{
    fn build(&self, app: &mut App) {
        // A menu that cannot be built is a broken install, not a runtime condition.
        let menu = match SettingsMenu::new(S::default(), self.config.clone()) {
            Ok(menu) => menu,
            Err(err) => panic!("{err}"),
        };

        app.init_resource::<EngineConfig>()
            .init_resource::<S::Canvas>()
            .add_message::<WindowResized>()
            .insert_resource(menu)
            .add_systems(
                Update,
                (
                    toggle_settings_menu_from_escape::<S>,
                    layout_settings_menu::<S>,
                    update_settings_menu::<S>,
                    draw_settings_menu::<S>,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                sync_primary_window
                    .run_if(resource_changed::<EngineConfig>)
                    .after(draw_settings_menu::<S>),
            );
    }
}

/// [`EngineHost`] over the ECS resources of one system run.
struct BevyHost<'a> {
    config: Mut<'a, EngineConfig>,
    virtual_time: Mut<'a, Time<Virtual>>,
    cursor_options: Option<Mut<'a, CursorOptions>>,
    window_size: Option<(u32, u32)>,
    exit_requested: bool,
}

impl EngineHost for BevyHost<'_> {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn set_resolution(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
    }

    fn set_render_scale(&mut self, scale: f64) {
        self.config.render_scale = scale;
    }

    fn set_fov_angle(&mut self, degrees: f64) {
        self.config.fov_degrees = degrees;
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.config.fullscreen = fullscreen;
    }

    fn set_vsync_enabled(&mut self, enabled: bool) {
        self.config.vsync = enabled;
    }

    fn set_render_distance(&mut self, distance: f64) {
        self.config.render_distance = distance;
    }

    fn set_floor_texturing(&mut self, enabled: bool) {
        self.config.floor_texturing = enabled;
    }

    fn set_sprite_boxes(&mut self, enabled: bool) {
        self.config.sprite_boxes = enabled;
    }

    fn set_light_falloff(&mut self, falloff: f64) {
        self.config.light_falloff = falloff;
    }

    fn set_global_illumination(&mut self, level: f64) {
        self.config.global_illumination = level;
    }

    fn set_light_rgb(&mut self, min: LightRgb, max: LightRgb) {
        self.config.min_light = min;
        self.config.max_light = max;
    }

    fn pause(&mut self) {
        self.virtual_time.pause();
    }

    fn resume(&mut self) {
        self.virtual_time.unpause();
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        match self.cursor_options.as_mut() {
            Some(cursor_options) => cursor_options.visible = visible,
            None => debug!("no primary window cursor to show"),
        }
    }

    fn window_size(&self) -> (u32, u32) {
        self.window_size
            .unwrap_or((self.config.width, self.config.height))
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }
}

#[derive(SystemParam)]
struct OverlayHost<'w, 's> {
    config: ResMut<'w, EngineConfig>,
    virtual_time: ResMut<'w, Time<Virtual>>,
    cursor_options: Query<'w, 's, &'static mut CursorOptions, With<PrimaryWindow>>,
    windows: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    app_exit: MessageWriter<'w, AppExit>,
}

impl OverlayHost<'_, '_> {
    fn with_host<R>(&mut self, f: impl FnOnce(&mut BevyHost<'_>) -> R) -> R {
        let window_size = self.windows.single().ok().map(|window| {
            (
                window.resolution.width() as u32,
                window.resolution.height() as u32,
            )
        });
        let mut host = BevyHost {
            config: self.config.reborrow(),
            virtual_time: self.virtual_time.reborrow(),
            cursor_options: self.cursor_options.single_mut().ok(),
            window_size,
            exit_requested: false,
        };
        let result = f(&mut host);
        if host.exit_requested {
            self.app_exit.write(AppExit::Success);
        }
        result
    }
}

fn toggle_settings_menu_from_escape<S>(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut menu: ResMut<SettingsMenu<S>>,
    mut host: OverlayHost,
) where
    S: ControlSurface + Send + Sync + 'static,
{
    if !keyboard_input.just_pressed(KeyCode::Escape) {
        return;
    }
    host.with_host(|host| menu.toggle(host));
}

fn layout_settings_menu<S>(
    mut resize_reader: MessageReader<WindowResized>,
    mut menu: ResMut<SettingsMenu<S>>,
) where
    S: ControlSurface + Send + Sync + 'static,
{
    if let Some(resized) = resize_reader.read().last() {
        menu.layout(resized.width as u32, resized.height as u32);
    }
}

fn update_settings_menu<S>(
    real_time: Res<Time<Real>>,
    mut menu: ResMut<SettingsMenu<S>>,
    mut host: OverlayHost,
) where
    S: ControlSurface + Send + Sync + 'static,
{
    if !menu.is_open() {
        return;
    }
    // Virtual time is paused while the menu is up.
    let dt = real_time.delta_secs();
    host.with_host(|host| menu.update(host, dt));
}

fn draw_settings_menu<S>(mut menu: ResMut<SettingsMenu<S>>, mut canvas: ResMut<S::Canvas>)
where
    S: ControlSurface + Send + Sync + 'static,
    S::Canvas: Resource,
{
    if menu.is_open() {
        menu.draw(&mut canvas);
    }
}

fn sync_primary_window(
    config: Res<EngineConfig>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    apply_config_to_window(&mut window, &config);
}

fn apply_config_to_window(window: &mut Window, config: &EngineConfig) {
    let (width, height) = (config.width as f32, config.height as f32);
    if window.resolution.width() != width || window.resolution.height() != height {
        window.resolution.set(width, height);
    }

    let mode = if config.fullscreen {
        WindowMode::BorderlessFullscreen(MonitorSelection::Current)
    } else {
        WindowMode::Windowed
    };
    if window.mode != mode {
        window.mode = mode;
    }

    let present_mode = if config.vsync {
        PresentMode::AutoVsync
    } else {
        PresentMode::AutoNoVsync
    };
    if window.present_mode != present_mode {
        window.present_mode = present_mode;
    }
}
