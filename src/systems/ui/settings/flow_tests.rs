use bevy::prelude::*;

use crate::{
    data::engine_config::{EngineConfig, LightRgb},
    startup::overlay_config::{OverlayConfig, ThemeConfig},
    systems::ui::{
        headless::{FrameCall, HeadlessCanvas, HeadlessControl, HeadlessSurface},
        surface::{ControlEvent, ControlId, ControlValue, SurfaceError},
    },
};

use super::{
    defs::{
        EXIT_TEXT, FOV_TEXT, MAX_LIGHT_TEXT, MIN_LIGHT_TEXT, RENDER_SCALING_TEXT, RESOLUTION_TEXT,
        RESUME_TEXT,
    },
    EngineHost, OverlayError, SettingsMenu,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum HostCall {
    Resolution(u32, u32),
    RenderScale(f64),
    Fov(f64),
    Fullscreen(bool),
    Vsync(bool),
    RenderDistance(f64),
    FloorTexturing(bool),
    SpriteBoxes(bool),
    LightFalloff(f64),
    GlobalIllumination(f64),
    LightRgb(LightRgb, LightRgb),
    Pause,
    Resume,
    CursorVisible(bool),
    Exit,
}

/// Host that applies every setter to its config and records the call.
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub config: EngineConfig,
    pub calls: Vec<HostCall>,
    pub window: Option<(u32, u32)>,
}

impl RecordingHost {
    pub fn light_commits(&self) -> Vec<(LightRgb, LightRgb)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::LightRgb(min, max) => Some((*min, *max)),
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

impl EngineHost for RecordingHost {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn set_resolution(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.calls.push(HostCall::Resolution(width, height));
    }

    fn set_render_scale(&mut self, scale: f64) {
        self.config.render_scale = scale;
        self.calls.push(HostCall::RenderScale(scale));
    }

    fn set_fov_angle(&mut self, degrees: f64) {
        self.config.fov_degrees = degrees;
        self.calls.push(HostCall::Fov(degrees));
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.config.fullscreen = fullscreen;
        self.calls.push(HostCall::Fullscreen(fullscreen));
    }

    fn set_vsync_enabled(&mut self, enabled: bool) {
        self.config.vsync = enabled;
        self.calls.push(HostCall::Vsync(enabled));
    }

    fn set_render_distance(&mut self, distance: f64) {
        self.config.render_distance = distance;
        self.calls.push(HostCall::RenderDistance(distance));
    }

    fn set_floor_texturing(&mut self, enabled: bool) {
        self.config.floor_texturing = enabled;
        self.calls.push(HostCall::FloorTexturing(enabled));
    }

    fn set_sprite_boxes(&mut self, enabled: bool) {
        self.config.sprite_boxes = enabled;
        self.calls.push(HostCall::SpriteBoxes(enabled));
    }

    fn set_light_falloff(&mut self, falloff: f64) {
        self.config.light_falloff = falloff;
        self.calls.push(HostCall::LightFalloff(falloff));
    }

    fn set_global_illumination(&mut self, level: f64) {
        self.config.global_illumination = level;
        self.calls.push(HostCall::GlobalIllumination(level));
    }

    fn set_light_rgb(&mut self, min: LightRgb, max: LightRgb) {
        self.config.min_light = min;
        self.config.max_light = max;
        self.calls.push(HostCall::LightRgb(min, max));
    }

    fn pause(&mut self) {
        self.calls.push(HostCall::Pause);
    }

    fn resume(&mut self) {
        self.calls.push(HostCall::Resume);
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.calls.push(HostCall::CursorVisible(visible));
    }

    fn window_size(&self) -> (u32, u32) {
        self.window
            .unwrap_or((self.config.width, self.config.height))
    }

    fn request_exit(&mut self) {
        self.calls.push(HostCall::Exit);
    }
}

fn menu() -> SettingsMenu<HeadlessSurface> {
    SettingsMenu::new(HeadlessSurface::new(), OverlayConfig::default())
        .expect("default overlay should build")
}

fn opened(host: &mut RecordingHost) -> SettingsMenu<HeadlessSurface> {
    let mut menu = menu();
    menu.open(host);
    host.calls.clear();
    menu
}

fn click_button(menu: &mut SettingsMenu<HeadlessSurface>, text: &str) {
    let button = menu.surface().find_button(text).expect("button exists");
    menu.surface_mut().click(button);
}

fn light_slider(menu: &SettingsMenu<HeadlessSurface>, title: &str, channel: usize) -> ControlId {
    let surface = menu.surface();
    let title = surface.find_label(title).expect("light grid title");
    let grid = surface.parent(title).expect("light grid");
    // Title, three channel labels, swatch, then R/G/B sliders.
    surface.children(grid)[5 + channel]
}

#[test]
fn fov_slider_round_trips_through_its_label() {
    let mut host = RecordingHost::default();
    let mut menu = opened(&mut host);

    let slider = menu.surface().labelled(FOV_TEXT).expect("fov slider");
    let echo = menu.surface().next_sibling(slider).expect("fov label");
    menu.surface_mut().slide(slider, 90);
    menu.update(&mut host, 0.016);

    assert_eq!(menu.surface().text(echo), Some("90"));
    assert_eq!(host.calls, vec![HostCall::Fov(90.0)]);
    assert_eq!(host.config.fov_degrees, 90.0);
}

#[test]
fn reopening_rebuilds_a_single_window() {
    let mut host = RecordingHost::default();
    let mut menu = menu();

    menu.open(&mut host);
    let controls_after_first_open = menu.surface().control_count();
    menu.open(&mut host);

    assert_eq!(menu.surface().windows().len(), 1);
    assert_eq!(menu.surface().control_count(), controls_after_first_open);
    assert_eq!(menu.active_page(), Some(0));
    assert_eq!(host.count(|call| *call == HostCall::Resume), 0);
}

#[test]
fn navigating_away_and_back_restores_the_game_page() {
    let mut host = RecordingHost::default();
    let mut menu = opened(&mut host);
    let flip_book = menu.surface().find_flip_book().expect("flip book");
    let game_page = menu.surface().visible_page(flip_book).expect("game page");
    let game_controls: Vec<_> = menu
        .surface()
        .children(game_page)
        .iter()
        .map(|id| menu.surface().control(*id).cloned())
        .collect();

    click_button(&mut menu, "Render");
    menu.update(&mut host, 0.016);
    assert_eq!(menu.active_page(), Some(2));
    assert_ne!(menu.surface().visible_page(flip_book), Some(game_page));

    click_button(&mut menu, "Game");
    menu.update(&mut host, 0.016);
    assert_eq!(menu.active_page(), Some(0));
    assert_eq!(menu.surface().visible_page(flip_book), Some(game_page));

    let restored: Vec<_> = menu
        .surface()
        .children(game_page)
        .iter()
        .map(|id| menu.surface().control(*id).cloned())
        .collect();
    assert_eq!(restored, game_controls);
    assert_eq!(
        restored,
        vec![
            Some(HeadlessControl::Button(RESUME_TEXT.to_string())),
            Some(HeadlessControl::Separator),
            Some(HeadlessControl::Button(EXIT_TEXT.to_string())),
        ]
    );
    assert!(host.calls.is_empty());
}

#[test]
fn light_commits_use_the_open_time_snapshot() {
    let mut host = RecordingHost::default();
    host.config.min_light = LightRgb::new(10, 20, 30);
    host.config.max_light = LightRgb::new(200, 210, 220);
    let mut menu = opened(&mut host);

    // The host changes its own lighting while the menu is up.
    host.config.min_light = LightRgb::new(0, 0, 0);
    host.config.max_light = LightRgb::new(1, 1, 1);

    let min_red = light_slider(&menu, MIN_LIGHT_TEXT, 0);
    menu.surface_mut().slide(min_red, 50);
    menu.update(&mut host, 0.016);

    let max_blue = light_slider(&menu, MAX_LIGHT_TEXT, 2);
    menu.surface_mut().slide(max_blue, 100);
    menu.update(&mut host, 0.016);

    assert_eq!(
        host.light_commits(),
        vec![
            (LightRgb::new(50, 20, 30), LightRgb::new(200, 210, 220)),
            (LightRgb::new(50, 20, 30), LightRgb::new(200, 210, 100)),
        ]
    );
}

#[test]
fn inverted_light_pair_is_committed_as_is() {
    let mut host = RecordingHost::default();
    host.config.min_light = LightRgb::new(10, 10, 10);
    host.config.max_light = LightRgb::new(100, 100, 100);
    let mut menu = opened(&mut host);

    let min_green = light_slider(&menu, MIN_LIGHT_TEXT, 1);
    menu.surface_mut().slide(min_green, 200);
    menu.update(&mut host, 0.016);

    assert_eq!(
        host.light_commits(),
        vec![(LightRgb::new(10, 200, 10), LightRgb::new(100, 100, 100))]
    );
}

#[test]
fn selecting_the_active_resolution_is_a_no_op() {
    let mut host = RecordingHost::default();
    host.config.width = 1280;
    host.config.height = 720;
    let mut menu = opened(&mut host);

    let combo = menu.surface().labelled(RESOLUTION_TEXT).expect("resolution combo");
    let (entries, selected) = menu.surface().combo_state(combo).expect("combo state");
    let selected = selected.expect("current resolution is selected");
    assert_eq!(entries[selected], "(16:9) 1280x720");
    let other = entries
        .iter()
        .position(|entry| entry == "(16:9) 1920x1080")
        .expect("1080p entry");

    menu.surface_mut().select(combo, selected);
    menu.update(&mut host, 0.016);
    assert!(host.calls.is_empty());

    menu.surface_mut().select(combo, other);
    menu.update(&mut host, 0.016);
    assert_eq!(host.calls, vec![HostCall::Resolution(1920, 1080)]);
}

#[test]
fn unlisted_resolution_is_offered_as_custom_entry() {
    let mut host = RecordingHost::default();
    host.config.width = 1366;
    host.config.height = 768;
    let menu = opened(&mut host);

    let combo = menu.surface().labelled(RESOLUTION_TEXT).expect("resolution combo");
    let (entries, selected) = menu.surface().combo_state(combo).expect("combo state");
    assert_eq!(selected, Some(0));
    assert_eq!(entries[0], "(*) 1366x768");
    assert_eq!(entries.len(), 41);
}

#[test]
fn custom_resolution_entry_reflects_the_actual_window_size() {
    let mut host = RecordingHost {
        window: Some((1366, 768)),
        ..RecordingHost::default()
    };
    host.config.width = 1000;
    host.config.height = 700;
    let mut menu = opened(&mut host);

    let combo = menu.surface().labelled(RESOLUTION_TEXT).expect("resolution combo");
    let (entries, selected) = menu.surface().combo_state(combo).expect("combo state");
    assert_eq!(selected, Some(0));
    assert_eq!(entries[0], "(*) 1366x768");
    assert_eq!(entries.iter().filter(|entry| entry.starts_with("(*)")).count(), 1);

    menu.surface_mut().select(combo, 0);
    menu.update(&mut host, 0.016);
    assert_eq!(host.calls, vec![HostCall::Resolution(1366, 768)]);
}

#[test]
fn render_scale_selection_commits_factor() {
    let mut host = RecordingHost::default();
    let mut menu = opened(&mut host);

    let combo = menu.surface().labelled(RENDER_SCALING_TEXT).expect("scale combo");
    assert_eq!(
        menu.surface().combo_state(combo).map(|(_, selected)| selected),
        Some(Some(3))
    );
    menu.surface_mut().select(combo, 1);
    menu.update(&mut host, 0.016);
    assert_eq!(host.calls, vec![HostCall::RenderScale(0.5)]);
}

#[test]
fn update_and_draw_do_nothing_before_open_and_after_close() {
    let mut host = RecordingHost::default();
    let mut canvas = HeadlessCanvas::default();
    let mut menu = menu();

    menu.update(&mut host, 0.016);
    menu.draw(&mut canvas);
    assert!(menu.surface().frame_calls().is_empty());
    assert_eq!(canvas, HeadlessCanvas::default());
    assert!(host.calls.is_empty());

    menu.open(&mut host);
    menu.close(&mut host);
    host.calls.clear();
    let frames_before = menu.surface().frame_calls().len();

    menu.update(&mut host, 0.016);
    menu.draw(&mut canvas);
    assert_eq!(menu.surface().frame_calls().len(), frames_before);
    assert_eq!(canvas.frames_drawn, 0);
    assert!(host.calls.is_empty());
}

#[test]
fn open_close_cycles_release_every_control() {
    let mut host = RecordingHost::default();
    let mut menu = menu();

    for _ in 0..3 {
        menu.open(&mut host);
        assert!(menu.surface().control_count() > 0);
        menu.close(&mut host);
        assert_eq!(menu.surface().control_count(), 0);
        assert!(menu.surface().windows().is_empty());
        assert!(menu.pending().is_none());
    }
}

#[test]
fn update_runs_before_draw_each_frame() {
    let mut host = RecordingHost::default();
    let mut canvas = HeadlessCanvas::default();
    let mut menu = opened(&mut host);

    for _ in 0..2 {
        menu.update(&mut host, 0.016);
        menu.draw(&mut canvas);
    }
    assert_eq!(
        menu.surface().frame_calls(),
        &[FrameCall::Update, FrameCall::Draw, FrameCall::Update, FrameCall::Draw]
    );
    assert_eq!(canvas.last_window_title.as_deref(), Some("Settings"));
}

#[test]
fn open_pauses_and_close_resumes() {
    let mut host = RecordingHost::default();
    let mut menu = menu();

    menu.open(&mut host);
    assert_eq!(host.calls, vec![HostCall::Pause, HostCall::CursorVisible(true)]);
    assert!(menu.is_open());

    host.calls.clear();
    menu.close(&mut host);
    assert_eq!(host.calls, vec![HostCall::Resume]);
    assert!(!menu.is_open());

    menu.close(&mut host);
    assert_eq!(host.calls, vec![HostCall::Resume]);
}

#[test]
fn resume_closes_and_drops_the_rest_of_the_frame() {
    let mut host = RecordingHost::default();
    let mut menu = opened(&mut host);
    let fov = menu.surface().labelled(FOV_TEXT).expect("fov slider");

    click_button(&mut menu, RESUME_TEXT);
    menu.surface_mut().slide(fov, 100);
    menu.update(&mut host, 0.016);

    assert!(!menu.is_open());
    assert_eq!(host.calls, vec![HostCall::Resume]);
    assert_eq!(menu.surface().control_count(), 0);
}

#[test]
fn exit_requests_application_exit() {
    let mut host = RecordingHost::default();
    let mut menu = opened(&mut host);

    click_button(&mut menu, EXIT_TEXT);
    menu.update(&mut host, 0.016);
    assert_eq!(host.calls, vec![HostCall::Exit]);
}

#[test]
fn wrong_kind_and_window_events_never_reach_setters() {
    let mut host = RecordingHost::default();
    let mut menu = opened(&mut host);
    let fov = menu.surface().labelled(FOV_TEXT).expect("fov slider");
    let window = menu.window().expect("open window");

    menu.surface_mut().inject(ControlEvent {
        control: fov,
        value: ControlValue::Toggle(true),
    });
    menu.surface_mut().inject(ControlEvent {
        control: window,
        value: ControlValue::WindowChanged(URect::new(10, 10, 500, 400)),
    });
    menu.surface_mut().inject(ControlEvent {
        control: fov,
        value: ControlValue::Int(500),
    });
    menu.update(&mut host, 0.016);

    assert_eq!(host.calls, vec![HostCall::Fov(120.0)]);
}

#[test]
fn window_is_placed_from_the_host_window_size() {
    let mut host = RecordingHost {
        window: Some((1200, 960)),
        ..RecordingHost::default()
    };
    let mut menu = menu();
    menu.open(&mut host);

    let window = menu.window().expect("open window");
    let Some(HeadlessControl::Window(spec)) = menu.surface().control(window) else {
        panic!("window control missing");
    };
    assert_eq!(spec.rect, URect::new(150, 60, 950, 700));
    assert_eq!(spec.min_size, UVec2::new(600, 480));
    assert_eq!(spec.max_size, UVec2::new(1200, 960));
    assert_eq!(spec.title_bar_height, 30);
    assert!(spec.modal && spec.draggable && spec.resizable);
}

#[test]
fn layout_records_the_viewport_without_rebuilding() {
    let mut host = RecordingHost::default();
    let mut menu = opened(&mut host);
    let controls = menu.surface().control_count();

    menu.layout(1920, 1080);
    assert_eq!(menu.viewport(), Some(UVec2::new(1920, 1080)));
    assert_eq!(menu.surface().control_count(), controls);
}

#[test]
fn construction_fails_on_missing_theme_asset() {
    let theme = ThemeConfig::default();
    let surface = HeadlessSurface::with_available_assets([theme.font.clone()]);
    let error = match SettingsMenu::new(surface, OverlayConfig::default()) {
        Ok(_) => panic!("missing assets should fail"),
        Err(error) => error,
    };
    assert!(matches!(
        error,
        OverlayError::Surface(SurfaceError::MissingAsset { .. })
    ));
}

#[test]
fn construction_fails_on_invalid_config() {
    let config = OverlayConfig {
        widths: Vec::new(),
        ..OverlayConfig::default()
    };
    let error = match SettingsMenu::new(HeadlessSurface::new(), config) {
        Ok(_) => panic!("invalid config should fail"),
        Err(error) => error,
    };
    assert!(matches!(error, OverlayError::Config(_)));
}
