use crate::data::engine_config::{EngineConfig, LightRgb};

/// What the overlay needs from the application it configures.
///
/// Setters have no side effects beyond updating host state. The host decides
/// how (and when) a change reaches the renderer or the window.
pub trait EngineHost {
    fn config(&self) -> &EngineConfig;

    fn set_resolution(&mut self, width: u32, height: u32);
    fn set_render_scale(&mut self, scale: f64);
    fn set_fov_angle(&mut self, degrees: f64);
    fn set_fullscreen(&mut self, fullscreen: bool);
    fn set_vsync_enabled(&mut self, enabled: bool);
    fn set_render_distance(&mut self, distance: f64);
    fn set_floor_texturing(&mut self, enabled: bool);
    fn set_sprite_boxes(&mut self, enabled: bool);
    fn set_light_falloff(&mut self, falloff: f64);
    fn set_global_illumination(&mut self, level: f64);
    fn set_light_rgb(&mut self, min: LightRgb, max: LightRgb);

    /// Suspends the simulation while the overlay is up.
    fn pause(&mut self);
    fn resume(&mut self);
    fn set_cursor_visible(&mut self, visible: bool);

    /// Size of the host window, used for overlay placement.
    fn window_size(&self) -> (u32, u32) {
        let config = self.config();
        (config.width, config.height)
    }

    fn request_exit(&mut self);
}
