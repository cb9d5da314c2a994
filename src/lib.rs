//! In-game settings overlay for Bevy.
//!
//! Add [`SettingsOverlayPlugin`] with a [`ControlSurface`] implementation and
//! the overlay edits the [`EngineConfig`] resource through a tabbed, modal
//! settings window toggled with Escape.
pub mod data;
pub mod startup;
pub mod systems;

pub use data::engine_config::{Channel, EngineConfig, LightBound, LightRgb};
pub use startup::{
    overlay_config::{OverlayConfig, OverlayConfigError},
    settings_overlay::SettingsOverlayPlugin,
};
pub use systems::ui::{
    headless::{HeadlessCanvas, HeadlessSurface},
    settings::{EngineHost, OverlayError, SettingsMenu},
    surface::{ControlEvent, ControlId, ControlSurface, ControlValue, SurfaceError},
};
