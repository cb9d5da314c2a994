pub mod overlay_config;
pub mod settings_overlay;
