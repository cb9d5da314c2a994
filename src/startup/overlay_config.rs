use std::{collections::HashSet, error::Error, fmt, fs, path::Path};

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::systems::ui::settings::AspectRatio;

pub static DEFAULT_OVERLAY_CONFIG: Lazy<OverlayConfig> = Lazy::new(OverlayConfig::default);

/// Static description of the overlay: which resolutions to offer, where the
/// window goes and which theme assets the surface must provide.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverlayConfig {
    #[serde(default = "default_aspect_ratios")]
    pub aspect_ratios: Vec<AspectRatio>,
    #[serde(default = "default_widths")]
    pub widths: Vec<u32>,
    #[serde(default)]
    pub window: WindowPlacement,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct WindowPlacement {
    pub size_fraction: f32,
    pub offset_x_fraction: f32,
    pub offset_y_fraction: f32,
    pub min_size_fraction: f32,
    pub title_bar_height: u32,
}

impl Default for WindowPlacement {
    fn default() -> Self {
        Self {
            size_fraction: 2.0 / 3.0,
            offset_x_fraction: 1.0 / 8.0,
            offset_y_fraction: 1.0 / 16.0,
            min_size_fraction: 0.5,
            title_bar_height: 30,
        }
    }
}

/// Asset names the surface has to resolve before the overlay can be built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ThemeConfig {
    pub font: String,
    pub title_font: String,
    pub background: String,
    pub panel: String,
    pub button: String,
    pub slider_track: String,
    pub slider_handle: String,
    pub checkbox: String,
    pub combo: String,
}

impl ThemeConfig {
    pub fn assets(&self) -> [(&'static str, &str); 9] {
        [
            ("font", self.font.as_str()),
            ("title_font", self.title_font.as_str()),
            ("background", self.background.as_str()),
            ("panel", self.panel.as_str()),
            ("button", self.button.as_str()),
            ("slider_track", self.slider_track.as_str()),
            ("slider_handle", self.slider_handle.as_str()),
            ("checkbox", self.checkbox.as_str()),
            ("combo", self.combo.as_str()),
        ]
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            font: String::from("fonts/NotoSans-Regular.ttf"),
            title_font: String::from("fonts/NotoSans-Bold.ttf"),
            background: String::from("ui/background.png"),
            panel: String::from("ui/panel.png"),
            button: String::from("ui/button.png"),
            slider_track: String::from("ui/slider_track.png"),
            slider_handle: String::from("ui/slider_handle.png"),
            checkbox: String::from("ui/checkbox.png"),
            combo: String::from("ui/combo.png"),
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            aspect_ratios: default_aspect_ratios(),
            widths: default_widths(),
            window: WindowPlacement::default(),
            theme: ThemeConfig::default(),
        }
    }
}

fn default_aspect_ratios() -> Vec<AspectRatio> {
    vec![
        AspectRatio::new(5, 4, 64),
        AspectRatio::new(4, 3, 68),
        AspectRatio::new(3, 2, 74),
        AspectRatio::new(16, 9, 84),
        AspectRatio::new(21, 9, 100),
    ]
}

fn default_widths() -> Vec<u32> {
    vec![640, 800, 960, 1024, 1280, 1440, 1600, 1920]
}

#[derive(Debug, Clone)]
pub enum OverlayConfigError {
    Parse(String),
    Io(String),
    Validation(String),
}

impl fmt::Display for OverlayConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "overlay config parse error: {err}"),
            Self::Io(err) => write!(f, "overlay config io error: {err}"),
            Self::Validation(err) => write!(f, "overlay config validation error: {err}"),
        }
    }
}

impl Error for OverlayConfigError {}

impl OverlayConfig {
    pub fn from_json(json: &str) -> Result<Self, OverlayConfigError> {
        let config: OverlayConfig =
            serde_json::from_str(json).map_err(|err| OverlayConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OverlayConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|err| OverlayConfigError::Io(format!("{}: {err}", path.display())))?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), OverlayConfigError> {
        if self.aspect_ratios.is_empty() {
            return Err(OverlayConfigError::Validation(
                "at least one aspect ratio is required".to_string(),
            ));
        }
        for ratio in &self.aspect_ratios {
            if ratio.w == 0 || ratio.h == 0 {
                return Err(OverlayConfigError::Validation(format!(
                    "aspect ratio {}:{} must have non-zero components",
                    ratio.w, ratio.h
                )));
            }
        }

        if self.widths.is_empty() {
            return Err(OverlayConfigError::Validation(
                "at least one width is required".to_string(),
            ));
        }
        let mut seen_widths = HashSet::new();
        for &width in &self.widths {
            if width == 0 {
                return Err(OverlayConfigError::Validation(
                    "widths must be non-zero".to_string(),
                ));
            }
            if !seen_widths.insert(width) {
                return Err(OverlayConfigError::Validation(format!(
                    "duplicate width `{width}`"
                )));
            }
        }
        // Narrow widths floor to a zero height for wide ratios.
        for ratio in &self.aspect_ratios {
            if let Some(&width) = self.widths.iter().find(|&&width| width < ratio.w) {
                return Err(OverlayConfigError::Validation(format!(
                    "width `{width}` is too narrow for ratio {}:{}",
                    ratio.w, ratio.h
                )));
            }
        }

        let fractions = [
            ("window.size_fraction", self.window.size_fraction),
            ("window.min_size_fraction", self.window.min_size_fraction),
        ];
        for (name, value) in fractions {
            if !(value.is_finite() && value > 0.0 && value <= 1.0) {
                return Err(OverlayConfigError::Validation(format!(
                    "{name} must be in (0, 1], got {value}"
                )));
            }
        }
        let offsets = [
            ("window.offset_x_fraction", self.window.offset_x_fraction),
            ("window.offset_y_fraction", self.window.offset_y_fraction),
        ];
        for (name, value) in offsets {
            if !(value.is_finite() && (0.0..1.0).contains(&value)) {
                return Err(OverlayConfigError::Validation(format!(
                    "{name} must be in [0, 1), got {value}"
                )));
            }
        }

        for (name, asset) in self.theme.assets() {
            if asset.trim().is_empty() {
                return Err(OverlayConfigError::Validation(format!(
                    "theme.{name} must not be blank"
                )));
            }
        }

        Ok(())
    }
}
