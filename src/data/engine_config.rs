use bevy::prelude::*;
use enum_map::{enum_map, Enum, EnumMap};

#[derive(Enum, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub const fn short_name(self) -> &'static str {
        match self {
            Channel::Red => "R",
            Channel::Green => "G",
            Channel::Blue => "B",
        }
    }
}

/// Which end of the light range a colour describes.
#[derive(Enum, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightBound {
    Min,
    Max,
}

/// Opaque RGB light colour. Alpha is always full.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightRgb(EnumMap<Channel, u8>);

impl LightRgb {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(enum_map! {
            Channel::Red => red,
            Channel::Green => green,
            Channel::Blue => blue,
        })
    }

    pub fn channel(&self, channel: Channel) -> u8 {
        self.0[channel]
    }

    pub fn with_channel(mut self, channel: Channel, value: u8) -> Self {
        self.0[channel] = value;
        self
    }

    /// True when every channel of `self` is at most the matching channel of `other`.
    pub fn channelwise_le(&self, other: &LightRgb) -> bool {
        Channel::ALL
            .iter()
            .all(|&channel| self.channel(channel) <= other.channel(channel))
    }

    pub fn to_color(self) -> Color {
        Color::srgb_u8(
            self.channel(Channel::Red),
            self.channel(Channel::Green),
            self.channel(Channel::Blue),
        )
    }
}

/// Live engine configuration the overlay reads from and writes to.
///
/// Owned by the host; the overlay only ever sees it through
/// [`EngineHost`](crate::systems::ui::settings::EngineHost) for the duration of a call.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub width: u32,
    pub height: u32,
    pub render_scale: f64,
    pub fov_degrees: f64,
    pub fullscreen: bool,
    pub vsync: bool,
    /// `-1.0` means unbounded.
    pub render_distance: f64,
    pub floor_texturing: bool,
    pub sprite_boxes: bool,
    pub light_falloff: f64,
    pub global_illumination: f64,
    pub min_light: LightRgb,
    pub max_light: LightRgb,
}

impl EngineConfig {
    pub fn light(&self, bound: LightBound) -> LightRgb {
        match bound {
            LightBound::Min => self.min_light,
            LightBound::Max => self.max_light,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            render_scale: 1.0,
            fov_degrees: 68.0,
            fullscreen: false,
            vsync: true,
            render_distance: -1.0,
            floor_texturing: true,
            sprite_boxes: false,
            light_falloff: -100.0,
            global_illumination: 300.0,
            min_light: LightRgb::new(76, 76, 76),
            max_light: LightRgb::new(255, 255, 255),
        }
    }
}
