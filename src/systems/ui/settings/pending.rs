use enum_map::{enum_map, EnumMap};

use crate::data::engine_config::{Channel, EngineConfig, LightBound, LightRgb};

/// Light colours held for the lifetime of one open menu.
///
/// Channel sliders edit this snapshot and always commit both bounds together,
/// so the host never sees a half-updated pair and never feeds its own
/// clamping back into the sliders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingEdits {
    light: EnumMap<LightBound, LightRgb>,
}

impl PendingEdits {
    pub fn capture(config: &EngineConfig) -> Self {
        Self {
            light: enum_map! {
                LightBound::Min => config.min_light,
                LightBound::Max => config.max_light,
            },
        }
    }

    pub fn light(&self, bound: LightBound) -> LightRgb {
        self.light[bound]
    }

    pub fn channel(&self, bound: LightBound, channel: Channel) -> u8 {
        self.light[bound].channel(channel)
    }

    pub fn set_channel(&mut self, bound: LightBound, channel: Channel, value: u8) {
        self.light[bound] = self.light[bound].with_channel(channel, value);
    }

    /// `(min, max)` in commit order.
    pub fn light_pair(&self) -> (LightRgb, LightRgb) {
        (self.light[LightBound::Min], self.light[LightBound::Max])
    }
}
