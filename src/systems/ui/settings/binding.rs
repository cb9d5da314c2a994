//! Field bindings: one engine setting paired with one control.
//!
//! A binding owns no engine state. Every call receives the host and the
//! pending light snapshot explicitly through [`BindingContext`], and the
//! binding only knows *which* field it edits (a selector enum) and which
//! controls echo it.
use std::{collections::HashMap, fmt, ops::RangeInclusive};

use bevy::prelude::*;

use crate::{
    data::engine_config::{Channel, EngineConfig, LightBound},
    systems::ui::surface::{ControlId, ControlSurface, ControlValue},
};

use super::{catalog::Resolution, host::EngineHost, pending::PendingEdits};

pub struct BindingContext<'a> {
    pub host: &'a mut dyn EngineHost,
    pub pending: &'a mut PendingEdits,
}

impl BindingContext<'_> {
    pub fn config(&self) -> &EngineConfig {
        self.host.config()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commit {
    /// The host setter ran.
    Applied,
    /// The field already held the value; nothing was written.
    Unchanged,
    /// The raw value could not be turned into a field value.
    Rejected,
}

pub trait Field {
    type Value: PartialEq + fmt::Debug;

    /// Current value, or `None` when the live value has no control representation.
    fn read(&self, cx: &BindingContext<'_>) -> Option<Self::Value>;
    fn coerce(&self, raw: ControlValue) -> Option<Self::Value>;
    fn write(&self, cx: &mut BindingContext<'_>, value: &Self::Value);
    fn format(&self, value: &Self::Value) -> String;

    fn indicator_color(&self, _cx: &BindingContext<'_>) -> Option<Color> {
        None
    }
}

#[derive(Clone, Debug)]
pub struct FieldBinding<F> {
    pub field: F,
    pub control: ControlId,
    /// Label echoing the formatted value.
    pub echo_label: Option<ControlId>,
    /// Read-only colour indicator refreshed after each commit.
    pub swatch: Option<ControlId>,
}

impl<F: Field> FieldBinding<F> {
    pub fn new(field: F, control: ControlId) -> Self {
        Self {
            field,
            control,
            echo_label: None,
            swatch: None,
        }
    }

    pub fn with_echo_label(mut self, label: ControlId) -> Self {
        self.echo_label = Some(label);
        self
    }

    pub fn with_swatch(mut self, swatch: ControlId) -> Self {
        self.swatch = Some(swatch);
        self
    }

    /// Coerces, commits and refreshes the echo controls in one step.
    pub fn apply<S: ControlSurface + ?Sized>(
        &self,
        cx: &mut BindingContext<'_>,
        surface: &mut S,
        raw: ControlValue,
    ) -> Commit {
        let Some(value) = self.field.coerce(raw) else {
            return Commit::Rejected;
        };

        let commit = if self.field.read(cx).as_ref() == Some(&value) {
            Commit::Unchanged
        } else {
            self.field.write(cx, &value);
            Commit::Applied
        };

        if let Some(label) = self.echo_label {
            surface.set_text(label, &self.field.format(&value));
        }
        if let Some(swatch) = self.swatch {
            if let Some(color) = self.field.indicator_color(cx) {
                surface.set_swatch(swatch, color);
            }
        }
        commit
    }
}

/* ─────────────────────────  SLIDERS  ───────────────────────── */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SliderField {
    Fov,
    RenderDistance,
    LightFalloff,
    GlobalIllumination,
    LightChannel(LightBound, Channel),
}

impl SliderField {
    pub fn range(self) -> RangeInclusive<i32> {
        match self {
            SliderField::Fov => 60..=120,
            // -1 is "unbounded" and is forwarded as-is.
            SliderField::RenderDistance => -1..=100,
            SliderField::LightFalloff => -500..=500,
            SliderField::GlobalIllumination => 0..=1000,
            SliderField::LightChannel(..) => 0..=255,
        }
    }

    /// Initial slider position: the live value truncated into the slider range.
    pub fn seed(self, config: &EngineConfig, pending: &PendingEdits) -> i32 {
        let raw = match self {
            SliderField::Fov => config.fov_degrees as i32,
            SliderField::RenderDistance => config.render_distance as i32,
            SliderField::LightFalloff => config.light_falloff as i32,
            SliderField::GlobalIllumination => config.global_illumination as i32,
            SliderField::LightChannel(bound, channel) => i32::from(pending.channel(bound, channel)),
        };
        let range = self.range();
        raw.clamp(*range.start(), *range.end())
    }

    fn live_value(self, config: &EngineConfig) -> f64 {
        match self {
            SliderField::Fov => config.fov_degrees,
            SliderField::RenderDistance => config.render_distance,
            SliderField::LightFalloff => config.light_falloff,
            SliderField::GlobalIllumination => config.global_illumination,
            SliderField::LightChannel(bound, channel) => {
                f64::from(config.light(bound).channel(channel))
            }
        }
    }
}

impl Field for SliderField {
    type Value = i32;

    fn read(&self, cx: &BindingContext<'_>) -> Option<i32> {
        if let SliderField::LightChannel(bound, channel) = *self {
            return Some(i32::from(cx.pending.channel(bound, channel)));
        }
        let live = self.live_value(cx.config());
        (live.fract() == 0.0).then_some(live as i32)
    }

    fn coerce(&self, raw: ControlValue) -> Option<i32> {
        let ControlValue::Int(value) = raw else {
            warn!("{self:?} slider received {raw:?}; ignoring");
            return None;
        };
        let range = self.range();
        let clamped = value.clamp(*range.start(), *range.end());
        if clamped != value {
            warn!("{self:?} value {value} is out of range; clamped to {clamped}");
        }
        Some(clamped)
    }

    fn write(&self, cx: &mut BindingContext<'_>, value: &i32) {
        let value = *value;
        match *self {
            SliderField::Fov => cx.host.set_fov_angle(f64::from(value)),
            SliderField::RenderDistance => cx.host.set_render_distance(f64::from(value)),
            SliderField::LightFalloff => cx.host.set_light_falloff(f64::from(value)),
            SliderField::GlobalIllumination => cx.host.set_global_illumination(f64::from(value)),
            SliderField::LightChannel(bound, channel) => {
                // Range is 0..=255 after coercion.
                let channel_value = u8::try_from(value).unwrap_or(u8::MAX);
                cx.pending.set_channel(bound, channel, channel_value);
                let (min, max) = cx.pending.light_pair();
                if !min.channelwise_le(&max) {
                    debug!("committing inverted light pair min={min:?} max={max:?}");
                }
                cx.host.set_light_rgb(min, max);
            }
        }
    }

    fn format(&self, value: &i32) -> String {
        match self {
            SliderField::LightChannel(_, channel) => format!("{}: {value}", channel.short_name()),
            _ => format!("{value}"),
        }
    }

    fn indicator_color(&self, cx: &BindingContext<'_>) -> Option<Color> {
        match *self {
            SliderField::LightChannel(bound, _) => Some(cx.pending.light(bound).to_color()),
            _ => None,
        }
    }
}

/* ─────────────────────────  TOGGLES  ───────────────────────── */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToggleField {
    Fullscreen,
    Vsync,
    FloorTexturing,
    SpriteBoxes,
}

impl ToggleField {
    pub fn seed(self, config: &EngineConfig) -> bool {
        match self {
            ToggleField::Fullscreen => config.fullscreen,
            ToggleField::Vsync => config.vsync,
            ToggleField::FloorTexturing => config.floor_texturing,
            ToggleField::SpriteBoxes => config.sprite_boxes,
        }
    }
}

impl Field for ToggleField {
    type Value = bool;

    fn read(&self, cx: &BindingContext<'_>) -> Option<bool> {
        Some(self.seed(cx.config()))
    }

    fn coerce(&self, raw: ControlValue) -> Option<bool> {
        match raw {
            ControlValue::Toggle(checked) => Some(checked),
            other => {
                warn!("{self:?} checkbox received {other:?}; ignoring");
                None
            }
        }
    }

    fn write(&self, cx: &mut BindingContext<'_>, value: &bool) {
        match self {
            ToggleField::Fullscreen => cx.host.set_fullscreen(*value),
            ToggleField::Vsync => cx.host.set_vsync_enabled(*value),
            ToggleField::FloorTexturing => cx.host.set_floor_texturing(*value),
            ToggleField::SpriteBoxes => cx.host.set_sprite_boxes(*value),
        }
    }

    fn format(&self, value: &bool) -> String {
        if *value { "On" } else { "Off" }.to_string()
    }
}

/* ─────────────────────────  COMBO BOXES  ───────────────────────── */

/// Entry type of a combo box: compared with `PartialEq`, shown with `Display`.
pub trait ComboEntry: Clone + PartialEq + fmt::Debug + fmt::Display {
    /// The live value as an entry, when it can be represented.
    fn current(config: &EngineConfig) -> Option<Self>;
    fn commit(&self, host: &mut dyn EngineHost);
}

impl ComboEntry for Resolution {
    fn current(config: &EngineConfig) -> Option<Self> {
        Some(Resolution::custom(config.width, config.height))
    }

    fn commit(&self, host: &mut dyn EngineHost) {
        host.set_resolution(self.width, self.height);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderScale {
    Quarter,
    Half,
    ThreeQuarters,
    Full,
}

impl RenderScale {
    pub const ALL: [RenderScale; 4] = [
        RenderScale::Quarter,
        RenderScale::Half,
        RenderScale::ThreeQuarters,
        RenderScale::Full,
    ];

    pub const fn factor(self) -> f64 {
        match self {
            RenderScale::Quarter => 0.25,
            RenderScale::Half => 0.5,
            RenderScale::ThreeQuarters => 0.75,
            RenderScale::Full => 1.0,
        }
    }

    pub fn from_factor(factor: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|scale| scale.factor() == factor)
    }
}

impl fmt::Display for RenderScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.factor() * 100.0)
    }
}

impl ComboEntry for RenderScale {
    fn current(config: &EngineConfig) -> Option<Self> {
        RenderScale::from_factor(config.render_scale)
    }

    fn commit(&self, host: &mut dyn EngineHost) {
        host.set_render_scale(self.factor());
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComboField<T> {
    entries: Vec<T>,
}

impl<T: ComboEntry> ComboField<T> {
    pub fn new(entries: Vec<T>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    pub fn position(&self, value: &T) -> Option<usize> {
        self.entries.iter().position(|entry| entry == value)
    }
}

impl<T: ComboEntry> Field for ComboField<T> {
    type Value = T;

    fn read(&self, cx: &BindingContext<'_>) -> Option<T> {
        T::current(cx.config())
    }

    fn coerce(&self, raw: ControlValue) -> Option<T> {
        let ControlValue::Choice(index) = raw else {
            warn!("combo box received {raw:?}; ignoring");
            return None;
        };
        let entry = self.entries.get(index).cloned();
        if entry.is_none() {
            warn!(
                "combo entry {index} is out of range ({} entries); ignoring",
                self.entries.len()
            );
        }
        entry
    }

    fn write(&self, cx: &mut BindingContext<'_>, value: &T) {
        debug!("committing combo selection {value}");
        value.commit(cx.host);
    }

    fn format(&self, value: &T) -> String {
        value.to_string()
    }
}

/* ─────────────────────────  TABLE  ───────────────────────── */

#[derive(Clone, Debug)]
pub enum BoundControl {
    Slider(FieldBinding<SliderField>),
    Toggle(FieldBinding<ToggleField>),
    Resolution(FieldBinding<ComboField<Resolution>>),
    RenderScale(FieldBinding<ComboField<RenderScale>>),
}

impl BoundControl {
    pub fn control(&self) -> ControlId {
        match self {
            BoundControl::Slider(binding) => binding.control,
            BoundControl::Toggle(binding) => binding.control,
            BoundControl::Resolution(binding) => binding.control,
            BoundControl::RenderScale(binding) => binding.control,
        }
    }

    pub fn apply<S: ControlSurface + ?Sized>(
        &self,
        cx: &mut BindingContext<'_>,
        surface: &mut S,
        raw: ControlValue,
    ) -> Commit {
        match self {
            BoundControl::Slider(binding) => binding.apply(cx, surface, raw),
            BoundControl::Toggle(binding) => binding.apply(cx, surface, raw),
            BoundControl::Resolution(binding) => binding.apply(cx, surface, raw),
            BoundControl::RenderScale(binding) => binding.apply(cx, surface, raw),
        }
    }
}

/// Bindings of one menu session, keyed by the control they listen to.
#[derive(Clone, Debug, Default)]
pub struct BindingTable {
    by_control: HashMap<ControlId, BoundControl>,
}

impl BindingTable {
    pub fn register(&mut self, binding: BoundControl) {
        let control = binding.control();
        if self.by_control.insert(control, binding).is_some() {
            warn!("control {control:?} was bound twice; keeping the newest binding");
        }
    }

    pub fn get(&self, control: ControlId) -> Option<&BoundControl> {
        self.by_control.get(&control)
    }

    pub fn len(&self) -> usize {
        self.by_control.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_control.is_empty()
    }
}
