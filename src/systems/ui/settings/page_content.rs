//! Control layout of the four settings pages.
//!
//! Every row is created here and bound once; nothing on a page is rebuilt
//! until the menu is opened again.
use std::collections::HashMap;

use crate::{
    data::engine_config::{Channel, EngineConfig, LightBound},
    systems::ui::surface::{ControlId, ControlSurface, Layout},
};

use super::{
    binding::{
        BindingTable, BoundControl, ComboEntry, ComboField, Field, FieldBinding, RenderScale,
        SliderField, ToggleField,
    },
    catalog::ResolutionChoices,
    defs::*,
    pending::PendingEdits,
};

/// One tab's worth of controls. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub kind: PageKind,
    pub title: &'static str,
    pub content: ControlId,
}

/// Everything a page needs while its controls are created.
///
/// Seeds come from `config` and `pending` exactly once; every mutable control
/// gets one entry in `bindings`, every button one entry in `actions`.
pub struct PageBuilder<'a, S: ControlSurface + ?Sized> {
    pub surface: &'a mut S,
    pub config: &'a EngineConfig,
    pub pending: &'a PendingEdits,
    pub resolutions: &'a ResolutionChoices,
    pub bindings: &'a mut BindingTable,
    pub actions: &'a mut HashMap<ControlId, MenuAction>,
    pub flip_book: ControlId,
}

impl<S: ControlSurface + ?Sized> PageBuilder<'_, S> {
    fn action_button(&mut self, parent: ControlId, text: &str, action: MenuAction) -> ControlId {
        let button = self.surface.button(parent, text);
        self.actions.insert(button, action);
        button
    }

    /// `text | slider | value label` row.
    fn slider_row(&mut self, parent: ControlId, text: &str, field: SliderField) -> ControlId {
        let row = self.surface.container(parent, Layout::Row { spacing: ROW_SPACING });
        self.surface.label(row, text);
        let seed = field.seed(self.config, self.pending);
        let slider = self.surface.slider(row, field.range(), seed);
        let echo = self.surface.label(row, &field.format(&seed));
        self.bindings.register(BoundControl::Slider(
            FieldBinding::new(field, slider).with_echo_label(echo),
        ));
        slider
    }

    fn checkbox(&mut self, parent: ControlId, text: &str, field: ToggleField) -> ControlId {
        let checkbox = self.surface.checkbox(parent, text, field.seed(self.config));
        self.bindings
            .register(BoundControl::Toggle(FieldBinding::new(field, checkbox)));
        checkbox
    }

    fn resolution_row(&mut self, parent: ControlId) -> ControlId {
        let row = self.surface.container(parent, Layout::Row { spacing: ROW_SPACING });
        self.surface.label(row, RESOLUTION_TEXT);
        let field = ComboField::new(self.resolutions.entries.clone());
        let combo = self
            .surface
            .combo_box(row, &field.labels(), Some(self.resolutions.selected));
        self.bindings
            .register(BoundControl::Resolution(FieldBinding::new(field, combo)));
        combo
    }

    fn render_scale_row(&mut self, parent: ControlId) -> ControlId {
        let row = self.surface.container(parent, Layout::Row { spacing: ROW_SPACING });
        self.surface.label(row, RENDER_SCALING_TEXT);
        let field = ComboField::new(RenderScale::ALL.to_vec());
        let selected = RenderScale::current(self.config).and_then(|scale| field.position(&scale));
        let combo = self.surface.combo_box(row, &field.labels(), selected);
        self.bindings
            .register(BoundControl::RenderScale(FieldBinding::new(field, combo)));
        combo
    }

    /// Title, per-channel labels, swatch, then the three sliders.
    fn light_grid(&mut self, parent: ControlId, text: &str, bound: LightBound) -> ControlId {
        let grid = self.surface.container(
            parent,
            Layout::Grid {
                columns: LIGHT_GRID_COLUMNS,
                spacing: PAGE_SPACING,
            },
        );
        self.surface.label(grid, text);

        let fields = Channel::ALL.map(|channel| SliderField::LightChannel(bound, channel));
        let seeds = fields.map(|field| field.seed(self.config, self.pending));
        let labels: Vec<ControlId> = fields
            .iter()
            .zip(seeds)
            .map(|(field, seed)| self.surface.label(grid, &field.format(&seed)))
            .collect();

        let swatch = self.surface.swatch(grid, self.pending.light(bound).to_color());
        for ((field, seed), label) in fields.into_iter().zip(seeds).zip(labels) {
            let slider = self.surface.slider(grid, field.range(), seed);
            self.bindings.register(BoundControl::Slider(
                FieldBinding::new(field, slider)
                    .with_echo_label(label)
                    .with_swatch(swatch),
            ));
        }
        grid
    }
}

pub fn build_page<S: ControlSurface + ?Sized>(
    kind: PageKind,
    builder: &mut PageBuilder<'_, S>,
) -> Page {
    let content = builder.surface.page(
        builder.flip_book,
        Layout::Column {
            spacing: PAGE_SPACING,
        },
    );

    match kind {
        PageKind::Game => {
            builder.action_button(content, RESUME_TEXT, MenuAction::Resume);
            builder.surface.separator(content);
            builder.action_button(content, EXIT_TEXT, MenuAction::Exit);
        }
        PageKind::Display => {
            builder.resolution_row(content);
            builder.render_scale_row(content);
            builder.slider_row(content, FOV_TEXT, SliderField::Fov);
            builder.checkbox(content, FULLSCREEN_TEXT, ToggleField::Fullscreen);
            builder.checkbox(content, VSYNC_TEXT, ToggleField::Vsync);
        }
        PageKind::Render => {
            builder.slider_row(content, RENDER_DISTANCE_TEXT, SliderField::RenderDistance);
            builder.checkbox(content, FLOOR_TEXTURING_TEXT, ToggleField::FloorTexturing);
            builder.checkbox(content, SPRITE_BOXES_TEXT, ToggleField::SpriteBoxes);
        }
        PageKind::Lighting => {
            builder.slider_row(content, LIGHT_FALLOFF_TEXT, SliderField::LightFalloff);
            builder.slider_row(content, ILLUMINATION_TEXT, SliderField::GlobalIllumination);
            builder.light_grid(content, MIN_LIGHT_TEXT, LightBound::Min);
            builder.light_grid(content, MAX_LIGHT_TEXT, LightBound::Max);
        }
    }

    Page {
        kind,
        title: kind.title(),
        content,
    }
}
