pub(super) const WINDOW_TITLE: &str = "Settings";

pub(super) const RESUME_TEXT: &str = "Resume";
pub(super) const EXIT_TEXT: &str = "Exit";

pub(super) const RESOLUTION_TEXT: &str = "Resolution";
pub(super) const RENDER_SCALING_TEXT: &str = "Render Scaling";
pub(super) const FOV_TEXT: &str = "Horizontal FOV";
pub(super) const FULLSCREEN_TEXT: &str = "Fullscreen";
pub(super) const VSYNC_TEXT: &str = "Use VSync";

pub(super) const RENDER_DISTANCE_TEXT: &str = "Render Distance";
pub(super) const FLOOR_TEXTURING_TEXT: &str = "Floor Texturing";
pub(super) const SPRITE_BOXES_TEXT: &str = "Sprite Boxes";

pub(super) const LIGHT_FALLOFF_TEXT: &str = "Light Falloff";
pub(super) const ILLUMINATION_TEXT: &str = "Illumination";
pub(super) const MIN_LIGHT_TEXT: &str = "Min Light";
pub(super) const MAX_LIGHT_TEXT: &str = "Max Light";

pub(super) const PAGE_SPACING: u32 = 10;
pub(super) const ROW_SPACING: u32 = 20;
pub(super) const TAB_SPACING: u32 = 4;
/// Title, then one column per channel.
pub(super) const LIGHT_GRID_COLUMNS: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageKind {
    Game,
    Display,
    Render,
    Lighting,
}

impl PageKind {
    /// Tab order.
    pub const ALL: [PageKind; 4] = [
        PageKind::Game,
        PageKind::Display,
        PageKind::Render,
        PageKind::Lighting,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            PageKind::Game => "Game",
            PageKind::Display => "Display",
            PageKind::Render => "Render",
            PageKind::Lighting => "Lighting",
        }
    }
}

/// Buttons that act on the menu itself rather than on a setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Resume,
    Exit,
    SelectPage(usize),
}
