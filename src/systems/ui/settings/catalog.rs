//! Resolution catalog offered by the Display page.
use std::fmt;

use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AspectRatio {
    pub w: u32,
    pub h: u32,
    /// Horizontal FOV suggested for this ratio.
    pub fov: u32,
}

impl AspectRatio {
    pub const fn new(w: u32, h: u32, fov: u32) -> Self {
        Self { w, h, fov }
    }
}

/// A selectable display size. Equality only looks at the dimensions.
#[derive(Clone, Copy, Debug)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: Option<AspectRatio>,
}

impl Resolution {
    /// An untagged entry standing in for a size the catalog does not list.
    pub const fn custom(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            aspect_ratio: None,
        }
    }

    pub const fn is_custom(&self) -> bool {
        self.aspect_ratio.is_none()
    }
}

impl PartialEq for Resolution {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }
}

impl Eq for Resolution {}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.aspect_ratio {
            Some(ratio) => write!(f, "({}:{}) {}x{}", ratio.w, ratio.h, self.width, self.height),
            None => write!(f, "(*) {}x{}", self.width, self.height),
        }
    }
}

/// Builds the fixed catalog: ratios outer, widths inner, declaration order.
///
/// Heights use integer floor division, `(width / ratio.w) * ratio.h`, so some
/// entries are only approximately on-ratio (21:9 at 640 gives 640x270).
pub fn generate(ratios: &[AspectRatio], widths: &[u32]) -> Vec<Resolution> {
    let mut resolutions = Vec::with_capacity(ratios.len() * widths.len());
    for &ratio in ratios {
        for &width in widths {
            resolutions.push(Resolution {
                width,
                height: (width / ratio.w) * ratio.h,
                aspect_ratio: Some(ratio),
            });
        }
    }
    resolutions
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolutionChoices {
    pub entries: Vec<Resolution>,
    pub selected: usize,
}

/// Selects the catalog entry matching the live `current` size. When none
/// matches, the actual `window` size is offered as a custom entry at index 0,
/// unless the catalog already lists it.
pub fn with_current(
    catalog: Vec<Resolution>,
    current: (u32, u32),
    window: (u32, u32),
) -> ResolutionChoices {
    let position = |(width, height): (u32, u32)| {
        let size = Resolution::custom(width, height);
        catalog.iter().position(|entry| *entry == size)
    };
    if let Some(selected) = position(current).or_else(|| position(window)) {
        return ResolutionChoices {
            entries: catalog,
            selected,
        };
    }

    let (width, height) = window;
    let mut entries = Vec::with_capacity(catalog.len() + 1);
    entries.push(Resolution::custom(width, height));
    entries.extend(catalog);
    ResolutionChoices {
        entries,
        selected: 0,
    }
}
