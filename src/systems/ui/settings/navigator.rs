use bevy::prelude::*;

use crate::systems::ui::surface::{ControlId, ControlSurface};

use super::page_content::Page;

/// Ordered pages of one session plus the header and flip book they share.
#[derive(Clone, Debug)]
pub struct PageNavigator {
    pages: Vec<Page>,
    active: Option<usize>,
    title_label: ControlId,
    flip_book: ControlId,
}

impl PageNavigator {
    pub fn new(title_label: ControlId, flip_book: ControlId, pages: Vec<Page>) -> Self {
        Self {
            pages,
            active: None,
            title_label,
            flip_book,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_page(&self) -> Option<&Page> {
        self.pages.get(self.active?)
    }

    /// Shows page `index`. Returns `false` and changes nothing when out of range.
    pub fn select_page<S: ControlSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        index: usize,
    ) -> bool {
        let Some(page) = self.pages.get(index) else {
            warn!(
                "page index {index} out of range ({} pages); ignoring",
                self.pages.len()
            );
            return false;
        };

        surface.set_text(self.title_label, page.title);
        surface.show_page(self.flip_book, page.content);
        surface.request_relayout(self.flip_book);
        self.active = Some(index);
        debug!("settings page -> {}", page.title);
        true
    }
}
