use crate::model::well::{Well, WellId};
use crate::nav::WellView;

/// Dashboard view: list cursor and scroll position
#[derive(Debug, Clone, Default)]
pub struct HomeView {
    pub cursor: usize,
    pub scroll_offset: usize,
}

impl HomeView {
    /// Keep the cursor on a visible row after the projection changed
    pub fn clamp(&mut self, visible: usize) {
        if visible == 0 {
            self.cursor = 0;
        } else if self.cursor >= visible {
            self.cursor = visible - 1;
        }
        if self.scroll_offset > self.cursor {
            self.scroll_offset = self.cursor;
        }
    }

    /// Put the cursor on `id`'s row. Returns false, leaving the cursor
    /// alone, when `id` is not among `visible_ids`.
    pub fn select_id(&mut self, visible_ids: &[WellId], id: WellId) -> bool {
        match visible_ids.iter().position(|v| *v == id) {
            Some(row) => {
                self.cursor = row;
                true
            }
            None => false,
        }
    }

    pub fn move_by(&mut self, delta: isize, visible: usize) {
        if visible == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, visible as isize - 1) as usize;
    }

    /// Adjust scroll so the cursor row is within a window of `height` rows
    pub fn scroll_into_view(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }
}

impl WellView for HomeView {
    /// Home is not bound to a record
    fn load(&mut self, _well: &Well) {}
}
