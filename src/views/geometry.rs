use chrono::Utc;
use tracing::debug;

use crate::model::store::RecordStore;
use crate::model::well::{HoleSection, Well, WellId};
use crate::nav::WellView;

/// Length given to a newly added section, in metres
pub const DEFAULT_SECTION_LENGTH: f64 = 100.0;

/// Hole-section editor bound to one well
#[derive(Debug, Clone, Default)]
pub struct GeometryView {
    well_id: Option<WellId>,
    well_name: String,
    sections: Vec<HoleSection>,
    saved: Vec<HoleSection>,
    pub cursor: usize,
}

impl GeometryView {
    pub fn well_id(&self) -> Option<WellId> {
        self.well_id
    }

    pub fn well_name(&self) -> &str {
        &self.well_name
    }

    pub fn sections(&self) -> &[HoleSection] {
        &self.sections
    }

    /// Append a section starting where the deepest one ends
    pub fn add_section(&mut self) {
        let top = self.sections.last().map_or(0.0, |s| s.bottom_md);
        let name = format!("Section {}", self.sections.len() + 1);
        self.sections.push(HoleSection {
            name,
            top_md: top,
            bottom_md: top + DEFAULT_SECTION_LENGTH,
        });
        self.cursor = self.sections.len() - 1;
    }

    /// Remove the section under the cursor
    pub fn remove_selected(&mut self) {
        if self.cursor < self.sections.len() {
            self.sections.remove(self.cursor);
            if self.cursor > 0 && self.cursor >= self.sections.len() {
                self.cursor -= 1;
            }
        }
    }

    /// Move the selected section's bottom by `delta` metres.
    ///
    /// The section never shrinks below zero length, and the section below
    /// keeps starting where this one ends.
    pub fn adjust_bottom(&mut self, delta: f64) {
        let Some(section) = self.sections.get_mut(self.cursor) else {
            return;
        };
        section.bottom_md = (section.bottom_md + delta).max(section.top_md);
        let bottom = section.bottom_md;
        if let Some(below) = self.sections.get_mut(self.cursor + 1) {
            below.top_md = bottom;
            if below.bottom_md < bottom {
                below.bottom_md = bottom;
            }
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.sections.is_empty() {
            self.cursor = 0;
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, self.sections.len() as isize - 1) as usize;
    }

    pub fn total_depth(&self) -> f64 {
        self.sections.iter().map(|s| s.bottom_md).fold(0.0, f64::max)
    }
}

impl WellView for GeometryView {
    fn load(&mut self, well: &Well) {
        self.well_id = Some(well.id);
        self.well_name = well.name.clone();
        self.sections = well.geometry.clone();
        self.saved = well.geometry.clone();
        self.cursor = 0;
    }

    fn has_unsaved_edits(&self) -> bool {
        self.well_id.is_some() && self.sections != self.saved
    }

    fn save_to_record(&mut self, store: &mut RecordStore) {
        let Some(id) = self.well_id else {
            return;
        };
        let sections = self.sections.clone();
        let now = Utc::now();
        let found = store.update(id, |well| {
            well.geometry = sections;
            well.touch(now);
        });
        if !found {
            debug!(well_id = id, "well removed before its geometry could be saved");
        }
        self.saved = self.sections.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn bound() -> (RecordStore, GeometryView) {
        let t = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let mut well = Well::new_draft(2, t);
        well.geometry = vec![HoleSection {
            name: "Surface".into(),
            top_md: 0.0,
            bottom_md: 400.0,
        }];
        let store = RecordStore::from_wells(vec![well.clone()]);
        let mut view = GeometryView::default();
        view.load(&well);
        (store, view)
    }

    #[test]
    fn add_section_continues_from_deepest() {
        let (_, mut view) = bound();
        view.add_section();
        let added = &view.sections()[1];
        assert_eq!(added.name, "Section 2");
        assert_eq!(added.top_md, 400.0);
        assert_eq!(added.bottom_md, 500.0);
        assert_eq!(view.cursor, 1);
        assert!(view.has_unsaved_edits());
    }

    #[test]
    fn adjust_bottom_keeps_sections_contiguous() {
        let (_, mut view) = bound();
        view.add_section();
        view.cursor = 0;
        view.adjust_bottom(50.0);
        assert_eq!(view.sections()[0].bottom_md, 450.0);
        assert_eq!(view.sections()[1].top_md, 450.0);
        assert_eq!(view.sections()[1].bottom_md, 500.0);

        view.adjust_bottom(200.0);
        assert_eq!(view.sections()[1].top_md, 650.0);
        assert_eq!(view.sections()[1].bottom_md, 650.0);

        view.adjust_bottom(-10_000.0);
        assert_eq!(view.sections()[0].bottom_md, 0.0);
    }

    #[test]
    fn remove_selected_moves_cursor_up_at_end() {
        let (_, mut view) = bound();
        view.add_section();
        view.remove_selected();
        assert_eq!(view.sections().len(), 1);
        assert_eq!(view.cursor, 0);
        view.remove_selected();
        assert!(view.sections().is_empty());
        view.remove_selected();
        assert_eq!(view.cursor, 0);
    }

    #[test]
    fn save_commits_sections_and_touches_record() {
        let (mut store, mut view) = bound();
        let before = store.get(2).unwrap().last_modified;
        view.add_section();
        view.save_to_record(&mut store);

        assert!(!view.has_unsaved_edits());
        let well = store.get(2).unwrap();
        assert_eq!(well.geometry.len(), 2);
        assert_eq!(well.total_depth(), Some(500.0));
        assert!(well.last_modified > before);
    }

    #[test]
    fn load_replaces_previous_binding() {
        let (_, mut view) = bound();
        view.add_section();
        let other = Well::new_draft(9, Utc::now());
        view.load(&other);
        assert_eq!(view.well_id(), Some(9));
        assert_eq!(view.well_name(), "New Well 9");
        assert!(view.sections().is_empty());
        assert!(!view.has_unsaved_edits());
        assert_eq!(view.total_depth(), 0.0);
    }
}
