pub mod geometry;
pub mod home;
pub mod well_data;

pub use geometry::GeometryView;
pub use home::HomeView;
pub use well_data::{FieldError, WellDataField, WellDataView, WellDraft};

use crate::model::store::RecordStore;
use crate::model::well::Well;
use crate::nav::{ViewKind, WellView};

/// The concrete views the application displays
#[derive(Debug, Clone)]
pub enum AppView {
    Home(HomeView),
    WellData(WellDataView),
    Geometry(GeometryView),
}

impl AppView {
    /// Factory used by the lifecycle manager
    pub fn create(kind: ViewKind) -> AppView {
        match kind {
            ViewKind::Home => AppView::Home(HomeView::default()),
            ViewKind::WellData => AppView::WellData(WellDataView::default()),
            ViewKind::Geometry => AppView::Geometry(GeometryView::default()),
        }
    }

    pub fn kind(&self) -> ViewKind {
        match self {
            AppView::Home(_) => ViewKind::Home,
            AppView::WellData(_) => ViewKind::WellData,
            AppView::Geometry(_) => ViewKind::Geometry,
        }
    }

    fn inner(&self) -> &dyn WellView {
        match self {
            AppView::Home(v) => v,
            AppView::WellData(v) => v,
            AppView::Geometry(v) => v,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn WellView {
        match self {
            AppView::Home(v) => v,
            AppView::WellData(v) => v,
            AppView::Geometry(v) => v,
        }
    }
}

impl WellView for AppView {
    fn load(&mut self, well: &Well) {
        self.inner_mut().load(well);
    }

    fn has_unsaved_edits(&self) -> bool {
        self.inner().has_unsaved_edits()
    }

    fn save_to_record(&mut self, store: &mut RecordStore) {
        self.inner_mut().save_to_record(store);
    }
}
