use std::cell::RefCell;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::model::store::SharedStore;
use crate::model::well::{Well, WellId};

use super::search::{FilterCriteria, SortKey, project_indices};
use super::stats::DashboardStats;

/// Error type for building a dashboard
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("dashboard requires a backing record store")]
    MissingStore,
    #[error("well id space exhausted: a record already uses id {}", WellId::MAX)]
    IdSpaceExhausted,
}

/// Derived state, stamped with what it was computed from
#[derive(Debug)]
struct Derived {
    store_revision: u64,
    criteria_revision: u64,
    /// Indices into the store's records, filtered and sorted
    rows: Vec<usize>,
    stats: DashboardStats,
}

/// Live filtered/sorted view over the record store, plus global statistics.
///
/// Criteria setters and dashboard actions recompute before returning. Reads
/// compare the store revision with the one the cache was built from, so a
/// mutation made through another handle is picked up on the next read.
#[derive(Debug)]
pub struct Dashboard {
    store: SharedStore,
    criteria: FilterCriteria,
    criteria_revision: u64,
    card_view: bool,
    derived: RefCell<Derived>,
}

/// Builder for [`Dashboard`]; the store is mandatory
#[derive(Debug, Default)]
pub struct DashboardBuilder {
    store: Option<SharedStore>,
    card_view: bool,
}

impl DashboardBuilder {
    pub fn store(mut self, store: SharedStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn card_view(mut self, card_view: bool) -> Self {
        self.card_view = card_view;
        self
    }

    pub fn build(self) -> Result<Dashboard, DashboardError> {
        let store = self.store.ok_or(DashboardError::MissingStore)?;
        Ok(Dashboard::with_layout(store, self.card_view))
    }
}

impl Dashboard {
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    /// Dashboard over `store` with default criteria and list layout
    pub fn new(store: SharedStore) -> Self {
        Self::with_layout(store, false)
    }

    fn with_layout(store: SharedStore, card_view: bool) -> Self {
        let criteria = FilterCriteria::default();
        let derived = {
            let s = store.borrow();
            Derived {
                store_revision: s.revision(),
                criteria_revision: 0,
                rows: project_indices(s.wells(), &criteria),
                stats: DashboardStats::compute(s.wells()),
            }
        };
        Dashboard {
            store,
            criteria,
            criteria_revision: 0,
            card_view,
            derived: RefCell::new(derived),
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Criteria
    // -----------------------------------------------------------------------

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn search_text(&self) -> &str {
        &self.criteria.search_text
    }

    pub fn sort_key(&self) -> SortKey {
        self.criteria.sort_key
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.criteria.search_text {
            self.criteria.search_text = text;
            self.criteria_changed();
        }
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        if key != self.criteria.sort_key {
            self.criteria.sort_key = key;
            self.criteria_changed();
        }
    }

    /// Reset search and sort to their defaults and recompute unconditionally
    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.criteria_revision += 1;
        self.recompute();
    }

    pub fn is_card_view(&self) -> bool {
        self.card_view
    }

    /// Flip between list and card layout
    pub fn toggle_view(&mut self) {
        self.card_view = !self.card_view;
    }

    fn criteria_changed(&mut self) {
        self.criteria_revision += 1;
        self.refresh();
    }

    // -----------------------------------------------------------------------
    // Store actions
    // -----------------------------------------------------------------------

    /// Create a draft well with the next id and make it active.
    /// Fails without touching the store when no higher id is left.
    pub fn create_new_well(&self) -> Result<WellId, DashboardError> {
        self.create_new_well_at(Utc::now())
    }

    pub fn create_new_well_at(&self, now: DateTime<Utc>) -> Result<WellId, DashboardError> {
        let id = {
            let mut store = self.store.borrow_mut();
            let id = store.next_id().ok_or(DashboardError::IdSpaceExhausted)?;
            store.add(Well::new_draft(id, now));
            store.set_active(id);
            id
        };
        info!(well_id = id, "created well");
        self.refresh();
        Ok(id)
    }

    /// Remove a well; absent ids are ignored
    pub fn remove_well(&self, id: WellId) -> Option<Well> {
        let removed = self.store.borrow_mut().remove(id);
        if removed.is_some() {
            info!(well_id = id, "removed well");
        }
        self.refresh();
        removed
    }

    // -----------------------------------------------------------------------
    // Derived state
    // -----------------------------------------------------------------------

    /// Statistics over every record, independent of the filter
    pub fn stats(&self) -> DashboardStats {
        self.refresh();
        self.derived.borrow().stats
    }

    /// Records passing the filter, in sort order
    pub fn visible_wells(&self) -> Vec<Well> {
        self.refresh();
        let store = self.store.borrow();
        let derived = self.derived.borrow();
        derived
            .rows
            .iter()
            .filter_map(|&i| store.wells().get(i))
            .cloned()
            .collect()
    }

    pub fn visible_ids(&self) -> Vec<WellId> {
        self.refresh();
        let store = self.store.borrow();
        let derived = self.derived.borrow();
        derived
            .rows
            .iter()
            .filter_map(|&i| store.wells().get(i).map(|w| w.id))
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.refresh();
        self.derived.borrow().rows.len()
    }

    /// Rebuild projection and statistics regardless of staleness
    pub fn recompute(&self) {
        let store = self.store.borrow();
        let mut derived = self.derived.borrow_mut();
        derived.rows = project_indices(store.wells(), &self.criteria);
        derived.stats = DashboardStats::compute(store.wells());
        derived.store_revision = store.revision();
        derived.criteria_revision = self.criteria_revision;
        debug!(revision = store.revision(), rows = derived.rows.len(), "recomputed dashboard");
    }

    /// Bring derived state up to date with the store and criteria
    fn refresh(&self) {
        let store = self.store.borrow();
        let mut derived = self.derived.borrow_mut();
        let store_changed = derived.store_revision != store.revision();
        if store_changed {
            derived.stats = DashboardStats::compute(store.wells());
            derived.store_revision = store.revision();
        }
        if store_changed || derived.criteria_revision != self.criteria_revision {
            derived.rows = project_indices(store.wells(), &self.criteria);
            derived.criteria_revision = self.criteria_revision;
        }
    }
}
