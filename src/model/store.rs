use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::well::{Well, WellId};

/// A single mutation of the record store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Added(WellId),
    Removed(WellId),
    Updated(WellId),
}

impl StoreEvent {
    pub fn well_id(&self) -> WellId {
        match self {
            StoreEvent::Added(id) | StoreEvent::Removed(id) | StoreEvent::Updated(id) => *id,
        }
    }
}

/// Callback invoked after every store mutation, with the store as it is afterwards
pub type StoreListener = Box<dyn FnMut(&StoreEvent, &RecordStore)>;

/// Handle shared by the components that read or mutate the store
pub type SharedStore = Rc<RefCell<RecordStore>>;

/// Ordered collection of well records plus the active-well pointer.
///
/// Insertion order is the canonical iteration order. Every mutation bumps
/// `revision` and notifies listeners before returning, so derived state can be
/// brought up to date by whoever issued the mutation.
#[derive(Default)]
pub struct RecordStore {
    wells: Vec<Well>,
    active_id: Option<WellId>,
    revision: u64,
    listeners: Vec<StoreListener>,
}

impl fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("wells", &self.wells)
            .field("active_id", &self.active_id)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records loaded elsewhere (no notifications are emitted)
    pub fn from_wells(wells: Vec<Well>) -> Self {
        RecordStore {
            wells,
            ..Default::default()
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Rc::new(RefCell::new(self))
    }

    pub fn wells(&self) -> &[Well] {
        &self.wells
    }

    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    /// Mutation counter; changes whenever the contents change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: WellId) -> Option<&Well> {
        self.wells.iter().find(|w| w.id == id)
    }

    pub fn contains(&self, id: WellId) -> bool {
        self.get(id).is_some()
    }

    pub fn active_id(&self) -> Option<WellId> {
        self.active_id
    }

    /// The active well, or `None` when nothing is selected or the id dangles
    pub fn active_well(&self) -> Option<&Well> {
        self.active_id.and_then(|id| self.get(id))
    }

    /// Next id for a new record: highest existing id + 1, or 1 when empty.
    /// `None` once the highest id is `WellId::MAX`.
    ///
    /// Ids freed by removing a lower record are not reused; removing the
    /// highest record makes its id available again.
    pub fn next_id(&self) -> Option<WellId> {
        match self.wells.iter().map(|w| w.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    /// Append a record. Callers guarantee the id is unique.
    pub fn add(&mut self, well: Well) {
        let id = well.id;
        self.wells.push(well);
        self.bump(StoreEvent::Added(id));
    }

    /// Remove the first record with this id. Absent ids are a no-op.
    pub fn remove(&mut self, id: WellId) -> Option<Well> {
        let pos = self.wells.iter().position(|w| w.id == id)?;
        let removed = self.wells.remove(pos);
        if self.active_id == Some(id) {
            self.active_id = None;
        }
        self.bump(StoreEvent::Removed(id));
        Some(removed)
    }

    /// Select a well. Not validated: the id may not exist (yet).
    pub fn set_active(&mut self, id: WellId) {
        self.active_id = Some(id);
    }

    pub fn clear_active(&mut self) {
        self.active_id = None;
    }

    /// Edit the first record with this id in place. Returns false if absent.
    ///
    /// The closure is responsible for `last_modified`.
    pub fn update<F>(&mut self, id: WellId, edit: F) -> bool
    where
        F: FnOnce(&mut Well),
    {
        let Some(well) = self.wells.iter_mut().find(|w| w.id == id) else {
            return false;
        };
        edit(well);
        self.bump(StoreEvent::Updated(id));
        true
    }

    /// Register a listener for every subsequent mutation
    pub fn subscribe(&mut self, listener: StoreListener) {
        self.listeners.push(listener);
    }

    fn bump(&mut self, event: StoreEvent) {
        self.revision += 1;
        // Listeners see `&self`, so they cannot register new listeners mid-flight
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in &mut listeners {
            listener(&event, self);
        }
        self.listeners = listeners;
    }
}
