use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::model::well::WellId;

/// The kinds of view the application can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Home,
    WellData,
    Geometry,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Home, ViewKind::WellData, ViewKind::Geometry];

    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Home => "Home",
            ViewKind::WellData => "Well Data",
            ViewKind::Geometry => "Geometry",
        }
    }
}

/// A request to show a view, with the well it should be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationRequest {
    Home,
    WellData(WellId),
    Geometry(WellId),
}

impl NavigationRequest {
    pub fn target(&self) -> ViewKind {
        match self {
            NavigationRequest::Home => ViewKind::Home,
            NavigationRequest::WellData(_) => ViewKind::WellData,
            NavigationRequest::Geometry(_) => ViewKind::Geometry,
        }
    }

    pub fn well_id(&self) -> Option<WellId> {
        match self {
            NavigationRequest::Home => None,
            NavigationRequest::WellData(id) | NavigationRequest::Geometry(id) => Some(*id),
        }
    }
}

/// Handle returned by [`NavigationBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<RefCell<dyn FnMut(&NavigationRequest)>>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

/// Broadcasts navigation requests to subscribers.
///
/// Cloning yields another handle to the same bus. Delivery is synchronous and
/// in subscription order; a request published with no subscribers is dropped.
#[derive(Clone, Default)]
pub struct NavigationBus {
    inner: Rc<RefCell<BusInner>>,
}

impl fmt::Debug for NavigationBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl NavigationBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: FnMut(&NavigationRequest) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        let listener: Listener = Rc::new(RefCell::new(listener));
        inner.listeners.push((id, listener));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(sid, _)| *sid != id);
        inner.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn request_home(&self) {
        self.publish(NavigationRequest::Home);
    }

    pub fn request_well_data(&self, well_id: WellId) {
        self.publish(NavigationRequest::WellData(well_id));
    }

    pub fn request_geometry(&self, well_id: WellId) {
        self.publish(NavigationRequest::Geometry(well_id));
    }

    /// Deliver `request` to every current subscriber before returning
    pub fn publish(&self, request: NavigationRequest) {
        // Snapshot so listeners may subscribe/unsubscribe while being called
        let snapshot: Vec<(SubscriptionId, Listener)> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(id, l)| (*id, l.clone()))
            .collect();

        if snapshot.is_empty() {
            debug!(?request, "navigation request dropped: no subscribers");
            return;
        }

        for (id, listener) in snapshot {
            let still_subscribed = self.inner.borrow().listeners.iter().any(|(sid, _)| *sid == id);
            if !still_subscribed {
                continue;
            }
            match listener.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(&request),
                Err(_) => warn!(?request, "navigation listener re-entered itself; request skipped"),
            }
        }
    }
}
