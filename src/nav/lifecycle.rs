use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::model::config::{ReusePolicy, ViewsConfig};
use crate::model::store::{RecordStore, SharedStore};
use crate::model::well::{Well, WellId};

use super::bus::{NavigationBus, NavigationRequest, SubscriptionId, ViewKind};

/// Contract between the lifecycle manager and the views it displays
pub trait WellView {
    /// Bind the view to a record for editing
    fn load(&mut self, well: &Well);

    fn has_unsaved_edits(&self) -> bool {
        false
    }

    /// Commit in-progress edits back into the bound record
    fn save_to_record(&mut self, _store: &mut RecordStore) {}
}

/// Which view is showing, and for which well
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Home,
    WellData(WellId),
    Geometry(WellId),
}

impl ViewState {
    pub fn kind(&self) -> ViewKind {
        match self {
            ViewState::Home => ViewKind::Home,
            ViewState::WellData(_) => ViewKind::WellData,
            ViewState::Geometry(_) => ViewKind::Geometry,
        }
    }

    pub fn well_id(&self) -> Option<WellId> {
        match self {
            ViewState::Home => None,
            ViewState::WellData(id) | ViewState::Geometry(id) => Some(*id),
        }
    }
}

impl From<NavigationRequest> for ViewState {
    fn from(request: NavigationRequest) -> Self {
        match request {
            NavigationRequest::Home => ViewState::Home,
            NavigationRequest::WellData(id) => ViewState::WellData(id),
            NavigationRequest::Geometry(id) => ViewState::Geometry(id),
        }
    }
}

/// Reuse policy per view kind
#[derive(Debug, Clone)]
pub struct ViewPolicies {
    table: IndexMap<ViewKind, ReusePolicy>,
}

impl Default for ViewPolicies {
    fn default() -> Self {
        Self::from_config(&ViewsConfig::default())
    }
}

impl ViewPolicies {
    pub fn from_config(config: &ViewsConfig) -> Self {
        let mut table = IndexMap::new();
        table.insert(ViewKind::Home, config.home);
        table.insert(ViewKind::WellData, config.well_data);
        table.insert(ViewKind::Geometry, config.geometry);
        ViewPolicies { table }
    }

    pub fn policy(&self, kind: ViewKind) -> ReusePolicy {
        self.table
            .get(&kind)
            .copied()
            .unwrap_or(ReusePolicy::PerNavigation)
    }

    pub fn set(&mut self, kind: ViewKind, policy: ReusePolicy) {
        self.table.insert(kind, policy);
    }
}

/// Creates a fresh view instance for a kind
pub type ViewFactory<V> = Box<dyn FnMut(ViewKind) -> V>;

/// Owns the displayed view and performs transitions.
///
/// A transition flushes the outgoing view's unsaved edits, resolves the
/// target well (aborting if it no longer exists), creates or reuses the
/// target view according to its policy, binds it, and makes it current.
pub struct ViewLifecycleManager<V: WellView> {
    store: SharedStore,
    factory: ViewFactory<V>,
    policies: ViewPolicies,
    instances: IndexMap<ViewKind, V>,
    state: ViewState,
    subscription: Option<(NavigationBus, SubscriptionId)>,
}

impl<V: WellView> std::fmt::Debug for ViewLifecycleManager<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewLifecycleManager")
            .field("state", &self.state)
            .field("policies", &self.policies)
            .field("instances", &self.instances.keys().collect::<Vec<_>>())
            .field("attached", &self.subscription.is_some())
            .finish()
    }
}

impl<V: WellView> ViewLifecycleManager<V> {
    /// Start on Home, creating the Home view immediately
    pub fn new(store: SharedStore, policies: ViewPolicies, mut factory: ViewFactory<V>) -> Self {
        let mut instances = IndexMap::new();
        instances.insert(ViewKind::Home, factory(ViewKind::Home));
        ViewLifecycleManager {
            store,
            factory,
            policies,
            instances,
            state: ViewState::Home,
            subscription: None,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn policies(&self) -> &ViewPolicies {
        &self.policies
    }

    /// The view currently displayed
    pub fn current_view(&self) -> Option<&V> {
        self.instances.get(&self.state.kind())
    }

    pub fn current_view_mut(&mut self) -> Option<&mut V> {
        self.instances.get_mut(&self.state.kind())
    }

    /// A live instance of `kind`, displayed or retained
    pub fn instance(&self, kind: ViewKind) -> Option<&V> {
        self.instances.get(&kind)
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Perform a transition. Returns false if the target well is missing,
    /// in which case the displayed view and state are unchanged.
    pub fn navigate(&mut self, request: NavigationRequest) -> bool {
        self.flush();

        let well = match request.well_id() {
            Some(id) => match self.store.borrow().get(id) {
                Some(well) => Some(well.clone()),
                None => {
                    debug!(?request, "navigation target no longer exists; ignoring");
                    return false;
                }
            },
            None => None,
        };

        let outgoing = self.state.kind();
        let target = request.target();

        if outgoing != target && self.policies.policy(outgoing) == ReusePolicy::PerNavigation {
            self.instances.shift_remove(&outgoing);
        }

        let reuse = self.policies.policy(target) == ReusePolicy::Singleton
            && self.instances.contains_key(&target);
        if !reuse {
            let fresh = (self.factory)(target);
            self.instances.insert(target, fresh);
        }

        if let (Some(well), Some(view)) = (well.as_ref(), self.instances.get_mut(&target)) {
            view.load(well);
        }

        self.state = ViewState::from(request);
        debug!(?request, reused = reuse, "navigated");
        true
    }

    /// Save the displayed view's pending edits, if it has any
    pub fn flush(&mut self) {
        let kind = self.state.kind();
        if let Some(view) = self.instances.get_mut(&kind)
            && view.has_unsaved_edits()
        {
            debug!(?kind, "flushing unsaved edits");
            view.save_to_record(&mut self.store.borrow_mut());
        }
    }

    /// Stop receiving navigation requests
    pub fn detach(&mut self) {
        if let Some((bus, id)) = self.subscription.take() {
            bus.unsubscribe(id);
        }
    }

    /// End of session: flush the displayed view, then detach
    pub fn shutdown(&mut self) {
        self.flush();
        self.detach();
    }
}

impl<V: WellView + 'static> ViewLifecycleManager<V> {
    /// Subscribe to `bus` and return the shared handle the subscription drives
    pub fn attach(self, bus: &NavigationBus) -> Rc<RefCell<Self>> {
        let shared = Rc::new(RefCell::new(self));
        let weak = Rc::downgrade(&shared);
        let id = bus.subscribe(move |request| {
            let Some(manager) = weak.upgrade() else {
                return;
            };
            match manager.try_borrow_mut() {
                Ok(mut manager) => {
                    manager.navigate(*request);
                }
                Err(_) => warn!(?request, "navigation requested mid-transition; ignored"),
            }
        });
        shared.borrow_mut().subscription = Some((bus.clone(), id));
        shared
    }
}

impl<V: WellView> Drop for ViewLifecycleManager<V> {
    fn drop(&mut self) {
        self.detach();
    }
}
