pub mod bus;
pub mod lifecycle;

pub use bus::{NavigationBus, NavigationRequest, SubscriptionId, ViewKind};
pub use lifecycle::{ViewFactory, ViewLifecycleManager, ViewPolicies, ViewState, WellView};
