use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Identifier handed out by [`EventRegistry`](crate::EventRegistry) at
/// registration time. Never reused within one registry.
pub type ListenerId = u64;

/// Closure type for listener callbacks. Receives the trigger arguments.
pub type CallbackFn = dyn Fn(&[Value]) + Send + Sync;

/// Closure type for listener filters. Receives the same arguments as the callback.
pub type FilterFn = dyn Fn(&[Value]) -> bool + Send + Sync;

/// Shared callback handle.
pub type Callback = Arc<CallbackFn>;

/// Shared filter handle.
pub type Filter = Arc<FilterFn>;

/// Wrap a closure as a [`Filter`].
///
/// Saves the `Arc::new(..) as Filter` coercion at call sites:
///
/// ```
/// use event_registry::{predicate, EventRegistry};
/// use serde_json::json;
///
/// let registry = EventRegistry::new();
/// registry.register_event(
///     "damage",
///     |_args| {},
///     Some(predicate(|args| args[0].as_i64().unwrap_or(0) > 0)),
///     false,
/// );
/// assert_eq!(registry.trigger_event("damage", Default::default(), &[json!(5)]), 1);
/// ```
pub fn predicate<F>(f: F) -> Filter
where
    F: Fn(&[Value]) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Which listeners of an event a trigger dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selector {
    /// Every listener registered for the event, in registration order.
    #[default]
    All,
    /// Only the listener with this identifier.
    Id(ListenerId),
}

impl Selector {
    /// Whether a listener with `id` is selected.
    pub fn matches(&self, id: ListenerId) -> bool {
        match self {
            Self::All => true,
            Self::Id(target) => *target == id,
        }
    }
}

impl From<ListenerId> for Selector {
    fn from(id: ListenerId) -> Self {
        Self::Id(id)
    }
}

impl From<Option<ListenerId>> for Selector {
    fn from(id: Option<ListenerId>) -> Self {
        id.map_or(Self::All, Self::Id)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Id(id) => write!(f, "#{id}"),
        }
    }
}
