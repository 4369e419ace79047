//! EventHandler — the call-site facade over a shared [`EventRegistry`].
//!
//! The registry is built once by the application and injected here; every
//! handler cloned from it talks to the same listeners and id space.

use std::sync::Arc;

use serde_json::Value;

use crate::registry::EventRegistry;
use crate::types::{Filter, ListenerId, Selector};

#[derive(Debug, Clone)]
pub struct EventHandler {
    registry: Arc<EventRegistry>,
}

impl EventHandler {
    pub fn new(registry: Arc<EventRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<EventRegistry> {
        &self.registry
    }

    pub fn register<F>(
        &self,
        event_name: &str,
        callback: F,
        filter: Option<Filter>,
        once: bool,
    ) -> ListenerId
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        self.registry.register_event(event_name, callback, filter, once)
    }

    /// `None` clears every listener of `event_name`.
    pub fn deregister(&self, event_name: &str, id: Option<ListenerId>) -> usize {
        self.registry.remove_event(event_name, id)
    }

    /// Broadcast `args` to every listener of `event_name`.
    pub fn on_event(&self, event_name: &str, args: &[Value]) -> usize {
        self.registry.trigger_event(event_name, Selector::All, args)
    }

    /// Deliver `args` only to the listener `id` of `event_name`.
    pub fn on_targeted_event(&self, event_name: &str, id: ListenerId, args: &[Value]) -> usize {
        self.registry.trigger_event(event_name, Selector::Id(id), args)
    }
}
