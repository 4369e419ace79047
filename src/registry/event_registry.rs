//! EventRegistry — named events, persistent and once-only listeners, and
//! synchronous filtered dispatch.
//!
//! # Threading model
//!
//! All state (both listener maps and the id counter) sits behind one
//! `parking_lot::Mutex`. The lock is held only while the maps are read or
//! reshaped, never while a callback or filter runs, so listeners may call
//! back into the registry (register, remove, trigger) without deadlocking.
//!
//! # Dispatch
//!
//! `trigger_event` runs two phases, persistent then once. Each phase takes
//! an `Arc<Listener>` snapshot under the lock and executes it after the lock
//! is released. Snapshot semantics mean:
//!   - A listener added *during* a phase is not called in that phase.
//!   - A persistent listener removed *during* the persistent phase is still
//!     called in that phase.
//!
//! The once phase removes the selected listeners in the same critical
//! section that snapshots them. A once listener is consumed by being
//! selected, even if its filter then suppresses the callback or an earlier
//! listener panics.
//!
//! Panics inside a callback or filter propagate to the caller.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::config::RegistryOptions;
use crate::error::Result;
use crate::listener::Listener;
use crate::types::{Filter, ListenerId, Selector};

use super::state::RegistryState;
use super::subscription::Subscription;

pub struct EventRegistry {
    state: Mutex<RegistryState>,
}

impl EventRegistry {
    /// Create an empty registry whose first listener gets id 1.
    pub fn new() -> Self {
        Self::from_valid_options(&RegistryOptions::default())
    }

    /// Create an empty registry from validated `options`.
    pub fn with_options(options: RegistryOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::from_valid_options(&options))
    }

    fn from_valid_options(options: &RegistryOptions) -> Self {
        Self {
            state: Mutex::new(RegistryState::new(options.first_id)),
        }
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Register `callback` for `event_name` and return its id.
    ///
    /// With `once = true` the listener is removed the first time a trigger
    /// selects it. A `None` filter always fires.
    pub fn register_event<F>(
        &self,
        event_name: &str,
        callback: F,
        filter: Option<Filter>,
        once: bool,
    ) -> ListenerId
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        let id = self
            .state
            .lock()
            .insert(event_name, Arc::new(callback), filter, once);
        tracing::debug!(event = event_name, id, once, "listener registered");
        id
    }

    /// Register a persistent, unfiltered listener.
    pub fn listen<F>(&self, event_name: &str, callback: F) -> ListenerId
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        self.register_event(event_name, callback, None, false)
    }

    /// Register a one-shot, unfiltered listener.
    pub fn listen_once<F>(&self, event_name: &str, callback: F) -> ListenerId
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        self.register_event(event_name, callback, None, true)
    }

    /// Register a single [`Subscription`].
    pub fn register(&self, subscription: Subscription) -> Result<ListenerId> {
        let prepared = subscription.prepare()?;
        let id = self.state.lock().insert(
            &prepared.event_name,
            prepared.callback,
            prepared.filter,
            prepared.once,
        );
        tracing::debug!(
            event = %prepared.event_name,
            id,
            once = prepared.once,
            "listener registered"
        );
        Ok(id)
    }

    /// Register several subscriptions at once.
    ///
    /// Every subscription is validated first; on error nothing is registered.
    /// Ids are assigned in input order under a single lock acquisition, so
    /// they are consecutive.
    pub fn register_many(
        &self,
        subscriptions: impl IntoIterator<Item = Subscription>,
    ) -> Result<Vec<ListenerId>> {
        let prepared = subscriptions
            .into_iter()
            .map(Subscription::prepare)
            .collect::<Result<Vec<_>>>()?;

        let ids: Vec<ListenerId> = {
            let mut state = self.state.lock();
            prepared
                .into_iter()
                .map(|p| state.insert(&p.event_name, p.callback, p.filter, p.once))
                .collect()
        };
        tracing::debug!(count = ids.len(), "listeners registered in batch");
        Ok(ids)
    }

    // ------------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------------

    /// Remove listeners for `event_name` and return how many were removed.
    ///
    /// `None` clears every listener of the event, persistent and once alike.
    /// `Some(id)` removes that one listener. Unknown names or ids are a no-op.
    pub fn remove_event(&self, event_name: &str, id: Option<ListenerId>) -> usize {
        let removed = {
            let mut state = self.state.lock();
            match id {
                None => state.remove_all(event_name),
                Some(id) => state.remove_id(event_name, id),
            }
        };
        tracing::debug!(event = event_name, id, removed, "listeners removed");
        removed
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Dispatch `args` to the listeners of `event_name` picked by `selector`.
    ///
    /// Returns the number of listeners selected across both phases, counting
    /// those whose filter suppressed the callback.
    pub fn trigger_event(&self, event_name: &str, selector: Selector, args: &[Value]) -> usize {
        let persistent = self.state.lock().select_persistent(event_name, selector);
        invoke_all(&persistent, args);

        let once = self.state.lock().take_once(event_name, selector);
        if !once.is_empty() {
            tracing::debug!(
                event = event_name,
                consumed = once.len(),
                "once listeners consumed"
            );
        }
        invoke_all(&once, args);

        let selected = persistent.len() + once.len();
        tracing::trace!(event = event_name, %selector, selected, "event triggered");
        selected
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    /// Number of listeners, persistent and once, registered for `event_name`.
    pub fn listener_count(&self, event_name: &str) -> usize {
        self.state.lock().count(event_name)
    }

    pub fn has_listeners(&self, event_name: &str) -> bool {
        self.listener_count(event_name) > 0
    }

    /// Sorted names of every event with at least one listener.
    pub fn event_names(&self) -> Vec<String> {
        self.state.lock().event_names()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().is_empty()
    }
}

fn invoke_all(listeners: &[Arc<Listener>], args: &[Value]) {
    for listener in listeners {
        tracing::trace!(event = listener.name(), id = listener.id(), "invoking listener");
        listener.execute(args);
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("events", &self.event_names())
            .finish()
    }
}
