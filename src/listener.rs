//! Listener — one registered callback for one event name.
//!
//! A listener is immutable once built. The registry hands out
//! `Arc<Listener>` snapshots during dispatch, so executing a listener never
//! touches registry state.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::types::{Callback, Filter, ListenerId};

pub(crate) struct Listener {
    id: ListenerId,
    event_name: String,
    callback: Callback,
    filter: Option<Filter>,
}

impl Listener {
    pub(crate) fn new(
        id: ListenerId,
        event_name: impl Into<String>,
        callback: Callback,
        filter: Option<Filter>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id,
            event_name: event_name.into(),
            callback,
            filter,
        })
    }

    pub(crate) fn id(&self) -> ListenerId {
        self.id
    }

    pub(crate) fn name(&self) -> &str {
        &self.event_name
    }

    /// Whether the filter lets `args` through. No filter always passes.
    pub(crate) fn passes(&self, args: &[Value]) -> bool {
        match &self.filter {
            Some(filter) => filter(args),
            None => true,
        }
    }

    /// Run the callback with `args` unless the filter rejects them.
    ///
    /// Panics from the filter or callback propagate to the caller.
    pub(crate) fn execute(&self, args: &[Value]) {
        if !self.passes(args) {
            return;
        }
        (self.callback)(args);
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("event_name", &self.event_name)
            .field("callback", &"<fn>")
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
