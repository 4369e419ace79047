//! Subscription — a listener description built before registration.
//!
//! Used for batch registration through
//! [`EventRegistry::register_many`](super::EventRegistry::register_many),
//! where every entry is validated before any of them is registered.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{EventError, Result};
use crate::types::{Callback, Filter};

#[derive(Clone)]
pub struct Subscription {
    event_name: String,
    callback: Option<Callback>,
    filter: Option<Filter>,
    once: bool,
}

impl Subscription {
    pub fn new(event_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            callback: None,
            filter: None,
            once: false,
        }
    }

    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Mark the listener as one-shot.
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn is_once(&self) -> bool {
        self.once
    }

    /// Fails with [`EventError::MissingCallback`] when no callback was set.
    pub(crate) fn prepare(self) -> Result<PreparedListener> {
        let Self {
            event_name,
            callback,
            filter,
            once,
        } = self;
        let Some(callback) = callback else {
            return Err(EventError::MissingCallback { event: event_name });
        };
        Ok(PreparedListener {
            event_name,
            callback,
            filter,
            once,
        })
    }
}

/// A validated subscription, ready to be inserted under the registry lock.
pub(crate) struct PreparedListener {
    pub(crate) event_name: String,
    pub(crate) callback: Callback,
    pub(crate) filter: Option<Filter>,
    pub(crate) once: bool,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("event_name", &self.event_name)
            .field("callback", &self.callback.as_ref().map(|_| "<fn>"))
            .field("filter", &self.filter.as_ref().map(|_| "<fn>"))
            .field("once", &self.once)
            .finish()
    }
}
