//! RegistryState — the two listener maps plus the shared id counter.
//!
//! Everything here runs under the registry mutex. No method calls user code.

use std::collections::HashMap;
use std::sync::Arc;

use crate::listener::Listener;
use crate::types::{Callback, Filter, ListenerId, Selector};

type ListenerMap = HashMap<String, Vec<Arc<Listener>>>;

pub(crate) struct RegistryState {
    /// Listeners that stay registered after firing, keyed by event name.
    persistent: ListenerMap,
    /// Listeners removed as soon as a trigger selects them, keyed by event name.
    once: ListenerMap,
    /// Next id to hand out. Shared by both maps.
    next_id: ListenerId,
}

impl RegistryState {
    pub(crate) fn new(first_id: ListenerId) -> Self {
        Self {
            persistent: HashMap::new(),
            once: HashMap::new(),
            next_id: first_id,
        }
    }

    /// Hand out the current id and advance the counter.
    ///
    /// # Panics
    ///
    /// When the counter cannot advance. Ids never wrap. Validated options
    /// start at most at `MAX_FIRST_ID`, which leaves `2^63` ids.
    fn next_id(&mut self) -> ListenerId {
        let id = self.next_id;
        self.next_id = match id.checked_add(1) {
            Some(next) => next,
            None => panic!("Listener id space exhausted"),
        };
        id
    }

    /// Append a new listener to the end of its sequence and return its id.
    pub(crate) fn insert(
        &mut self,
        event_name: &str,
        callback: Callback,
        filter: Option<Filter>,
        once: bool,
    ) -> ListenerId {
        let id = self.next_id();
        let listener = Listener::new(id, event_name, callback, filter);
        let map = if once {
            &mut self.once
        } else {
            &mut self.persistent
        };
        map.entry(event_name.to_string()).or_default().push(listener);
        id
    }

    /// Drop every listener for `event_name` from both maps.
    pub(crate) fn remove_all(&mut self, event_name: &str) -> usize {
        let persistent = self.persistent.remove(event_name).map_or(0, |listeners| listeners.len());
        let once = self.once.remove(event_name).map_or(0, |listeners| listeners.len());
        persistent + once
    }

    /// Remove the listener with `id` from whichever map holds it.
    pub(crate) fn remove_id(&mut self, event_name: &str, id: ListenerId) -> usize {
        remove_first(&mut self.persistent, event_name, id)
            + remove_first(&mut self.once, event_name, id)
    }

    /// Persistent listeners selected by `selector`, in registration order.
    pub(crate) fn select_persistent(
        &self,
        event_name: &str,
        selector: Selector,
    ) -> Vec<Arc<Listener>> {
        self.persistent
            .get(event_name)
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|l| selector.matches(l.id()))
                    .map(Arc::clone)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Remove and return the once listeners selected by `selector`.
    ///
    /// The entry for `event_name` is dropped when nothing is left in it.
    pub(crate) fn take_once(
        &mut self,
        event_name: &str,
        selector: Selector,
    ) -> Vec<Arc<Listener>> {
        match selector {
            Selector::All => self.once.remove(event_name).unwrap_or_default(),
            Selector::Id(id) => {
                let Some(listeners) = self.once.get_mut(event_name) else {
                    return Vec::new();
                };
                let taken: Vec<Arc<Listener>> = listeners
                    .iter()
                    .position(|l| l.id() == id)
                    .map(|idx| listeners.remove(idx))
                    .into_iter()
                    .collect();
                if listeners.is_empty() {
                    self.once.remove(event_name);
                }
                taken
            }
        }
    }

    pub(crate) fn count(&self, event_name: &str) -> usize {
        let persistent = self.persistent.get(event_name).map_or(0, Vec::len);
        let once = self.once.get(event_name).map_or(0, Vec::len);
        persistent + once
    }

    pub(crate) fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .persistent
            .keys()
            .chain(self.once.keys())
            .cloned()
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.persistent.is_empty() && self.once.is_empty()
    }
}

/// Remove the first listener matching `id`, dropping the entry if it empties.
fn remove_first(map: &mut ListenerMap, event_name: &str, id: ListenerId) -> usize {
    let Some(listeners) = map.get_mut(event_name) else {
        return 0;
    };
    let Some(idx) = listeners.iter().position(|l| l.id() == id) else {
        return 0;
    };
    listeners.remove(idx);
    if listeners.is_empty() {
        map.remove(event_name);
    }
    1
}
