//! Tests for once-only listeners.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use event_registry::{predicate, EventRegistry, Selector};
use serde_json::{json, Value};

fn counter() -> (Arc<AtomicUsize>, impl Fn(&[Value]) + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = Arc::clone(&count);
    (count, move |_: &[Value]| {
        count_clone.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn once_listener_fires_at_most_once() {
    let registry = EventRegistry::new();
    let (count, callback) = counter();
    registry.listen_once("ready", callback);

    for _ in 0..3 {
        registry.trigger_event("ready", Selector::All, &[]);
    }

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!registry.has_listeners("ready"));
    assert!(registry.event_names().is_empty(), "empty entries are dropped");
}

#[test]
fn filtered_once_listener_is_consumed_without_calling_back() {
    let registry = EventRegistry::new();
    let (count, callback) = counter();
    registry.register_event("ready", callback, Some(predicate(|_| false)), true);

    assert_eq!(registry.trigger_event("ready", Selector::All, &[json!(1)]), 1);
    assert_eq!(registry.trigger_event("ready", Selector::All, &[json!(1)]), 0);

    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert!(!registry.has_listeners("ready"));
}

#[test]
fn filter_is_evaluated_on_the_consuming_trigger_only() {
    let registry = EventRegistry::new();
    let (count, callback) = counter();
    registry.register_event(
        "damage",
        callback,
        Some(predicate(|args| args[0].as_i64().unwrap_or(0) > 0)),
        true,
    );

    registry.trigger_event("damage", Selector::All, &[json!(-5)]);
    registry.trigger_event("damage", Selector::All, &[json!(5)]);

    assert_eq!(
        count.load(Ordering::SeqCst),
        0,
        "rejected trigger already consumed the listener"
    );
}

#[test]
fn once_listeners_leave_persistent_listeners_untouched() {
    let registry = EventRegistry::new();
    let (persistent_count, persistent) = counter();
    let (once_count, once) = counter();
    let p = registry.listen("save", persistent);
    registry.listen_once("save", once);

    registry.trigger_event("save", Selector::All, &[]);
    registry.trigger_event("save", Selector::All, &[]);

    assert_eq!(persistent_count.load(Ordering::SeqCst), 2);
    assert_eq!(once_count.load(Ordering::SeqCst), 1);
    assert_eq!(registry.listener_count("save"), 1);
    assert_eq!(registry.remove_event("save", Some(p)), 1);
}

#[test]
fn targeted_trigger_keeps_other_once_listeners_registered() {
    let registry = EventRegistry::new();
    let (a_count, a) = counter();
    let (b_count, b) = counter();
    let a_id = registry.listen_once("ready", a);
    let b_id = registry.listen_once("ready", b);

    registry.trigger_event("ready", Selector::Id(b_id), &[]);
    assert_eq!(registry.listener_count("ready"), 1);

    registry.trigger_event("ready", Selector::Id(b_id), &[]);
    assert_eq!(b_count.load(Ordering::SeqCst), 1, "consumed listener never refires");

    registry.trigger_event("ready", Selector::Id(a_id), &[]);
    assert_eq!(a_count.load(Ordering::SeqCst), 1);
    assert!(registry.is_empty());
}

#[test]
fn once_listener_registered_by_persistent_callback_fires_in_same_trigger() {
    let registry = Arc::new(EventRegistry::new());
    let (count, callback) = counter();
    let callback = Arc::new(callback);

    let registry_clone = Arc::clone(&registry);
    registry.listen_once("outer", |_| {});
    registry.listen("outer", move |_| {
        let callback = Arc::clone(&callback);
        registry_clone.listen_once("outer", move |args| callback(args));
    });

    registry.trigger_event("outer", Selector::All, &[]);

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(registry.listener_count("outer"), 1, "only the persistent listener remains");
}
