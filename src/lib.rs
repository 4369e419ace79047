//! In-process event registry.
//!
//! Listeners are registered against an event name, either persistent or
//! once-only, optionally gated by a filter. Triggering an event invokes the
//! matching listeners synchronously on the calling thread, either all of them
//! or a single one picked by id.
//!
//! ```
//! use event_registry::{EventRegistry, Selector};
//! use serde_json::json;
//!
//! let registry = EventRegistry::new();
//! let welcome = registry.listen("login", |args| println!("welcome {}", args[0]));
//! let first = registry.listen_once("login", |args| println!("first login: {}", args[0]));
//! assert_eq!((welcome, first), (1, 2));
//!
//! assert_eq!(registry.trigger_event("login", Selector::All, &[json!("alice")]), 2);
//! assert_eq!(registry.trigger_event("login", Selector::All, &[json!("bob")]), 1);
//! ```

pub mod config;
pub mod error;
pub mod handler;
mod listener;
pub mod registry;
pub mod types;

pub use config::{RegistryOptions, MAX_FIRST_ID};
pub use error::{EventError, Result};
pub use handler::EventHandler;
pub use registry::{EventRegistry, Subscription};
pub use types::{predicate, Callback, CallbackFn, Filter, FilterFn, ListenerId, Selector};
