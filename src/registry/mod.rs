//! Registry layer — listener bookkeeping and dispatch.
//!
//! # Modules
//!
//! - `state` — the persistent and once maps plus the shared id counter.
//! - [`subscription`] — [`Subscription`] builder for validated registration.
//! - [`event_registry`] — [`EventRegistry`], the public entry point.

pub mod event_registry;
mod state;
pub mod subscription;

pub use event_registry::EventRegistry;
pub use subscription::Subscription;
