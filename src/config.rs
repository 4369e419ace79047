//! Registry construction options.
//!
//! Options derive `Deserialize` so applications can embed them in their own
//! configuration files; missing fields fall back to [`RegistryOptions::default`].

use serde::{Deserialize, Serialize};

use crate::error::{EventError, Result};
use crate::types::ListenerId;

/// Largest accepted [`RegistryOptions::first_id`].
///
/// Starting at or below this leaves at least `2^63` ids before the counter
/// could overflow.
pub const MAX_FIRST_ID: ListenerId = ListenerId::MAX / 2;

/// Options for [`EventRegistry::with_options`](crate::EventRegistry::with_options).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryOptions {
    /// Identifier assigned to the first registered listener. Must lie in
    /// `1..=MAX_FIRST_ID`.
    pub first_id: ListenerId,
}

impl RegistryOptions {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_FIRST_ID).contains(&self.first_id) {
            return Err(EventError::invalid_first_id(self.first_id));
        }
        Ok(())
    }
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self { first_id: 1 }
    }
}
