//! Unique identifier types for the insights pipeline
//!
//! Uses UUID v7 for time-sortable ordering, so refresh cycles can be
//! correlated chronologically across logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for one refresh cycle
///
/// Stamped on each end-to-end Loader → Aggregation Engine invocation and
/// carried through log events and the refresh outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefreshId(Uuid);

impl RefreshId {
    /// Create a new RefreshId with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RefreshId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RefreshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
