//! Identifier types for composites

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Composite ID - the identity of one composite
///
/// A composite never shares identity with its operator or its delegate.
/// Cloning a `Composite` handle keeps the ID; building a new composite
/// (including through chaining) always mints a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeId(Uuid);

impl CompositeId {
    /// Create a new random composite ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CompositeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CompositeId> for Uuid {
    fn from(id: CompositeId) -> Self {
        id.0
    }
}
