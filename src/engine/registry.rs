//! Registry coordinating independent tracked units.
//!
//! Each unit of work (a session, a request context) owns its own
//! [`ChangeTracker`] and stack; the registry only maps unit ids to
//! trackers and serializes access per unit. It introduces no cross-unit
//! coordination of tracking state.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::engine::error::{EngineError, EngineResult};
use crate::engine::tracker::ChangeTracker;

/// Identifier of a tracked unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(String);

impl UnitId {
    fn generate() -> Self {
        Self(Ulid::new().to_string().to_lowercase())
    }

    /// get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tracked-unit registry.
///
/// Thread-safe: can be shared across threads via Clone (uses Arc
/// internally). The map lock guards unit open/close; each unit's tracker
/// sits behind its own mutex, so the one-mutator-per-unit rule is enforced
/// at runtime while separate units proceed independently.
#[derive(Clone, Default)]
pub struct TrackerRegistry {
    inner: Arc<TrackerRegistryInner>,
}

#[derive(Default)]
struct TrackerRegistryInner {
    /// Open units tracked by ID.
    units: RwLock<HashMap<UnitId, Mutex<ChangeTracker>>>,
}

impl TrackerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new tracked unit with a fresh root frame.
    pub fn open_unit(&self) -> UnitId {
        let id = UnitId::generate();
        self.inner
            .units
            .write()
            .insert(id.clone(), Mutex::new(ChangeTracker::new()));
        tracing::debug!(unit = %id, "tracked unit opened");
        id
    }

    /// Tear a unit down, discarding its stack wholesale.
    ///
    /// Returns whether the unit was open.
    pub fn close_unit(&self, id: &UnitId) -> bool {
        let removed = self.inner.units.write().remove(id).is_some();
        if removed {
            tracing::debug!(unit = %id, "tracked unit closed");
        }
        removed
    }

    /// Check if a unit is open.
    pub fn is_open(&self, id: &UnitId) -> bool {
        self.inner.units.read().contains_key(id)
    }

    /// Get the number of open units.
    pub fn unit_count(&self) -> usize {
        self.inner.units.read().len()
    }

    /// List all open unit IDs.
    pub fn unit_ids(&self) -> Vec<UnitId> {
        self.inner.units.read().keys().cloned().collect()
    }

    /// Run a closure against a unit's tracker, under that unit's lock.
    pub fn with_unit<T>(
        &self,
        id: &UnitId,
        f: impl FnOnce(&mut ChangeTracker) -> T,
    ) -> EngineResult<T> {
        let units = self.inner.units.read();
        let tracker = units
            .get(id)
            .ok_or_else(|| EngineError::UnitNotFound(id.clone()))?;
        let mut tracker = tracker.lock();
        Ok(f(&mut tracker))
    }
}

impl fmt::Debug for TrackerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerRegistry")
            .field("unit_count", &self.unit_count())
            .finish()
    }
}
