//! The emitted changeset.

use chrono::{DateTime, Utc};

use crate::track::ChangeRecord;

/// The flattened, ordered net-change list emitted at an outermost commit.
///
/// Items appear in first-registration order. An empty changeset is a
/// valid, meaningful emission: the transaction completed and nothing
/// changed.
#[derive(Debug, Clone)]
pub struct Changeset {
    items: Vec<ChangeRecord>,
    completed_at: DateTime<Utc>,
}

impl Changeset {
    pub(crate) fn new(items: Vec<ChangeRecord>) -> Self {
        Self {
            items,
            completed_at: Utc::now(),
        }
    }

    /// the net change records, in first-registration order
    pub fn items(&self) -> &[ChangeRecord] {
        &self.items
    }

    /// when the outermost commit completed
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// number of net changes
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// whether the transaction changed nothing
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// iterate the records in order
    pub fn iter(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.items.iter()
    }

    /// consume into the owned record list
    pub fn into_items(self) -> Vec<ChangeRecord> {
        self.items
    }
}
