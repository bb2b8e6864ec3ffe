//! Change frames - one per transaction-nesting level.

use std::collections::HashMap;

use crate::row::DiffRow;
use crate::track::error::TrackResult;
use crate::track::record::{ChangeRecord, ChangeState};
use crate::track::types::EntityKey;

/// An insertion-ordered `key -> ChangeRecord` map for one nesting level.
///
/// Order of first appearance matters for deterministic emission and is
/// preserved across merges, so records live in a vector with a key index
/// alongside.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeFrame {
    records: Vec<ChangeRecord>,
    index: HashMap<EntityKey, usize>,
}

impl ChangeFrame {
    /// create an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a change record and fold it into the frame.
    ///
    /// First registration of a key appends at the end; a later
    /// registration for the same key merges into the existing record in
    /// place, keeping the key's original position.
    pub fn register(
        &mut self,
        key: EntityKey,
        state: ChangeState,
        data: Option<DiffRow>,
    ) -> TrackResult<()> {
        let record = ChangeRecord::new(key, state, data)?;
        self.insert(record);
        Ok(())
    }

    /// Fold an already-built record into the frame (merge or append).
    pub fn insert(&mut self, record: ChangeRecord) {
        match self.index.get(record.key()) {
            Some(&pos) => self.records[pos].merge_with(record),
            None => {
                self.index.insert(record.key().clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    /// Collapse this frame into `target`, consuming it.
    ///
    /// Source records are visited in their frame order: same-key entries
    /// merge into target's existing record, new keys append after
    /// everything target already holds.
    pub fn merge_into(self, target: &mut ChangeFrame) {
        for record in self.records {
            target.insert(record);
        }
    }

    /// Snapshot the frame's records in order, without removing them.
    pub fn flatten(&self) -> Vec<ChangeRecord> {
        self.records.clone()
    }

    /// empty the frame
    pub fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
    }

    /// number of tracked records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// whether the frame tracks nothing
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// look up the record for a key
    pub fn get(&self, key: &EntityKey) -> Option<&ChangeRecord> {
        self.index.get(key).map(|&pos| &self.records[pos])
    }

    /// iterate records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.records.iter()
    }
}
