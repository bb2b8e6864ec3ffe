//! Inbound flush payloads from the persistence pipeline.

use crate::row::DiffRow;
use crate::track::EntityKey;

/// The three raw change buckets supplied at flush time.
///
/// The pipeline owns the batch and its rows; the capture hook borrows the
/// batch for the duration of the call and clones anything it retains, so
/// the pipeline is free to reuse its buffers afterwards. Removed entries
/// carry no row - the entity's field values are no longer knowable.
#[derive(Debug, Clone, Default)]
pub struct FlushBatch {
    created: Vec<(EntityKey, DiffRow)>,
    modified: Vec<(EntityKey, DiffRow)>,
    removed: Vec<EntityKey>,
}

impl FlushBatch {
    /// an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// add a newly created record
    pub fn push_created(&mut self, key: EntityKey, row: DiffRow) {
        self.created.push((key, row));
    }

    /// add a modified record
    pub fn push_modified(&mut self, key: EntityKey, row: DiffRow) {
        self.modified.push((key, row));
    }

    /// add a removed record
    pub fn push_removed(&mut self, key: EntityKey) {
        self.removed.push(key);
    }

    /// the created bucket
    pub fn created(&self) -> &[(EntityKey, DiffRow)] {
        &self.created
    }

    /// the modified bucket
    pub fn modified(&self) -> &[(EntityKey, DiffRow)] {
        &self.modified
    }

    /// the removed bucket
    pub fn removed(&self) -> &[EntityKey] {
        &self.removed
    }

    /// whether all three buckets are empty
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }

    /// total number of entries across the buckets
    pub fn len(&self) -> usize {
        self.created.len() + self.modified.len() + self.removed.len()
    }
}
