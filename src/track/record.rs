//! Change records and the merge algebra.
//!
//! A [`ChangeRecord`] is the net state of one tracked entity within one
//! scope. Records are born at capture time, mutated only through
//! [`ChangeRecord::merge_with`] when a nested scope collapses into its
//! parent, and destroyed either by rollback-discard of their owning frame
//! or by flatten-and-clear at the outermost commit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::row::{DiffRow, FieldSlot};
use crate::track::error::{TrackError, TrackResult};
use crate::track::types::EntityKey;

/// Net state of a tracked entity within a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeState {
    /// the entity did not exist before this scope
    Created,
    /// the entity existed and at least one field was written
    Changed,
    /// the entity no longer exists
    Removed,
}

impl fmt::Display for ChangeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeState::Created => write!(f, "created"),
            ChangeState::Changed => write!(f, "changed"),
            ChangeState::Removed => write!(f, "removed"),
        }
    }
}

/// One field-level difference: `(column, before, after)`.
///
/// `before` is `Unknown` when there is no genuine prior state (created
/// records, or a field whose origin was never captured).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    /// the physical column the field maps to
    pub column: String,
    /// value before the change, if ever known
    pub before: FieldSlot,
    /// value after the change
    pub after: FieldSlot,
}

/// One tracked entity's net state within a scope: key, state tag, owned
/// differential row.
///
/// Invariant: `Removed` never carries row data (the entity's field values
/// are no longer knowable); `Created`/`Changed` always carry one. The
/// constructor rejects violations, so every live record satisfies it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    key: EntityKey,
    state: ChangeState,
    data: Option<DiffRow>,
}

impl ChangeRecord {
    /// Build a record, enforcing the state/data invariant.
    pub fn new(key: EntityKey, state: ChangeState, data: Option<DiffRow>) -> TrackResult<Self> {
        match (state, &data) {
            (ChangeState::Removed, Some(_)) => Err(TrackError::RemovedWithData(key)),
            (ChangeState::Created | ChangeState::Changed, None) => {
                Err(TrackError::MissingData { key, state })
            }
            _ => Ok(Self { key, state, data }),
        }
    }

    /// the entity key
    pub fn key(&self) -> &EntityKey {
        &self.key
    }

    /// the net state tag
    pub fn state(&self) -> ChangeState {
        self.state
    }

    /// the differential row, absent for removed records
    pub fn data(&self) -> Option<&DiffRow> {
        self.data.as_ref()
    }

    /// Merge an incoming same-key record (from a nested scope collapsing
    /// into its parent) into this one.
    ///
    /// The algebra on `(existing.state, incoming.state)`:
    ///
    /// | existing | incoming | result                                     |
    /// |----------|----------|--------------------------------------------|
    /// | Removed  | Created  | Changed, incoming's data taken wholesale   |
    /// | Created  | Changed  | Created, overlays merged (incoming wins)   |
    /// | any other pair      | incoming's state, overlays merged          |
    ///
    /// A `Removed` result drops row data entirely. Callers must only merge
    /// matching keys; frames guarantee that by construction.
    pub fn merge_with(&mut self, incoming: ChangeRecord) {
        debug_assert_eq!(self.key, incoming.key, "merging records for different keys");

        match (self.state, incoming.state) {
            // Removed then re-created nets to Changed, not Created: the
            // entity existed before the scope, so from the outside this is
            // an update. The re-creation snapshot becomes the record's
            // data wholesale; the pre-removal origin is gone for good.
            (ChangeState::Removed, ChangeState::Created) => {
                self.state = ChangeState::Changed;
                self.data = incoming.data;
            }
            // A record this transaction itself created stays Created
            // through any number of later edits.
            (ChangeState::Created, ChangeState::Changed) => {
                self.absorb(incoming.data);
            }
            (_, state) => {
                self.state = state;
                if state == ChangeState::Removed {
                    self.data = None;
                } else {
                    self.absorb(incoming.data);
                }
            }
        }
    }

    /// Fold incoming row data into ours: merge overlays when both sides
    /// have data, adopt the incoming row when we have none.
    fn absorb(&mut self, incoming: Option<DiffRow>) {
        match (&mut self.data, incoming) {
            (Some(existing), Some(incoming)) => existing.merge_overlay(&incoming),
            (data @ None, Some(incoming)) => *data = Some(incoming),
            (_, None) => {}
        }
    }

    /// Compute the field-level differences for this record.
    ///
    /// Covers every schema field mapped to a physical column:
    /// - `Created`: `before` is absent; `after` is the effective current
    ///   value - the overlay where written, the creation snapshot
    ///   otherwise.
    /// - `Changed`/`Removed`: only fields with a known overlay slot are
    ///   emitted; `before` is the origin slot (possibly `Unknown`),
    ///   `after` the overlay slot. Removed records carry no data and
    ///   yield an empty list.
    ///
    /// Recomputed on each call; safe to invoke repeatedly.
    pub fn changed_values(&self) -> Vec<FieldChange> {
        let Some(data) = &self.data else {
            return Vec::new();
        };

        let mut changes = Vec::new();
        for (def, origin, overlay) in data.field_slots() {
            let Some(column) = def.column() else {
                continue;
            };
            match self.state {
                ChangeState::Created => {
                    // later writes win over the creation snapshot
                    let after = if overlay.is_known() { overlay } else { origin };
                    changes.push(FieldChange {
                        column: column.to_string(),
                        before: FieldSlot::Unknown,
                        after: after.clone(),
                    });
                }
                ChangeState::Changed | ChangeState::Removed => {
                    if overlay.is_known() {
                        changes.push(FieldChange {
                            column: column.to_string(),
                            before: origin.clone(),
                            after: overlay.clone(),
                        });
                    }
                }
            }
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{FieldDef, Schema};
    use serde_json::json;
    use std::sync::Arc;

    fn schema() -> Arc<Schema> {
        Arc::new(Schema::new(
            "orders",
            vec![
                FieldDef::persisted("status", "status"),
                FieldDef::persisted("total", "total"),
                FieldDef::transient("ui_hint"),
            ],
        ))
    }

    fn key(s: &str) -> EntityKey {
        EntityKey::new(s).unwrap()
    }

    fn created(k: &str, row: DiffRow) -> ChangeRecord {
        ChangeRecord::new(key(k), ChangeState::Created, Some(row)).unwrap()
    }

    fn changed(k: &str, row: DiffRow) -> ChangeRecord {
        ChangeRecord::new(key(k), ChangeState::Changed, Some(row)).unwrap()
    }

    fn removed(k: &str) -> ChangeRecord {
        ChangeRecord::new(key(k), ChangeState::Removed, None).unwrap()
    }

    #[test]
    fn test_new_rejects_removed_with_data() {
        let result = ChangeRecord::new(
            key("k1"),
            ChangeState::Removed,
            Some(DiffRow::empty(schema())),
        );
        assert!(matches!(result, Err(TrackError::RemovedWithData(_))));
    }

    #[test]
    fn test_new_rejects_missing_data() {
        for state in [ChangeState::Created, ChangeState::Changed] {
            let result = ChangeRecord::new(key("k1"), state, None);
            assert!(matches!(result, Err(TrackError::MissingData { .. })));
        }
    }

    #[test]
    fn test_merge_removed_then_created_nets_to_changed() {
        let schema = schema();
        let status = schema.field_id("status").unwrap();

        let mut record = removed("k1");
        let recreated = DiffRow::capture(
            Arc::clone(&schema),
            vec![FieldSlot::Value(json!("open"))],
        );
        record.merge_with(created("k1", recreated));

        assert_eq!(record.state(), ChangeState::Changed);
        let data = record.data().unwrap();
        assert_eq!(*data.origin_slot(status), FieldSlot::Value(json!("open")));
    }

    #[test]
    fn test_merge_created_then_changed_stays_created() {
        let schema = schema();
        let total = schema.field_id("total").unwrap();

        let mut record = created("k1", DiffRow::empty(Arc::clone(&schema)));

        let mut edit = DiffRow::empty(Arc::clone(&schema));
        edit.write(total, json!(42));
        record.merge_with(changed("k1", edit));

        assert_eq!(record.state(), ChangeState::Created);
        let data = record.data().unwrap();
        assert_eq!(*data.overlay_slot(total), FieldSlot::Value(json!(42)));
    }

    #[test]
    fn test_merge_changed_then_changed_incoming_wins_per_slot() {
        let schema = schema();
        let status = schema.field_id("status").unwrap();
        let total = schema.field_id("total").unwrap();

        let mut first = DiffRow::empty(Arc::clone(&schema));
        first.write(status, json!("open"));
        first.write(total, json!(10));
        let mut record = changed("k1", first);

        let mut second = DiffRow::empty(Arc::clone(&schema));
        second.write(total, json!(99));
        record.merge_with(changed("k1", second));

        assert_eq!(record.state(), ChangeState::Changed);
        let data = record.data().unwrap();
        assert_eq!(*data.overlay_slot(status), FieldSlot::Value(json!("open")));
        assert_eq!(*data.overlay_slot(total), FieldSlot::Value(json!(99)));
    }

    #[test]
    fn test_merge_into_removed_drops_data() {
        let mut record = created("k1", DiffRow::empty(schema()));
        record.merge_with(removed("k1"));

        assert_eq!(record.state(), ChangeState::Removed);
        assert!(record.data().is_none());
        assert!(record.changed_values().is_empty());
    }

    #[test]
    fn test_merge_removed_then_removed() {
        let mut record = removed("k1");
        record.merge_with(removed("k1"));
        assert_eq!(record.state(), ChangeState::Removed);
        assert!(record.data().is_none());
    }

    #[test]
    fn test_changed_values_for_created_covers_all_columns() {
        let schema = schema();
        let record = created(
            "k1",
            DiffRow::capture(
                Arc::clone(&schema),
                vec![FieldSlot::Value(json!("open")), FieldSlot::Null],
            ),
        );

        let changes = record.changed_values();
        // transient ui_hint is skipped
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].column, "status");
        assert_eq!(changes[0].before, FieldSlot::Unknown);
        assert_eq!(changes[0].after, FieldSlot::Value(json!("open")));
        assert_eq!(changes[1].column, "total");
        assert_eq!(changes[1].after, FieldSlot::Null);
    }

    #[test]
    fn test_changed_values_for_created_prefers_later_writes() {
        let schema = schema();
        let total = schema.field_id("total").unwrap();

        let mut row = DiffRow::capture(
            Arc::clone(&schema),
            vec![FieldSlot::Value(json!("open")), FieldSlot::Value(json!(1))],
        );
        row.write(total, json!(5));
        let record = created("k1", row);

        let changes = record.changed_values();
        let total_change = changes.iter().find(|c| c.column == "total").unwrap();
        assert_eq!(total_change.before, FieldSlot::Unknown);
        assert_eq!(total_change.after, FieldSlot::Value(json!(5)));
    }

    #[test]
    fn test_changed_values_for_changed_emits_written_fields_only() {
        let schema = schema();
        let total = schema.field_id("total").unwrap();

        let mut row = DiffRow::capture(
            Arc::clone(&schema),
            vec![FieldSlot::Value(json!("open")), FieldSlot::Value(json!(10))],
        );
        row.write(total, json!(25));
        let record = changed("k1", row);

        let changes = record.changed_values();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].column, "total");
        assert_eq!(changes[0].before, FieldSlot::Value(json!(10)));
        assert_eq!(changes[0].after, FieldSlot::Value(json!(25)));
    }

    #[test]
    fn test_changed_values_is_idempotent() {
        let schema = schema();
        let status = schema.field_id("status").unwrap();

        let mut row = DiffRow::empty(Arc::clone(&schema));
        row.write(status, json!("closed"));
        let record = changed("k1", row);

        let first = record.changed_values();
        let second = record.changed_values();
        assert_eq!(first, second);
    }
}
