//! the differential row itself.

use std::sync::Arc;

use serde_json::Value;

use crate::row::schema::{FieldDef, FieldId, Schema};
use crate::row::slot::FieldSlot;

/// A schema-indexed row with an origin snapshot and a write overlay.
///
/// The origin layer is fixed at capture time. The overlay records only
/// fields explicitly written afterwards; untouched fields stay `Unknown`
/// there. Cloning is a deep copy - a change record always clones the row it
/// retains, so the capture source is free to reuse its buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffRow {
    schema: Arc<Schema>,
    origin: Vec<FieldSlot>,
    overlay: Vec<FieldSlot>,
}

impl DiffRow {
    /// Capture a row from an origin snapshot.
    ///
    /// The snapshot is padded with `Unknown` (or truncated) to the schema's
    /// field count, so the layers always index cleanly by [`FieldId`].
    pub fn capture(schema: Arc<Schema>, mut origin: Vec<FieldSlot>) -> Self {
        origin.resize(schema.len(), FieldSlot::Unknown);
        let overlay = vec![FieldSlot::Unknown; schema.len()];
        Self {
            schema,
            origin,
            overlay,
        }
    }

    /// capture a row with a fully unknown origin
    pub fn empty(schema: Arc<Schema>) -> Self {
        Self::capture(schema, Vec::new())
    }

    /// the schema this row was captured against
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// write a concrete value into the overlay
    pub fn write(&mut self, field: FieldId, value: Value) {
        self.overlay[field.0] = FieldSlot::Value(value);
    }

    /// write a known NULL into the overlay
    pub fn write_null(&mut self, field: FieldId) {
        self.overlay[field.0] = FieldSlot::Null;
    }

    /// the origin-layer slot for a field
    pub fn origin_slot(&self, field: FieldId) -> &FieldSlot {
        &self.origin[field.0]
    }

    /// the overlay slot for a field
    pub fn overlay_slot(&self, field: FieldId) -> &FieldSlot {
        &self.overlay[field.0]
    }

    /// whether any field has been written since capture
    pub fn is_dirty(&self) -> bool {
        self.overlay.iter().any(FieldSlot::is_known)
    }

    /// Merge another row's overlay into this one, slot by slot.
    ///
    /// `incoming` is the more recent layer: its known slots win, its
    /// `Unknown` slots leave ours untouched. The origin layer is not
    /// affected - the earliest captured snapshot stays authoritative.
    /// Both rows must have been captured against the same schema; mixing
    /// schemas is a caller error, like merging records for different keys.
    pub fn merge_overlay(&mut self, incoming: &DiffRow) {
        debug_assert_eq!(
            self.schema, incoming.schema,
            "overlay merge across schemas"
        );
        for (slot, inc) in self.overlay.iter_mut().zip(&incoming.overlay) {
            slot.merge_from(inc);
        }
    }

    /// Iterate `(definition, origin slot, overlay slot)` in schema order.
    pub fn field_slots(&self) -> impl Iterator<Item = (&FieldDef, &FieldSlot, &FieldSlot)> {
        self.schema
            .iter()
            .zip(&self.origin)
            .zip(&self.overlay)
            .map(|((def, origin), overlay)| (def, origin, overlay))
    }
}
