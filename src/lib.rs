//! difftrack - A Nested-Transaction Change-Tracking Engine
//!
//! This crate buffers record-level changes per transaction scope, merges
//! them correctly across nested sub-transactions, and emits a flattened,
//! ordered changeset with field-level before/after values when the
//! outermost transaction commits. Rolled-back scopes leave zero trace in
//! their enclosing scope.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use difftrack::engine::{ChangeTracker, FlushBatch};
//! use difftrack::row::{DiffRow, FieldDef, FieldSlot, Schema};
//! use difftrack::track::EntityKey;
//! use serde_json::json;
//!
//! let schema = Arc::new(Schema::new(
//!     "users",
//!     vec![FieldDef::persisted("name", "name")],
//! ));
//!
//! let mut tracker = ChangeTracker::new();
//! tracker.on_open();
//!
//! let row = DiffRow::capture(
//!     Arc::clone(&schema),
//!     vec![FieldSlot::Value(json!("Alice"))],
//! );
//! let mut batch = FlushBatch::new();
//! batch.push_created(EntityKey::new("user1").unwrap(), row);
//! tracker.on_flush(&batch).unwrap();
//!
//! let changeset = tracker.on_commit(false).unwrap();
//! assert_eq!(changeset.len(), 1);
//! ```

pub mod engine;
pub mod row;
pub mod track;
