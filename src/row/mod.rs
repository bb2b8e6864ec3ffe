//! differential row layer
//!
//! this module provides the row representation the tracking engine buffers:
//! a fixed-schema row with two logical layers. The *origin* layer is the
//! snapshot captured when the row entered tracking; the *overlay* layer is
//! a sparse record of fields explicitly written since. Every slot in either
//! layer is tri-stated: not-yet-known, known-NULL, or a known value.
//!
//! Upper layers (change records, frames) never inspect raw buffers; they
//! go through [`DiffRow`] and the [`FieldId`] handles its [`Schema`] hands
//! out.

mod diff;
mod schema;
mod slot;

pub use diff::DiffRow;
pub use schema::{FieldDef, FieldId, Schema};
pub use slot::FieldSlot;
