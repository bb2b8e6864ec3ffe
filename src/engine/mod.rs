//! Engine layer - lifecycle control and capture.
//!
//! This module wires the buffering structures of `track` to the outside
//! world. The persistence pipeline pushes [`FlushBatch`]es in; the
//! transaction manager drives open/commit/rollback; an outermost commit
//! produces a [`Changeset`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TrackerRegistry                        │
//! │       (maps unit ids to trackers, one lock per unit)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       ChangeTracker                         │
//! │   (lifecycle controller + capture hook, one per unit)       │
//! └─────────────────────────────────────────────────────────────┘
//!        ▲                                          │
//!        │ on_flush(FlushBatch)                     │ Changeset
//!        │ on_open / on_commit / on_rollback        ▼
//!  persistence pipeline,                     ChangeListener /
//!  transaction manager                       on_commit caller
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use difftrack::engine::{ChangeTracker, FlushBatch};
//!
//! let mut tracker = ChangeTracker::new();
//!
//! tracker.on_open();
//! tracker.on_flush(&batch)?;
//! tracker.on_open();           // nested scope
//! tracker.on_flush(&batch2)?;
//! tracker.on_commit(true);     // folds into the outer scope, no emission
//!
//! if let Some(changeset) = tracker.on_commit(false) {
//!     for record in changeset.iter() {
//!         println!("{}: {}", record.key(), record.state());
//!     }
//! }
//! ```

mod changeset;
mod error;
mod flush;
mod listener;
mod registry;
mod tracker;

pub use changeset::Changeset;
pub use error::{EngineError, EngineResult};
pub use flush::FlushBatch;
pub use listener::ChangeListener;
pub use registry::{TrackerRegistry, UnitId};
pub use tracker::ChangeTracker;
