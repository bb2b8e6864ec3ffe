//! change tracking structures
//!
//! This module holds the buffering side of the engine: what changed, per
//! transaction-nesting level. One [`ChangeRecord`] is the net state of one
//! entity within one scope; records live in an insertion-ordered
//! [`ChangeFrame`], one frame per nesting level; frames live on a
//! [`ChangeStack`] mirroring transaction nesting.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        ChangeStack                          │
//! │        (LIFO of frames, depth = 1 + nesting level)          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        ChangeFrame                          │
//! │         (insertion-ordered key → ChangeRecord map)          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        ChangeRecord                         │
//! │            (key, Created/Changed/Removed, DiffRow)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lifecycle rules - when frames are pushed, merged down, flattened or
//! discarded - live in the `engine` module; this module only knows how to
//! store and combine changes.

mod error;
mod frame;
mod record;
mod stack;
mod types;

pub use error::{TrackError, TrackResult};
pub use frame::ChangeFrame;
pub use record::{ChangeRecord, ChangeState, FieldChange};
pub use stack::ChangeStack;
pub use types::{EntityKey, InvalidKeyError};
