//! tri-state field slots.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The state of a single field in a row layer.
///
/// A slot is deliberately three-valued: "we never learned this field"
/// (`Unknown`) is distinct from "we know it holds NULL" (`Null`). Overlay
/// merges rely on that distinction - an `Unknown` slot never overrides a
/// known one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum FieldSlot {
    /// no value has been captured or written for this field
    #[default]
    Unknown,
    /// the field is known to hold NULL
    Null,
    /// the field is known to hold a concrete value
    Value(Value),
}

impl FieldSlot {
    /// whether this slot carries knowledge (NULL counts as knowledge)
    pub fn is_known(&self) -> bool {
        !matches!(self, FieldSlot::Unknown)
    }

    /// get the concrete value, if this slot holds one
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            FieldSlot::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Overwrite this slot with `incoming` if the incoming slot is known.
    ///
    /// The merge direction matters: `incoming` is the more recent layer,
    /// so its knowledge wins, but its ignorance never erases ours.
    pub fn merge_from(&mut self, incoming: &FieldSlot) {
        if incoming.is_known() {
            *self = incoming.clone();
        }
    }
}

impl fmt::Display for FieldSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSlot::Unknown => write!(f, "<unknown>"),
            FieldSlot::Null => write!(f, "NULL"),
            FieldSlot::Value(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_states() {
        assert!(!FieldSlot::Unknown.is_known());
        assert!(FieldSlot::Null.is_known());
        assert!(FieldSlot::Value(json!(5)).is_known());
    }

    #[test]
    fn test_merge_known_wins() {
        let mut slot = FieldSlot::Value(json!("old"));
        slot.merge_from(&FieldSlot::Value(json!("new")));
        assert_eq!(slot, FieldSlot::Value(json!("new")));

        let mut slot = FieldSlot::Value(json!("old"));
        slot.merge_from(&FieldSlot::Null);
        assert_eq!(slot, FieldSlot::Null);
    }

    #[test]
    fn test_merge_unknown_never_overrides() {
        let mut slot = FieldSlot::Value(json!("kept"));
        slot.merge_from(&FieldSlot::Unknown);
        assert_eq!(slot, FieldSlot::Value(json!("kept")));

        let mut slot = FieldSlot::Unknown;
        slot.merge_from(&FieldSlot::Unknown);
        assert_eq!(slot, FieldSlot::Unknown);
    }
}
