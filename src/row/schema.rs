//! row schemas and field handles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Definition of a single schema field.
///
/// A field may or may not be backed by a physical column. Computed and
/// transient fields have no column and are skipped by field-diff emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    name: String,
    column: Option<String>,
}

impl FieldDef {
    /// a field backed by a physical column
    pub fn persisted(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: Some(column.into()),
        }
    }

    /// a field with no physical column (computed, transient)
    pub fn transient(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: None,
        }
    }

    /// the field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// the physical column name, if the field is persisted
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }
}

/// Handle to a field within its schema.
///
/// Only obtainable through [`Schema::field_id`], so an id always indexes a
/// real field of the schema that issued it. Rows index their layers with it
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(pub(crate) usize);

/// A named, ordered, immutable collection of field definitions.
///
/// Schemas are built once and shared via `Arc`; a row holds a reference to
/// the schema it was captured against for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    name: String,
    fields: Vec<FieldDef>,
}

impl Schema {
    /// create a new schema from an ordered field list
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// the schema name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// look up a field handle by name
    pub fn field_id(&self, name: &str) -> Option<FieldId> {
        self.fields.iter().position(|f| f.name() == name).map(FieldId)
    }

    /// the definition behind a handle
    pub fn field(&self, id: FieldId) -> &FieldDef {
        &self.fields[id.0]
    }

    /// number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// whether the schema has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// iterate the field definitions in schema order
    pub fn iter(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({} fields)", self.name, self.fields.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_schema() -> Schema {
        Schema::new(
            "users",
            vec![
                FieldDef::persisted("name", "name"),
                FieldDef::persisted("email", "email_address"),
                FieldDef::transient("display_label"),
            ],
        )
    }

    #[test]
    fn test_field_lookup() {
        let schema = user_schema();
        let name = schema.field_id("name").unwrap();
        let email = schema.field_id("email").unwrap();
        assert_ne!(name, email);
        assert_eq!(schema.field(email).column(), Some("email_address"));
        assert!(schema.field_id("missing").is_none());
    }

    #[test]
    fn test_transient_fields_have_no_column() {
        let schema = user_schema();
        let label = schema.field_id("display_label").unwrap();
        assert_eq!(schema.field(label).column(), None);
    }

    #[test]
    fn test_field_order_is_definition_order() {
        let schema = user_schema();
        let names: Vec<&str> = schema.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["name", "email", "display_label"]);
    }
}
