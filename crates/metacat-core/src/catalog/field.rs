//! Field definitions for entities.

use chrono::{DateTime, Utc};

use crate::entity::EntityId;

/// Current value of an entity field, borrowed from the instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// No value.
    Null,
    /// String value.
    Str(&'a str),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Point in time.
    Timestamp(DateTime<Utc>),
    /// Reference to another entity.
    Ref(EntityId),
}

impl FieldValue<'_> {
    /// Check if the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Name of the value's kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Str(_) => "string",
            FieldValue::Int(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Ref(_) => "reference",
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Str(value)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        FieldValue::Str(value)
    }
}

impl<'a> From<&'a Option<String>> for FieldValue<'a> {
    fn from(value: &'a Option<String>) -> Self {
        value.as_deref().map_or(FieldValue::Null, FieldValue::Str)
    }
}

impl<'a> From<Option<&'a str>> for FieldValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Str)
    }
}

impl From<Option<i64>> for FieldValue<'_> {
    fn from(value: Option<i64>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Int)
    }
}

impl From<Option<f64>> for FieldValue<'_> {
    fn from(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Float)
    }
}

impl From<Option<bool>> for FieldValue<'_> {
    fn from(value: Option<bool>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Bool)
    }
}

impl From<Option<DateTime<Utc>>> for FieldValue<'_> {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Timestamp)
    }
}

impl From<Option<EntityId>> for FieldValue<'_> {
    fn from(value: Option<EntityId>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Ref)
    }
}

/// Reads one field from an entity instance.
pub type Accessor<E> = for<'a> fn(&'a E) -> FieldValue<'a>;

/// A field definition within an entity type's declaration table.
pub struct FieldDef<E> {
    /// Field name as exposed by the catalog.
    pub name: &'static str,
    /// Whether the field must hold a value when validated.
    pub required: bool,
    /// Maximum length in UTF-16 code units, for string fields.
    pub max_length: Option<usize>,
    accessor: Accessor<E>,
}

impl<E> FieldDef<E> {
    /// Create a new required field.
    pub fn new(name: &'static str, accessor: Accessor<E>) -> Self {
        Self {
            name,
            required: true,
            max_length: None,
            accessor,
        }
    }

    /// Create an optional field (required = false).
    pub fn optional(name: &'static str, accessor: Accessor<E>) -> Self {
        Self {
            name,
            required: false,
            max_length: None,
            accessor,
        }
    }

    /// Limit the length of a string field.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Read this field's current value from an instance.
    pub fn read<'a>(&self, entity: &'a E) -> FieldValue<'a> {
        (self.accessor)(entity)
    }

    /// Check if this field carries any constraint.
    pub fn is_constrained(&self) -> bool {
        self.required || self.max_length.is_some()
    }
}

impl<E> Clone for FieldDef<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            required: self.required,
            max_length: self.max_length,
            accessor: self.accessor,
        }
    }
}

impl<E> std::fmt::Debug for FieldDef<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("required", &self.required)
            .field("max_length", &self.max_length)
            .finish_non_exhaustive()
    }
}
