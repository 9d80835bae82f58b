//! Per-type declaration tables and the constraint sets built from them.

use std::collections::HashSet;

use super::field::{FieldDef, FieldValue};
use crate::entity::Entity;
use crate::error::{Error, Result};

/// Maximum length of the user names recorded in attribution fields.
pub const ATTRIBUTION_NAME_MAX_LENGTH: usize = 255;

/// Declaration table for an entity type.
///
/// Lists the type's own fields in declaration order. The attribution fields
/// every entity carries are appended when the table is built.
pub struct EntitySchema<E> {
    fields: Vec<FieldDef<E>>,
}

impl<E: Entity> EntitySchema<E> {
    /// Create an empty declaration table.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field to the table.
    pub fn with_field(mut self, field: FieldDef<E>) -> Self {
        self.fields.push(field);
        self
    }

    /// Fields declared by the type itself.
    pub fn fields(&self) -> &[FieldDef<E>] {
        &self.fields
    }

    /// Get a declared field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef<E>> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Build the constraint set, checking the table for declaration errors.
    pub fn build(self) -> Result<FieldConstraintSet<E>> {
        let mut fields = self.fields;
        fields.extend(attribution_fields::<E>());

        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if field.name.is_empty() {
                return Err(Error::internal(format!(
                    "{}: field declared without a name",
                    E::NAME
                )));
            }
            if !seen.insert(field.name) {
                return Err(Error::internal(format!(
                    "{}: field {} declared more than once",
                    E::NAME,
                    field.name
                )));
            }
            if field.max_length == Some(0) {
                return Err(Error::internal(format!(
                    "{}: field {} declares a maximum length of zero",
                    E::NAME,
                    field.name
                )));
            }
        }

        let required = fields.iter().filter(|f| f.required).cloned().collect();
        let string_fields = fields
            .iter()
            .filter_map(|f| f.max_length.map(|max| (f.clone(), max)))
            .collect();

        Ok(FieldConstraintSet {
            entity: E::NAME,
            required,
            string_fields,
        })
    }
}

impl<E: Entity> Default for EntitySchema<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Attribution fields shared by every entity type.
fn attribution_fields<E: Entity>() -> Vec<FieldDef<E>> {
    vec![
        FieldDef::new("createId", |e: &E| FieldValue::from(e.base().created_by()))
            .with_max_length(ATTRIBUTION_NAME_MAX_LENGTH),
        FieldDef::new("createTime", |e: &E| FieldValue::from(e.base().created_at())),
        FieldDef::new("modId", |e: &E| FieldValue::from(e.base().modified_by()))
            .with_max_length(ATTRIBUTION_NAME_MAX_LENGTH),
        FieldDef::new("modTime", |e: &E| FieldValue::from(e.base().modified_at())),
    ]
}

/// Constraints of one entity type, in evaluation order.
///
/// Immutable once built.
pub struct FieldConstraintSet<E> {
    entity: &'static str,
    required: Vec<FieldDef<E>>,
    string_fields: Vec<(FieldDef<E>, usize)>,
}

impl<E> FieldConstraintSet<E> {
    /// Entity type name.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Fields that must not be null, in declaration order.
    pub fn required(&self) -> &[FieldDef<E>] {
        &self.required
    }

    /// String fields with their maximum length, in declaration order.
    pub fn string_fields(&self) -> &[(FieldDef<E>, usize)] {
        &self.string_fields
    }

    /// Names of the required fields.
    pub fn required_names(&self) -> Vec<&'static str> {
        self.required.iter().map(|f| f.name).collect()
    }

    /// Names and limits of the length-constrained fields.
    pub fn length_limits(&self) -> Vec<(&'static str, usize)> {
        self.string_fields
            .iter()
            .map(|(f, max)| (f.name, *max))
            .collect()
    }
}

impl<E> std::fmt::Debug for FieldConstraintSet<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldConstraintSet")
            .field("entity", &self.entity)
            .field("required", &self.required_names())
            .field("string_fields", &self.length_limits())
            .finish()
    }
}
