//! Constraint validation logic.
//!
//! The ValidationEngine checks an entity against its type's declared
//! constraints before the persistence layer commits it.

use std::sync::Arc;

use crate::catalog::{FieldConstraintSet, FieldValue, MetadataRegistry};
use crate::entity::Entity;
use crate::error::{Error, Result, ValidationError};

/// Validation engine for enforcing declared field constraints.
///
/// Checks run in a fixed order and stop at the first violation: every
/// not-null rule in declaration order, then every length rule in declaration
/// order, then the type's own deep checks. String lengths are counted in
/// UTF-16 code units, so characters outside the BMP count twice.
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    registry: Arc<MetadataRegistry>,
}

impl ValidationEngine {
    /// Create a validation engine backed by the given registry.
    pub fn new(registry: Arc<MetadataRegistry>) -> Self {
        Self { registry }
    }

    /// The registry holding cached constraint sets.
    pub fn registry(&self) -> &Arc<MetadataRegistry> {
        &self.registry
    }

    /// Validate an entity, including its type-specific deep checks.
    pub fn validate<E: Entity>(&self, entity: &E) -> Result<()> {
        self.validate_with(entity, true)
    }

    /// Validate an entity, optionally skipping the deep checks.
    pub fn validate_with<E: Entity>(&self, entity: &E, deep: bool) -> Result<()> {
        tracing::trace!(entity = %entity.describe(), deep, "checking validity");

        let result = self
            .registry
            .constraints_for::<E>()
            .and_then(|constraints| check_constraints(&constraints, entity))
            .and_then(|()| {
                if deep {
                    entity.validate_deep()
                } else {
                    Ok(())
                }
            });

        if let Err(Error::Internal(msg)) = &result {
            tracing::error!(entity = E::NAME, error = %msg, "internal error while validating");
        }
        result
    }
}

/// Check an entity against a constraint set.
fn check_constraints<E>(constraints: &FieldConstraintSet<E>, entity: &E) -> Result<()> {
    let name = constraints.entity();

    for field in constraints.required() {
        if field.read(entity).is_null() {
            return Err(ValidationError::NullField {
                entity: name,
                field: field.name,
            }
            .into());
        }
    }

    for (field, max_length) in constraints.string_fields() {
        match field.read(entity) {
            FieldValue::Null => {}
            FieldValue::Str(value) => {
                if value.encode_utf16().count() > *max_length {
                    return Err(ValidationError::TooLong {
                        entity: name,
                        field: field.name,
                        max_length: *max_length,
                    }
                    .into());
                }
            }
            other => {
                return Err(Error::internal(format!(
                    "{}: accessor for {} returned a {} value for a length-limited field",
                    name,
                    field.name,
                    other.kind()
                )));
            }
        }
    }

    Ok(())
}
