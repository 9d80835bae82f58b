//! Samples measured during an investigation.

use crate::catalog::{EntitySchema, FieldDef, FieldValue};
use crate::entity::{Entity, EntityBase, EntityId};

use super::{DESCRIPTION_MAX_LENGTH, NAME_MAX_LENGTH};

/// A physical sample.
#[derive(Debug, Clone, Default)]
pub struct Sample {
    /// Identity and attribution.
    pub base: EntityBase,
    /// Sample name.
    pub name: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Persistent identifier.
    pub pid: Option<String>,
    /// Investigation the sample belongs to.
    pub investigation: Option<EntityId>,
}

impl Sample {
    /// Create a sample belonging to an investigation.
    pub fn new(investigation: EntityId, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            investigation: Some(investigation),
            ..Default::default()
        }
    }
}

impl Entity for Sample {
    const NAME: &'static str = "Sample";

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }

    fn schema() -> EntitySchema<Self> {
        EntitySchema::new()
            .with_field(
                FieldDef::new("name", |s: &Sample| FieldValue::from(&s.name))
                    .with_max_length(NAME_MAX_LENGTH),
            )
            .with_field(
                FieldDef::optional("description", |s: &Sample| FieldValue::from(&s.description))
                    .with_max_length(DESCRIPTION_MAX_LENGTH),
            )
            .with_field(
                FieldDef::optional("pid", |s: &Sample| FieldValue::from(&s.pid))
                    .with_max_length(NAME_MAX_LENGTH),
            )
            .with_field(FieldDef::new("investigation", |s: &Sample| FieldValue::from(s.investigation)))
    }
}
