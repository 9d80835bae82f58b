//! Datasets group the files produced within an investigation.

use crate::catalog::{EntitySchema, FieldDef, FieldValue};
use crate::entity::{Entity, EntityBase, EntityId};

use super::{DESCRIPTION_MAX_LENGTH, NAME_MAX_LENGTH};

/// A collection of datafiles.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Identity and attribution.
    pub base: EntityBase,
    /// Owning investigation.
    pub investigation: Option<EntityId>,
    /// Sample the data was collected from, if any.
    pub sample: Option<EntityId>,
    /// Dataset name, unique within the investigation.
    pub name: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Storage location of the dataset as a whole.
    pub location: Option<String>,
    /// Digital object identifier.
    pub doi: Option<String>,
    /// Whether no more files will be added.
    pub complete: Option<bool>,
}

impl Dataset {
    /// Create a dataset inside an investigation.
    pub fn new(investigation: EntityId, name: impl Into<String>) -> Self {
        Self {
            investigation: Some(investigation),
            name: Some(name.into()),
            complete: Some(false),
            ..Default::default()
        }
    }
}

impl Entity for Dataset {
    const NAME: &'static str = "Dataset";

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }

    fn schema() -> EntitySchema<Self> {
        EntitySchema::new()
            .with_field(FieldDef::new("investigation", |d: &Dataset| FieldValue::from(d.investigation)))
            .with_field(
                FieldDef::new("name", |d: &Dataset| FieldValue::from(&d.name))
                    .with_max_length(NAME_MAX_LENGTH),
            )
            .with_field(FieldDef::new("complete", |d: &Dataset| FieldValue::from(d.complete)))
            .with_field(FieldDef::optional("sample", |d: &Dataset| FieldValue::from(d.sample)))
            .with_field(
                FieldDef::optional("description", |d: &Dataset| FieldValue::from(&d.description))
                    .with_max_length(DESCRIPTION_MAX_LENGTH),
            )
            .with_field(
                FieldDef::optional("location", |d: &Dataset| FieldValue::from(&d.location))
                    .with_max_length(DESCRIPTION_MAX_LENGTH),
            )
            .with_field(
                FieldDef::optional("doi", |d: &Dataset| FieldValue::from(&d.doi))
                    .with_max_length(NAME_MAX_LENGTH),
            )
    }
}
