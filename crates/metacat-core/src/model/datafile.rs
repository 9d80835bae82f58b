//! Datafiles: individual files registered in a dataset.

use chrono::{DateTime, Utc};

use crate::catalog::{EntitySchema, FieldDef, FieldValue};
use crate::entity::{Entity, EntityBase, EntityId};
use crate::error::{Result, ValidationError};

use super::{DESCRIPTION_MAX_LENGTH, NAME_MAX_LENGTH};

/// A single file and where to find it.
#[derive(Debug, Clone, Default)]
pub struct Datafile {
    /// Identity and attribution.
    pub base: EntityBase,
    /// Owning dataset.
    pub dataset: Option<EntityId>,
    /// File name.
    pub name: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Storage location, usually a path or URL.
    pub location: Option<String>,
    /// Checksum recorded at ingest.
    pub checksum: Option<String>,
    /// Size in bytes.
    pub file_size: Option<i64>,
    /// Last modification of the file itself, not of the catalog record.
    pub datafile_modified_at: Option<DateTime<Utc>>,
}

impl Datafile {
    /// Create a datafile inside a dataset.
    pub fn new(dataset: EntityId, name: impl Into<String>) -> Self {
        Self {
            dataset: Some(dataset),
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

impl Entity for Datafile {
    const NAME: &'static str = "Datafile";

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }

    fn schema() -> EntitySchema<Self> {
        EntitySchema::new()
            .with_field(FieldDef::new("dataset", |d: &Datafile| FieldValue::from(d.dataset)))
            .with_field(
                FieldDef::new("name", |d: &Datafile| FieldValue::from(&d.name))
                    .with_max_length(NAME_MAX_LENGTH),
            )
            .with_field(
                FieldDef::optional("description", |d: &Datafile| FieldValue::from(&d.description))
                    .with_max_length(DESCRIPTION_MAX_LENGTH),
            )
            .with_field(
                FieldDef::optional("location", |d: &Datafile| FieldValue::from(&d.location))
                    .with_max_length(DESCRIPTION_MAX_LENGTH),
            )
            .with_field(
                FieldDef::optional("checksum", |d: &Datafile| FieldValue::from(&d.checksum))
                    .with_max_length(NAME_MAX_LENGTH),
            )
            .with_field(FieldDef::optional("fileSize", |d: &Datafile| FieldValue::from(d.file_size)))
            .with_field(FieldDef::optional("datafileModTime", |d: &Datafile| {
                FieldValue::from(d.datafile_modified_at)
            }))
    }

    fn validate_deep(&self) -> Result<()> {
        match self.file_size {
            Some(size) if size < 0 => Err(ValidationError::Rule {
                entity: Self::NAME,
                field: "fileSize",
                reason: "cannot be negative".into(),
            }
            .into()),
            _ => Ok(()),
        }
    }
}
