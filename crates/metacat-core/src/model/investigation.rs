//! Investigations: the top of the catalog hierarchy.

use chrono::{DateTime, Utc};

use crate::catalog::{EntitySchema, FieldDef, FieldValue};
use crate::entity::{Entity, EntityBase, EntityId};
use crate::error::{Result, ValidationError};

use super::{DESCRIPTION_MAX_LENGTH, NAME_MAX_LENGTH};

/// An experiment or proposal carried out at a facility.
#[derive(Debug, Clone, Default)]
pub struct Investigation {
    /// Identity and attribution.
    pub base: EntityBase,
    /// Facility hosting the investigation.
    pub facility: Option<EntityId>,
    /// Proposal or experiment name.
    pub name: Option<String>,
    /// Visit identifier within the proposal.
    pub visit_id: Option<String>,
    /// Human-readable title.
    pub title: Option<String>,
    /// Abstract.
    pub summary: Option<String>,
    /// Digital object identifier.
    pub doi: Option<String>,
    /// Start of the investigation.
    pub start_date: Option<DateTime<Utc>>,
    /// End of the investigation. Must not precede the start.
    pub end_date: Option<DateTime<Utc>>,
}

impl Investigation {
    /// Create an investigation with its identifying fields.
    pub fn new(
        facility: EntityId,
        name: impl Into<String>,
        visit_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            facility: Some(facility),
            name: Some(name.into()),
            visit_id: Some(visit_id.into()),
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

impl Entity for Investigation {
    const NAME: &'static str = "Investigation";

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }

    fn schema() -> EntitySchema<Self> {
        EntitySchema::new()
            .with_field(FieldDef::new("facility", |i: &Investigation| FieldValue::from(i.facility)))
            .with_field(
                FieldDef::new("name", |i: &Investigation| FieldValue::from(&i.name))
                    .with_max_length(NAME_MAX_LENGTH),
            )
            .with_field(
                FieldDef::new("visitId", |i: &Investigation| FieldValue::from(&i.visit_id))
                    .with_max_length(NAME_MAX_LENGTH),
            )
            .with_field(
                FieldDef::new("title", |i: &Investigation| FieldValue::from(&i.title))
                    .with_max_length(NAME_MAX_LENGTH),
            )
            .with_field(
                FieldDef::optional("summary", |i: &Investigation| FieldValue::from(&i.summary))
                    .with_max_length(DESCRIPTION_MAX_LENGTH),
            )
            .with_field(
                FieldDef::optional("doi", |i: &Investigation| FieldValue::from(&i.doi))
                    .with_max_length(NAME_MAX_LENGTH),
            )
            .with_field(FieldDef::optional("startDate", |i: &Investigation| FieldValue::from(i.start_date)))
            .with_field(FieldDef::optional("endDate", |i: &Investigation| FieldValue::from(i.end_date)))
    }

    fn validate_deep(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ValidationError::Rule {
                    entity: Self::NAME,
                    field: "endDate",
                    reason: "cannot be before startDate".into(),
                }
                .into());
            }
        }
        Ok(())
    }
}
