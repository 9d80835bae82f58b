//! Constraint metadata for catalog entity types.
//!
//! Each entity type declares its fields once in a static table. The registry
//! turns that table into a [`FieldConstraintSet`] the first time it is needed
//! and shares it for the rest of the process.

mod field;
mod registry;
mod schema;

pub use field::{Accessor, FieldDef, FieldValue};
pub use registry::MetadataRegistry;
pub use schema::{EntitySchema, FieldConstraintSet, ATTRIBUTION_NAME_MAX_LENGTH};
