//! The contract every persisted catalog record honors.

mod base;

pub use base::{EntityBase, EntityId};

use crate::catalog::EntitySchema;
use crate::error::Result;

/// A persisted catalog record.
///
/// Implementors embed an [`EntityBase`] and declare their constraints once in
/// [`Entity::schema`]. The validation engine enforces them generically.
///
/// # Example
///
/// ```
/// use metacat_core::catalog::{EntitySchema, FieldDef, FieldValue};
/// use metacat_core::entity::{Entity, EntityBase};
///
/// struct Instrument {
///     base: EntityBase,
///     name: Option<String>,
/// }
///
/// impl Entity for Instrument {
///     const NAME: &'static str = "Instrument";
///
///     fn base(&self) -> &EntityBase {
///         &self.base
///     }
///
///     fn base_mut(&mut self) -> &mut EntityBase {
///         &mut self.base
///     }
///
///     fn schema() -> EntitySchema<Self> {
///         EntitySchema::new().with_field(
///             FieldDef::new("name", |i: &Instrument| FieldValue::from(&i.name)).with_max_length(255),
///         )
///     }
/// }
/// ```
pub trait Entity: Send + Sync + 'static {
    /// Concrete type name used in error messages and audit payloads.
    const NAME: &'static str;

    /// Shared identity and attribution.
    fn base(&self) -> &EntityBase;

    /// Mutable access to identity and attribution.
    fn base_mut(&mut self) -> &mut EntityBase;

    /// Static declaration of this type's fields and constraints.
    fn schema() -> EntitySchema<Self>
    where
        Self: Sized;

    /// Type-specific checks run after the declared constraints pass.
    fn validate_deep(&self) -> Result<()> {
        Ok(())
    }

    /// Short reference such as `Sample:42`.
    fn describe(&self) -> String {
        match self.base().id() {
            Some(id) => format!("{}:{}", Self::NAME, id),
            None => format!("{}:null", Self::NAME),
        }
    }
}
