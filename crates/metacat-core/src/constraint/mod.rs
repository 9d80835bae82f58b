//! Constraint enforcement module.
//!
//! Declared field constraints are enforced generically for every entity type:
//! - Not-null constraints on required fields
//! - Maximum length constraints on string fields

mod validator;

pub use validator::ValidationEngine;
