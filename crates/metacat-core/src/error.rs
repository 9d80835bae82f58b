//! Core error types.

use thiserror::Error;

/// Core catalog errors.
#[derive(Debug, Error)]
pub enum Error {
    /// An entity failed one of its declared constraints.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A cascading operation would touch more entities than allowed.
    #[error("attempt to return more than {ceiling} entities")]
    QuotaExceeded {
        /// The ceiling that was exceeded.
        ceiling: u64,
    },

    /// An entity type's declaration or accessors are broken.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Constraint violations.
///
/// The display form of each variant is the message reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field holds no value.
    #[error("{entity}: {field} cannot be null.")]
    NullField {
        /// Concrete entity type name.
        entity: &'static str,
        /// Offending field.
        field: &'static str,
    },

    /// A string field is longer than its declared maximum.
    #[error("{entity}: {field} cannot have length > {max_length}.")]
    TooLong {
        /// Concrete entity type name.
        entity: &'static str,
        /// Offending field.
        field: &'static str,
        /// Declared maximum length in UTF-16 code units.
        max_length: usize,
    },

    /// A type-specific rule failed.
    #[error("{entity}: {field} {reason}.")]
    Rule {
        /// Concrete entity type name.
        entity: &'static str,
        /// Offending field.
        field: &'static str,
        /// What the rule requires.
        reason: String,
    },
}

impl ValidationError {
    /// Name of the field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NullField { field, .. } => *field,
            ValidationError::TooLong { field, .. } => *field,
            ValidationError::Rule { field, .. } => *field,
        }
    }

    /// Name of the entity type that failed.
    pub fn entity(&self) -> &'static str {
        match self {
            ValidationError::NullField { entity, .. } => *entity,
            ValidationError::TooLong { entity, .. } => *entity,
            ValidationError::Rule { entity, .. } => *entity,
        }
    }
}

/// Error classification used to pick a response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input; the caller can fix the entity.
    Validation,
    /// Cascade too large; the caller can raise the ceiling or narrow the operation.
    QuotaExceeded,
    /// Broken deployment; needs an operator.
    Internal,
}

impl ErrorKind {
    /// Stable response code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::QuotaExceeded => "QUOTA_EXCEEDED",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::QuotaExceeded { .. } => ErrorKind::QuotaExceeded,
            Error::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Build an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let err = Error::from(ValidationError::NullField {
            entity: "Sample",
            field: "name",
        });
        assert_eq!(err.to_string(), "Sample: name cannot be null.");

        let err = Error::from(ValidationError::TooLong {
            entity: "Sample",
            field: "name",
            max_length: 255,
        });
        assert_eq!(err.to_string(), "Sample: name cannot have length > 255.");

        let err = ValidationError::Rule {
            entity: "Investigation",
            field: "endDate",
            reason: "cannot be before startDate".into(),
        };
        assert_eq!(err.to_string(), "Investigation: endDate cannot be before startDate.");
        assert_eq!(err.field(), "endDate");
        assert_eq!(err.entity(), "Investigation");
    }

    #[test]
    fn test_quota_message() {
        let err = Error::QuotaExceeded { ceiling: 1000 };
        assert_eq!(err.to_string(), "attempt to return more than 1000 entities");
    }

    #[test]
    fn test_kinds_have_distinct_codes() {
        let validation = Error::from(ValidationError::NullField {
            entity: "Sample",
            field: "name",
        });
        let quota = Error::QuotaExceeded { ceiling: 1 };
        let internal = Error::internal("no accessor for field");

        assert_eq!(validation.kind().code(), "VALIDATION");
        assert_eq!(quota.kind().code(), "QUOTA_EXCEEDED");
        assert_eq!(internal.kind().code(), "INTERNAL");
        assert_ne!(validation.kind(), internal.kind());
    }
}
