//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They
//! are distinct from API/IO errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A required field was empty
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
