//! Domain error model.

use thiserror::Error;

/// Result type used across the catalog.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant maps to a client-facing failure; there is no infrastructure
/// error because the catalog lives entirely in memory.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. an attempt to clear a required field).
    #[error("validation failed: {0}")]
    Validation(String),

    /// One or more required fields were missing (or empty) on create.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A list query parameter could not be parsed.
    #[error("invalid query parameter `{param}`: {reason}")]
    InvalidQuery { param: &'static str, reason: String },

    /// No product carries the requested identifier.
    #[error("product not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_query(param: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidQuery {
            param,
            reason: reason.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_lists_every_field() {
        let err = DomainError::MissingFields(vec!["name", "price"]);
        assert_eq!(err.to_string(), "missing required fields: name, price");
    }

    #[test]
    fn invalid_query_names_the_parameter() {
        let err = DomainError::invalid_query("page", "must be a positive integer");
        assert_eq!(
            err.to_string(),
            "invalid query parameter `page`: must be a positive integer"
        );
    }
}
