//! Strongly-typed identifiers used across the catalog.

use serde::Serialize;
use uuid::Uuid;

/// Identifier of a product.
///
/// Opaque string: seed records use short numeric ids (`"1"`, `"2"`, ...) while
/// freshly created products get a random UUID v4. Comparison is exact and
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Generate a fresh, globally unique identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct_uuids() {
        let a = ProductId::generate();
        let b = ProductId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn ids_compare_case_sensitively() {
        assert_ne!(ProductId::from("abc"), ProductId::from("ABC"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = ProductId::from("42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    }
}
