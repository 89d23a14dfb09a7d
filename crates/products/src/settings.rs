//! Catalog behaviour switches.
//!
//! One catalog serves both the full-field and the minimal product shape; the
//! difference is a setting, not a second set of handlers.

use core::str::FromStr;

use catalog_core::DomainError;

/// Fields a create request must carry (non-empty / non-zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequiredFields {
    /// `name`, `description`, `price` and `category`.
    #[default]
    Full,
    /// `name` and `price` only.
    Minimal,
}

impl RequiredFields {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredFields::Full => "full",
            RequiredFields::Minimal => "minimal",
        }
    }
}

impl FromStr for RequiredFields {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" | "strict" => Ok(RequiredFields::Full),
            "minimal" => Ok(RequiredFields::Minimal),
            other => Err(DomainError::validation(format!(
                "unknown required-field set `{other}` (expected full or minimal)"
            ))),
        }
    }
}

/// How a partial update treats supplied-but-falsy values.
///
/// Applies to `name`, `description`, `price` and `category`. `inStock` is
/// always overwritten when a boolean is supplied, under either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdatePolicy {
    /// `""`, `0` and `null` keep the existing value.
    #[default]
    Truthy,
    /// Any supplied value overwrites; `null` clears optional fields.
    Present,
}

impl UpdatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdatePolicy::Truthy => "truthy",
            UpdatePolicy::Present => "present",
        }
    }
}

impl FromStr for UpdatePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "truthy" => Ok(UpdatePolicy::Truthy),
            "present" => Ok(UpdatePolicy::Present),
            other => Err(DomainError::validation(format!(
                "unknown update policy `{other}` (expected truthy or present)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogSettings {
    pub required_fields: RequiredFields,
    pub update_policy: UpdatePolicy,
}
