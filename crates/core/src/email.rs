//! Email address value object.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// A normalized email address.
///
/// Normalization is trim + lowercase, so addresses compare and hash the way
/// a user directory expects. Validation is deliberately shallow (the address
/// must contain `'@'` with something on both sides); anything stricter is a
/// mail-delivery concern, not an identity one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse and normalize a raw address.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DomainError::validation("email must not be empty"));
        }
        match normalized.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(normalized))
            }
            _ => Err(DomainError::validation("invalid email format")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl ValueObject for Email {}

impl core::fmt::Display for Email {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Email {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let email = Email::parse("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn parse_rejects_empty() {
        let err = Email::parse("   ").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn parse_rejects_missing_at_sign() {
        assert!(Email::parse("alice.example.com").is_err());
    }

    #[test]
    fn parse_rejects_empty_local_or_domain() {
        assert!(Email::parse("@example.com").is_err());
        assert!(Email::parse("alice@").is_err());
    }

    #[test]
    fn equal_after_normalization() {
        let a = Email::parse("a@b.com").unwrap();
        let b = Email::parse("A@B.COM").unwrap();
        assert_eq!(a, b);
    }
}
