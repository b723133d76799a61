//! Polymorphic project/repository identifiers.
//!
//! The Backlog URL scheme treats numeric IDs and textual keys as
//! interchangeable path segments (`/api/v2/projects/12` and
//! `/api/v2/projects/SRE` name the same project). All of that
//! polymorphism is confined to this one type.

use std::fmt;

use crate::error::{Error, ErrorKind, Result};

/// Either a numeric ID or a textual key, rendered to a single URL path
/// segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdOrKey {
    /// Numeric identifier, e.g. project ID 12.
    Id(u32),
    /// Textual key or name, e.g. project key "SRE".
    Key(String),
}

impl IdOrKey {
    /// Render to a URL path segment.
    ///
    /// Fails before any network call when the carrier cannot name a
    /// resource: an empty key, or the ID 0 (Backlog never issues it).
    /// Percent-encoding is the URL composer's job, not this one's.
    pub fn to_segment(&self) -> Result<String> {
        match self {
            IdOrKey::Id(0) => Err(Error::new(ErrorKind::InvalidIdentifier(
                "numeric ID must be positive".to_string(),
            ))),
            IdOrKey::Id(id) => Ok(id.to_string()),
            IdOrKey::Key(key) if key.is_empty() => Err(Error::new(
                ErrorKind::InvalidIdentifier("key must not be empty".to_string()),
            )),
            IdOrKey::Key(key) => Ok(key.clone()),
        }
    }
}

impl fmt::Display for IdOrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdOrKey::Id(id) => write!(f, "{id}"),
            IdOrKey::Key(key) => write!(f, "{key}"),
        }
    }
}

impl From<u32> for IdOrKey {
    fn from(id: u32) -> Self {
        IdOrKey::Id(id)
    }
}

impl From<&str> for IdOrKey {
    fn from(key: &str) -> Self {
        IdOrKey::Key(key.to_string())
    }
}

impl From<String> for IdOrKey {
    fn from(key: String) -> Self {
        IdOrKey::Key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_renders_decimal() {
        assert_eq!(IdOrKey::from(42).to_segment().unwrap(), "42");
    }

    #[test]
    fn test_key_renders_verbatim() {
        assert_eq!(IdOrKey::from("SRE").to_segment().unwrap(), "SRE");
    }

    #[test]
    fn test_empty_key_is_invalid() {
        let err = IdOrKey::from("").to_segment().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidIdentifier(_)));
    }

    #[test]
    fn test_zero_id_is_invalid() {
        let err = IdOrKey::Id(0).to_segment().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidIdentifier(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(IdOrKey::from(12).to_string(), "12");
        assert_eq!(IdOrKey::from("SRE").to_string(), "SRE");
    }
}
