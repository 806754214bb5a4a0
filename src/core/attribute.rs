//! Attribute keys.
//!
//! An attribute is a named boolean property of a card: a tagger tag
//! ("ramp", "tutor-land") or a type word ("creature", "artifact").
//! Keys compare exactly; use [`AttributeKey::normalized`] at the point
//! where names enter from external data.

use serde::{Deserialize, Serialize};

/// Name of a boolean attribute column.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeKey(pub String);

impl AttributeKey {
    /// Create a new attribute key, verbatim.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Create a key from an external name: trimmed and lower-cased.
    pub fn normalized(key: &str) -> Self {
        Self(key.trim().to_lowercase())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AttributeKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AttributeKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&AttributeKey> for AttributeKey {
    fn from(k: &AttributeKey) -> Self {
        k.clone()
    }
}

impl std::borrow::Borrow<str> for AttributeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_key() {
        let key1 = AttributeKey::new("ramp");
        let key2: AttributeKey = "ramp".into();
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        assert_ne!(AttributeKey::new("Ramp"), AttributeKey::new("ramp"));
    }

    #[test]
    fn test_normalized() {
        assert_eq!(AttributeKey::normalized("  Tutor-Land \n").as_str(), "tutor-land");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&AttributeKey::new("draw")).unwrap();
        assert_eq!(json, "\"draw\"");
    }
}
