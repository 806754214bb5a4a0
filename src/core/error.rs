//! Crate-wide error type.
//!
//! Selection itself never fails. Errors come from rule validation at
//! construction time and from the I/O collaborators (tables, card data,
//! cache files).

use thiserror::Error;

use super::attribute::AttributeKey;

/// Errors produced while building inputs for, or reporting on, a selection.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid rule for '{attribute}': min {min} exceeds max {max}")]
    InvalidRule {
        attribute: AttributeKey,
        min: u32,
        max: u32,
    },

    #[error("invalid exclusion: '{attribute}' cannot exclude itself")]
    InvalidExclusion { attribute: AttributeKey },

    #[error("duplicate rule for '{0}'")]
    DuplicateRule(AttributeKey),

    #[error("duplicate row id '{0}'")]
    DuplicateRow(String),

    #[error("card not found: {0}")]
    CardNotFound(String),

    #[error("malformed table at line {line}: {message}")]
    MalformedTable { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cache error: {0}")]
    Cache(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rule_message() {
        let err = Error::InvalidRule {
            attribute: AttributeKey::new("ramp"),
            min: 5,
            max: 2,
        };
        assert_eq!(
            err.to_string(),
            "invalid rule for 'ramp': min 5 exceeds max 2"
        );
    }

    #[test]
    fn test_io_conversion() {
        fn read() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(read(), Err(Error::Io(_))));
    }
}
