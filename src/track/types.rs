//! core type-safe wrappers for the tracking layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A validated entity key.
///
/// Keys identify the tracked record across scopes and are typically
/// auto generated (ULIDs, UUIDs). Restrictions:
/// - 1-128 characters
/// - Alphanumeric, underscores, hyphens only
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityKey(String);

impl EntityKey {
    pub fn new(key: impl Into<String>) -> Result<Self, InvalidKeyError> {
        let key = key.into();
        Self::validate(&key)?;
        Ok(Self(key))
    }

    /// Validate an entity key.
    fn validate(key: &str) -> Result<(), InvalidKeyError> {
        if key.is_empty() {
            return Err(InvalidKeyError::Empty);
        }

        if key.len() > 128 {
            return Err(InvalidKeyError::TooLong(key.len()));
        }

        for (i, c) in key.chars().enumerate() {
            // alphanumeric, underscore, hyphen allowed
            if !c.is_ascii_alphanumeric() && c != '_' && c != '-' {
                return Err(InvalidKeyError::InvalidCharacter { char: c, position: i });
            }
        }

        Ok(())
    }

    /// get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// convert to owned String
    pub fn into_string(self) -> String {
        self.0
    }

    /// Generate a new ULID-based entity key.
    pub fn generate() -> Self {
        Self(ulid::Ulid::new().to_string().to_lowercase())
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntityKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// error type for invalid entity keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidKeyError {
    Empty,
    TooLong(usize),
    InvalidCharacter { char: char, position: usize },
}

impl fmt::Display for InvalidKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "key cannot be empty"),
            Self::TooLong(len) => write!(f, "key too long: {} characters", len),
            Self::InvalidCharacter { char, position } => {
                write!(f, "invalid character '{}' at position {}", char, position)
            }
        }
    }
}

impl std::error::Error for InvalidKeyError {}
