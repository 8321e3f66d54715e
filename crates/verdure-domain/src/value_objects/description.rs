//! Free-text value object for descriptions and notes

use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 2_000;

/// Trimmed free text used for descriptions and notes.
///
/// A cleared field is modeled as `Option::None`, never as an empty
/// `Description`: empty or whitespace-only input fails construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyText {
                field: "description",
            });
        }
        let len = trimmed.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::TextTooLong {
                field: "description",
                max: MAX_DESCRIPTION_LEN,
                len,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Description {
    type Error = ValidationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<Description> for String {
    fn from(text: Description) -> Self {
        text.0
    }
}
