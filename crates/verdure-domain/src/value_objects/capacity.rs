//! Growing unit capacity value object

use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest number of plant slots a single growing unit may declare.
pub const MAX_CAPACITY: u32 = 10_000;

/// Number of plant slots a growing unit offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Capacity(u32);

impl Capacity {
    pub fn new(slots: u32) -> Result<Self, ValidationError> {
        if slots == 0 || slots > MAX_CAPACITY {
            return Err(ValidationError::OutOfBounds {
                field: "capacity",
                value: f64::from(slots),
                min: 1.0,
                max: f64::from(MAX_CAPACITY),
            });
        }
        Ok(Self(slots))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Capacity {
    type Error = ValidationError;

    fn try_from(slots: u32) -> Result<Self, Self::Error> {
        Self::new(slots)
    }
}

impl From<Capacity> for u32 {
    fn from(capacity: Capacity) -> Self {
        capacity.0
    }
}
