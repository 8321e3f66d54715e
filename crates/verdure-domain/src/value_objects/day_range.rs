//! Day-count range value object

use crate::ValidationError;
use serde::{Deserialize, Serialize};

const MIN_DAYS: u16 = 1;
const MAX_DAYS: u16 = 3_650;

/// Inclusive day-count window, e.g. a species' germination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDayRange")]
pub struct DayRange {
    min: u16,
    max: u16,
}

#[derive(Deserialize)]
struct RawDayRange {
    min: u16,
    max: u16,
}

impl DayRange {
    pub fn new(min: u16, max: u16) -> Result<Self, ValidationError> {
        for (field, value) in [("days min", min), ("days max", max)] {
            if !(MIN_DAYS..=MAX_DAYS).contains(&value) {
                return Err(ValidationError::OutOfBounds {
                    field,
                    value: f64::from(value),
                    min: f64::from(MIN_DAYS),
                    max: f64::from(MAX_DAYS),
                });
            }
        }
        if min > max {
            return Err(ValidationError::InvalidRange {
                field: "day range",
                min: f64::from(min),
                max: f64::from(max),
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u16 {
        self.min
    }

    pub fn max(&self) -> u16 {
        self.max
    }
}

impl TryFrom<RawDayRange> for DayRange {
    type Error = ValidationError;

    fn try_from(raw: RawDayRange) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}
