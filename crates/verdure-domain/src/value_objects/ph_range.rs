//! Soil pH range value object

use crate::ValidationError;
use serde::{Deserialize, Serialize};

/// Lower bound of the physical pH scale.
pub const PH_MIN: f64 = 0.0;
/// Upper bound of the physical pH scale.
pub const PH_MAX: f64 = 14.0;

/// Optimal soil pH window for a species.
///
/// Both bounds must lie on the physical 0-14 scale and `min` must not
/// exceed `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPhRange")]
pub struct PhRange {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawPhRange {
    min: f64,
    max: f64,
}

impl PhRange {
    pub fn new(min: f64, max: f64) -> Result<Self, ValidationError> {
        for (field, value) in [("ph min", min), ("ph max", max)] {
            if !value.is_finite() || !(PH_MIN..=PH_MAX).contains(&value) {
                return Err(ValidationError::OutOfBounds {
                    field,
                    value,
                    min: PH_MIN,
                    max: PH_MAX,
                });
            }
        }
        if min > max {
            return Err(ValidationError::InvalidRange {
                field: "ph range",
                min,
                max,
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, ph: f64) -> bool {
        (self.min..=self.max).contains(&ph)
    }
}

impl TryFrom<RawPhRange> for PhRange {
    type Error = ValidationError;

    fn try_from(raw: RawPhRange) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordered_range_within_scale() {
        let range = PhRange::new(5.5, 6.5).unwrap();
        assert_eq!(range.min(), 5.5);
        assert_eq!(range.max(), 6.5);
        assert!(range.contains(6.0));
        assert!(!range.contains(7.0));
    }

    #[test]
    fn accepts_degenerate_point_range() {
        assert!(PhRange::new(7.0, 7.0).is_ok());
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(matches!(
            PhRange::new(6.5, 5.5).unwrap_err(),
            ValidationError::InvalidRange { .. }
        ));
    }

    #[test]
    fn rejects_out_of_scale_bounds() {
        assert!(PhRange::new(-0.1, 7.0).is_err());
        assert!(PhRange::new(3.0, 14.5).is_err());
        assert!(PhRange::new(f64::NAN, 7.0).is_err());
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<PhRange>(r#"{"min":9.0,"max":2.0}"#).is_err());
        let range: PhRange = serde_json::from_str(r#"{"min":5.0,"max":6.0}"#).unwrap();
        assert_eq!(range.min(), 5.0);
    }
}
