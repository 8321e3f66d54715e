//! Physical dimensions value object

use crate::ValidationError;
use serde::{Deserialize, Serialize};

const MAX_EDGE_CM: f64 = 100_000.0;

/// Outer dimensions of a growing unit, in centimeters.
///
/// Each edge must be a finite, positive measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct Dimensions {
    width_cm: f64,
    depth_cm: f64,
    height_cm: f64,
}

#[derive(Deserialize)]
struct RawDimensions {
    width_cm: f64,
    depth_cm: f64,
    height_cm: f64,
}

impl Dimensions {
    pub fn new(width_cm: f64, depth_cm: f64, height_cm: f64) -> Result<Self, ValidationError> {
        for (field, value) in [
            ("width", width_cm),
            ("depth", depth_cm),
            ("height", height_cm),
        ] {
            if !value.is_finite() || value <= 0.0 || value > MAX_EDGE_CM {
                return Err(ValidationError::InvalidDimension { field, value });
            }
        }
        Ok(Self {
            width_cm,
            depth_cm,
            height_cm,
        })
    }

    pub fn width_cm(&self) -> f64 {
        self.width_cm
    }

    pub fn depth_cm(&self) -> f64 {
        self.depth_cm
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    /// Enclosed volume in liters.
    pub fn volume_liters(&self) -> f64 {
        self.width_cm * self.depth_cm * self.height_cm / 1_000.0
    }
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = ValidationError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Self::new(raw.width_cm, raw.depth_cm, raw.height_cm)
    }
}
