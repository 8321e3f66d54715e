//! Growing unit kind value object

use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of container or bed a growing unit represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrowingUnitKind {
    Pot,
    PlanterBox,
    RaisedBed,
    Hydroponic,
    Bed,
}

impl GrowingUnitKind {
    /// Wire names of every member, used in validation error messages.
    pub const ALL: &'static [&'static str] =
        &["POT", "PLANTER_BOX", "RAISED_BED", "HYDROPONIC", "BED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pot => "POT",
            Self::PlanterBox => "PLANTER_BOX",
            Self::RaisedBed => "RAISED_BED",
            Self::Hydroponic => "HYDROPONIC",
            Self::Bed => "BED",
        }
    }
}

impl FromStr for GrowingUnitKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POT" => Ok(Self::Pot),
            "PLANTER_BOX" => Ok(Self::PlanterBox),
            "RAISED_BED" => Ok(Self::RaisedBed),
            "HYDROPONIC" => Ok(Self::Hydroponic),
            "BED" => Ok(Self::Bed),
            other => Err(ValidationError::InvalidEnumValue {
                field: "growing unit kind",
                value: other.to_owned(),
                allowed: Self::ALL,
            }),
        }
    }
}

impl fmt::Display for GrowingUnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_member() {
        for raw in GrowingUnitKind::ALL {
            let parsed: GrowingUnitKind = raw.parse().unwrap();
            assert_eq!(parsed.as_str(), *raw);
        }
    }

    #[test]
    fn rejects_unknown_member() {
        assert!("BUCKET".parse::<GrowingUnitKind>().is_err());
    }
}
