//! Location type value object

use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of place a location represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    Room,
    Balcony,
    Garden,
    Greenhouse,
    Other,
}

impl LocationType {
    /// Wire names of every member, used in validation error messages.
    pub const ALL: &'static [&'static str] = &["ROOM", "BALCONY", "GARDEN", "GREENHOUSE", "OTHER"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Room => "ROOM",
            Self::Balcony => "BALCONY",
            Self::Garden => "GARDEN",
            Self::Greenhouse => "GREENHOUSE",
            Self::Other => "OTHER",
        }
    }
}

impl FromStr for LocationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROOM" => Ok(Self::Room),
            "BALCONY" => Ok(Self::Balcony),
            "GARDEN" => Ok(Self::Garden),
            "GREENHOUSE" => Ok(Self::Greenhouse),
            "OTHER" => Ok(Self::Other),
            other => Err(ValidationError::InvalidEnumValue {
                field: "location type",
                value: other.to_owned(),
                allowed: Self::ALL,
            }),
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_member() {
        for raw in LocationType::ALL {
            let parsed: LocationType = raw.parse().unwrap();
            assert_eq!(parsed.as_str(), *raw);
        }
    }

    #[test]
    fn rejects_unknown_member() {
        let err = "CLOSET".parse::<LocationType>().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidEnumValue { value, .. } if value == "CLOSET"
        ));
    }

    #[test]
    fn serializes_as_wire_name() {
        let json = serde_json::to_string(&LocationType::Greenhouse).unwrap();
        assert_eq!(json, "\"GREENHOUSE\"");
    }
}
