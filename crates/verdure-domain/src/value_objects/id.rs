//! Identity value objects
//!
//! UUID v4 newtypes for every aggregate and entity. Parsing a textual id
//! rejects anything that is not a version 4 UUID, so a foreign identifier
//! can never masquerade as one of ours.

use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID. The UUID must already be version 4.
            pub fn from_uuid(uuid: Uuid) -> Result<Self, ValidationError> {
                if uuid.get_version() != Some(uuid::Version::Random) {
                    return Err(ValidationError::InvalidUuid {
                        field: $field,
                        value: uuid.to_string(),
                    });
                }
                Ok(Self(uuid))
            }

            /// Get the underlying UUID.
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::parse_str(s).map_err(|_| ValidationError::InvalidUuid {
                    field: $field,
                    value: s.to_owned(),
                })?;
                Self::from_uuid(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a location.
    LocationId, "location id"
}

define_id! {
    /// Unique identifier for a growing unit.
    GrowingUnitId, "growing unit id"
}

define_id! {
    /// Unique identifier for a plant.
    PlantId, "plant id"
}

define_id! {
    /// Unique identifier for a plant species.
    SpeciesId, "species id"
}

define_id! {
    /// Unique identifier for a domain event, used for tracking and correlation.
    EventId, "event id"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_v4() {
        let a = LocationId::new();
        let b = LocationId::new();

        assert_ne!(a, b);
        assert_eq!(a.as_uuid().get_version(), Some(uuid::Version::Random));
    }

    #[test]
    fn parses_v4_uuid() {
        let id = PlantId::new();
        let parsed: PlantId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn rejects_garbage() {
        let err = "not-a-uuid".parse::<LocationId>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidUuid { field, .. } if field == "location id"));
    }

    #[test]
    fn rejects_non_v4_uuid() {
        // A valid v1 (time-based) UUID must not pass as an identity.
        let v1 = "c232ab00-9414-11ec-b3c8-9f68deced846";
        assert!(v1.parse::<GrowingUnitId>().is_err());
    }

    #[test]
    fn serde_round_trip() {
        let id = SpeciesId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: SpeciesId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
