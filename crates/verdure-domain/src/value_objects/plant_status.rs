//! Plant status value object and lifecycle transition table

use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a plant.
///
/// Legal transitions:
///
/// ```text
/// PLANTED -> GROWING -> HARVESTED
///                    -> DEAD
/// any     -> ARCHIVED (terminal soft-delete marker)
/// ```
///
/// `ARCHIVED` plants stay in the write model but are hidden from normal
/// read-side queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlantStatus {
    Planted,
    Growing,
    Harvested,
    Dead,
    Archived,
}

impl PlantStatus {
    /// Wire names of every member, used in validation error messages.
    pub const ALL: &'static [&'static str] =
        &["PLANTED", "GROWING", "HARVESTED", "DEAD", "ARCHIVED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planted => "PLANTED",
            Self::Growing => "GROWING",
            Self::Harvested => "HARVESTED",
            Self::Dead => "DEAD",
            Self::Archived => "ARCHIVED",
        }
    }

    /// Whether the transition table permits moving from `self` to `next`.
    ///
    /// Identity transitions are rejected; `ARCHIVED` is reachable from every
    /// other status and terminal once entered.
    pub fn can_transition_to(self, next: PlantStatus) -> bool {
        if self == next {
            return false;
        }
        matches!(
            (self, next),
            (_, Self::Archived)
                | (Self::Planted, Self::Growing)
                | (Self::Growing, Self::Harvested)
                | (Self::Growing, Self::Dead)
        )
    }

    /// Archived plants are excluded from normal read-side queries.
    pub fn is_archived(&self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl Default for PlantStatus {
    fn default() -> Self {
        Self::Planted
    }
}

impl FromStr for PlantStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLANTED" => Ok(Self::Planted),
            "GROWING" => Ok(Self::Growing),
            "HARVESTED" => Ok(Self::Harvested),
            "DEAD" => Ok(Self::Dead),
            "ARCHIVED" => Ok(Self::Archived),
            other => Err(ValidationError::InvalidEnumValue {
                field: "plant status",
                value: other.to_owned(),
                allowed: Self::ALL,
            }),
        }
    }
}

impl fmt::Display for PlantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PlantStatus::*;

    #[test]
    fn happy_path_transitions() {
        assert!(Planted.can_transition_to(Growing));
        assert!(Growing.can_transition_to(Harvested));
        assert!(Growing.can_transition_to(Dead));
    }

    #[test]
    fn archived_reachable_from_everywhere_and_terminal() {
        for status in [Planted, Growing, Harvested, Dead] {
            assert!(status.can_transition_to(Archived));
        }
        for status in [Planted, Growing, Harvested, Dead] {
            assert!(!Archived.can_transition_to(status));
        }
    }

    #[test]
    fn illegal_transitions_rejected() {
        assert!(!Planted.can_transition_to(Harvested));
        assert!(!Harvested.can_transition_to(Growing));
        assert!(!Dead.can_transition_to(Growing));
        assert!(!Growing.can_transition_to(Planted));
    }

    #[test]
    fn identity_transitions_rejected() {
        for status in [Planted, Growing, Harvested, Dead, Archived] {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn parses_every_member() {
        for raw in PlantStatus::ALL {
            let parsed: PlantStatus = raw.parse().unwrap();
            assert_eq!(parsed.as_str(), *raw);
        }
    }
}
