//! Plant commands
//!
//! Plants live inside a growing unit, so every plant command is routed to
//! the owning unit aggregate by its handler.

use chrono::NaiveDate;
use verdure_domain::aggregates::{NewPlant, PlantUpdate};
use verdure_domain::patch::FieldUpdate;
use verdure_domain::value_objects::{
    Description, EntityName, GrowingUnitId, PlantId, PlantStatus,
};
use verdure_domain::{DomainResult, ValidationError};

fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        field,
        value: raw.to_owned(),
    })
}

/// Plant a new plant into a growing unit.
#[derive(Debug, Clone)]
pub struct CreatePlantCommand {
    pub growing_unit_id: GrowingUnitId,
    pub props: NewPlant,
}

impl CreatePlantCommand {
    pub fn new(
        growing_unit_id: &str,
        name: &str,
        species_id: Option<&str>,
        status: Option<&str>,
        planted_on: Option<&str>,
        notes: Option<&str>,
    ) -> DomainResult<Self> {
        Ok(Self {
            growing_unit_id: growing_unit_id.parse()?,
            props: NewPlant {
                name: EntityName::new(name)?,
                species_id: species_id.map(str::parse).transpose()?,
                status: status
                    .map(str::parse)
                    .transpose()?
                    .unwrap_or(PlantStatus::Planted),
                planted_on: planted_on
                    .map(|raw| parse_date("planted on", raw))
                    .transpose()?,
                notes: notes.map(Description::new).transpose()?,
            },
        })
    }
}

/// Partially update an existing plant. Status changes go through
/// [`ChangePlantStatusCommand`].
#[derive(Debug, Clone)]
pub struct UpdatePlantCommand {
    pub plant_id: PlantId,
    pub update: PlantUpdate,
}

impl UpdatePlantCommand {
    pub fn new(
        plant_id: &str,
        name: Option<&str>,
        species_id: FieldUpdate<&str>,
        planted_on: FieldUpdate<&str>,
        notes: FieldUpdate<&str>,
    ) -> DomainResult<Self> {
        Ok(Self {
            plant_id: plant_id.parse()?,
            update: PlantUpdate {
                name: name.map(EntityName::new).transpose()?,
                species_id: species_id.try_map(str::parse)?,
                planted_on: planted_on.try_map(|raw| parse_date("planted on", raw))?,
                notes: notes.try_map(Description::new)?,
            },
        })
    }
}

/// Remove a plant from its growing unit.
#[derive(Debug, Clone)]
pub struct DeletePlantCommand {
    pub plant_id: PlantId,
}

impl DeletePlantCommand {
    pub fn new(plant_id: &str) -> DomainResult<Self> {
        Ok(Self {
            plant_id: plant_id.parse()?,
        })
    }
}

/// Move a plant into another growing unit.
#[derive(Debug, Clone)]
pub struct TransplantPlantCommand {
    pub plant_id: PlantId,
    pub target_unit_id: GrowingUnitId,
}

impl TransplantPlantCommand {
    pub fn new(plant_id: &str, target_unit_id: &str) -> DomainResult<Self> {
        Ok(Self {
            plant_id: plant_id.parse()?,
            target_unit_id: target_unit_id.parse()?,
        })
    }
}

/// Move a plant through the status transition table.
#[derive(Debug, Clone)]
pub struct ChangePlantStatusCommand {
    pub plant_id: PlantId,
    pub status: PlantStatus,
}

impl ChangePlantStatusCommand {
    pub fn new(plant_id: &str, status: &str) -> DomainResult<Self> {
        Ok(Self {
            plant_id: plant_id.parse()?,
            status: status.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_planted() {
        let unit = GrowingUnitId::new().to_string();
        let command = CreatePlantCommand::new(&unit, "Basil", None, None, None, None).unwrap();
        assert_eq!(command.props.status, PlantStatus::Planted);
    }

    #[test]
    fn parses_the_planted_on_date() {
        let unit = GrowingUnitId::new().to_string();
        let command =
            CreatePlantCommand::new(&unit, "Basil", None, None, Some("2026-03-14"), None).unwrap();
        assert_eq!(
            command.props.planted_on,
            Some(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap())
        );

        assert!(
            CreatePlantCommand::new(&unit, "Basil", None, None, Some("14.03.2026"), None).is_err()
        );
    }

    #[test]
    fn rejects_unknown_status() {
        let unit = GrowingUnitId::new().to_string();
        assert!(CreatePlantCommand::new(&unit, "Basil", None, Some("WILTED"), None, None).is_err());
    }
}
