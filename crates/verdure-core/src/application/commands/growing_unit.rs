//! Growing unit commands

use verdure_domain::aggregates::{GrowingUnitUpdate, NewGrowingUnit};
use verdure_domain::patch::FieldUpdate;
use verdure_domain::value_objects::{Capacity, Description, Dimensions, EntityName, GrowingUnitId};
use verdure_domain::DomainResult;

/// Create a new growing unit, optionally assigned to a location.
#[derive(Debug, Clone)]
pub struct CreateGrowingUnitCommand {
    pub props: NewGrowingUnit,
}

impl CreateGrowingUnitCommand {
    pub fn new(
        name: &str,
        kind: &str,
        location_id: Option<&str>,
        capacity: u32,
        dimensions_cm: Option<(f64, f64, f64)>,
        description: Option<&str>,
    ) -> DomainResult<Self> {
        Ok(Self {
            props: NewGrowingUnit {
                name: EntityName::new(name)?,
                kind: kind.parse()?,
                location_id: location_id.map(str::parse).transpose()?,
                capacity: Capacity::new(capacity)?,
                dimensions: dimensions_cm
                    .map(|(w, d, h)| Dimensions::new(w, d, h))
                    .transpose()?,
                description: description.map(Description::new).transpose()?,
            },
        })
    }
}

/// Partially update an existing growing unit.
#[derive(Debug, Clone)]
pub struct UpdateGrowingUnitCommand {
    pub id: GrowingUnitId,
    pub update: GrowingUnitUpdate,
}

impl UpdateGrowingUnitCommand {
    pub fn new(
        id: &str,
        name: Option<&str>,
        kind: Option<&str>,
        location_id: FieldUpdate<&str>,
        capacity: Option<u32>,
        dimensions_cm: FieldUpdate<(f64, f64, f64)>,
        description: FieldUpdate<&str>,
    ) -> DomainResult<Self> {
        Ok(Self {
            id: id.parse()?,
            update: GrowingUnitUpdate {
                name: name.map(EntityName::new).transpose()?,
                kind: kind.map(str::parse).transpose()?,
                location_id: location_id.try_map(str::parse)?,
                capacity: capacity.map(Capacity::new).transpose()?,
                dimensions: dimensions_cm.try_map(|(w, d, h)| Dimensions::new(w, d, h))?,
                description: description.try_map(Description::new)?,
            },
        })
    }
}

/// Delete a growing unit and, by composition, its plants.
#[derive(Debug, Clone)]
pub struct DeleteGrowingUnitCommand {
    pub id: GrowingUnitId,
}

impl DeleteGrowingUnitCommand {
    pub fn new(id: &str) -> DomainResult<Self> {
        Ok(Self { id: id.parse()? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_capacity_and_dimensions() {
        assert!(CreateGrowingUnitCommand::new("Pot", "POT", None, 0, None, None).is_err());
        assert!(
            CreateGrowingUnitCommand::new("Pot", "POT", None, 2, Some((0.0, 1.0, 1.0)), None)
                .is_err()
        );

        let command =
            CreateGrowingUnitCommand::new("Pot", "POT", None, 2, Some((30.0, 30.0, 25.0)), None)
                .unwrap();
        assert_eq!(command.props.capacity.get(), 2);
    }

    #[test]
    fn clearing_the_location_is_distinct_from_omitting_it() {
        let id = GrowingUnitId::new().to_string();

        let keep = UpdateGrowingUnitCommand::new(
            &id,
            None,
            None,
            FieldUpdate::Keep,
            None,
            FieldUpdate::Keep,
            FieldUpdate::Keep,
        )
        .unwrap();
        assert!(keep.update.location_id.is_keep());

        let clear = UpdateGrowingUnitCommand::new(
            &id,
            None,
            None,
            FieldUpdate::Clear,
            None,
            FieldUpdate::Keep,
            FieldUpdate::Keep,
        )
        .unwrap();
        assert_eq!(clear.update.location_id, FieldUpdate::Clear);
    }
}
