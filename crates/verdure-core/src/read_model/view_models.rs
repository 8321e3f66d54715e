//! View models
//!
//! Flattened primitives plus computed fields, shaped for queries. A growing
//! unit embeds a snapshot of its location's view model so list queries need
//! no read-time join.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use verdure_domain::aggregates::{GrowingUnit, Location, Plant, PlantSpecies};
use verdure_domain::value_objects::{
    DayRange, GrowingUnitId, GrowingUnitKind, LocationId, LocationType, PhRange, PlantId,
    PlantStatus, SpeciesId,
};

/// Read-side projection of a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationViewModel {
    pub id: LocationId,
    pub name: String,
    pub kind: LocationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LocationViewModel {
    pub fn from_aggregate(location: &Location) -> Self {
        Self {
            id: location.id(),
            name: location.name().as_str().to_owned(),
            kind: location.kind(),
            description: location.description().map(|d| d.as_str().to_owned()),
            created_at: location.created_at(),
            updated_at: location.updated_at(),
        }
    }
}

/// Read-side projection of a growing unit, with occupancy figures computed
/// at projection time and the location view model embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowingUnitViewModel {
    pub id: GrowingUnitId,
    pub name: String,
    pub kind: GrowingUnitKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationViewModel>,
    pub capacity: u32,
    pub occupancy: u32,
    pub remaining_capacity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_liters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GrowingUnitViewModel {
    pub fn from_aggregate(unit: &GrowingUnit, location: Option<LocationViewModel>) -> Self {
        Self {
            id: unit.id(),
            name: unit.name().as_str().to_owned(),
            kind: unit.kind(),
            location_id: unit.location_id(),
            location,
            capacity: unit.capacity().get(),
            occupancy: unit.occupancy(),
            remaining_capacity: unit.remaining_capacity(),
            volume_liters: unit.dimensions().map(|d| d.volume_liters()),
            description: unit.description().map(|d| d.as_str().to_owned()),
            created_at: unit.created_at(),
            updated_at: unit.updated_at(),
        }
    }

    pub fn has_free_capacity(&self) -> bool {
        self.remaining_capacity > 0
    }
}

/// Read-side projection of a plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantViewModel {
    pub id: PlantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species_id: Option<SpeciesId>,
    pub growing_unit_id: GrowingUnitId,
    pub status: PlantStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planted_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlantViewModel {
    pub fn from_entity(plant: &Plant) -> Self {
        Self {
            id: plant.id(),
            name: plant.name().as_str().to_owned(),
            species_id: plant.species_id(),
            growing_unit_id: plant.growing_unit_id(),
            status: plant.status(),
            planted_on: plant.planted_on(),
            notes: plant.notes().map(|n| n.as_str().to_owned()),
            created_at: plant.created_at(),
            updated_at: plant.updated_at(),
        }
    }
}

/// Read-side projection of a plant species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesViewModel {
    pub id: SpeciesId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimal_ph: Option<PhRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub germination: Option<DayRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SpeciesViewModel {
    pub fn from_aggregate(species: &PlantSpecies) -> Self {
        Self {
            id: species.id(),
            name: species.name().as_str().to_owned(),
            scientific_name: species.scientific_name().map(|n| n.as_str().to_owned()),
            optimal_ph: species.optimal_ph(),
            germination: species.germination(),
            description: species.description().map(|d| d.as_str().to_owned()),
            created_at: species.created_at(),
            updated_at: species.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdure_domain::aggregates::{NewGrowingUnit, NewLocation};
    use verdure_domain::value_objects::{Capacity, Dimensions, EntityName};

    #[test]
    fn unit_view_serializes_with_embedded_location_and_skips_absent_fields() {
        let location = Location::create(
            EntityName::new("Balcony").unwrap(),
            LocationType::Balcony,
            None,
        );
        let unit = GrowingUnit::create(NewGrowingUnit {
            name: EntityName::new("Planter").unwrap(),
            kind: GrowingUnitKind::PlanterBox,
            location_id: Some(location.id()),
            capacity: Capacity::new(4).unwrap(),
            dimensions: Some(Dimensions::new(100.0, 40.0, 30.0).unwrap()),
            description: None,
        });

        let view = GrowingUnitViewModel::from_aggregate(
            &unit,
            Some(LocationViewModel::from_aggregate(&location)),
        );
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["kind"], "PLANTER_BOX");
        assert_eq!(json["location"]["name"], "Balcony");
        assert_eq!(json["occupancy"], 0);
        assert_eq!(json["remaining_capacity"], 4);
        assert!(json.get("description").is_none());

        let back: GrowingUnitViewModel = serde_json::from_value(json).unwrap();
        assert_eq!(back, view);
    }

    #[test]
    fn location_view_mirrors_the_aggregate() {
        let props = NewLocation {
            name: EntityName::new("Greenhouse").unwrap(),
            kind: LocationType::Greenhouse,
            description: None,
        };
        let location = Location::create(props.name, props.kind, props.description);
        let view = LocationViewModel::from_aggregate(&location);

        assert_eq!(view.id, location.id());
        assert_eq!(view.name, "Greenhouse");
        assert_eq!(view.created_at, view.updated_at);
    }
}
