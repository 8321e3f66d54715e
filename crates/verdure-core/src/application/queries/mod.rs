//! Queries - Read operations
//!
//! Read-path queries return view models or paginated view models from the
//! read store. A narrow write-path exists for the few callers that need the
//! full aggregate: those queries go through the assert-exists services.

use crate::read_model::{
    GrowingUnitCriteria, LocationCriteria, PlantCriteria, SpeciesCriteria,
};
use verdure_domain::value_objects::{GrowingUnitId, LocationId, PlantId, SpeciesId};
use verdure_domain::DomainResult;

/// Fetch one location view model by id.
#[derive(Debug, Clone)]
pub struct FindLocationByIdQuery {
    pub id: LocationId,
}

impl FindLocationByIdQuery {
    pub fn new(id: &str) -> DomainResult<Self> {
        Ok(Self { id: id.parse()? })
    }
}

/// Filter, sort and paginate location view models.
#[derive(Debug, Clone, Default)]
pub struct SearchLocationsQuery {
    pub criteria: LocationCriteria,
}

/// Write-path read: fetch the full location aggregate.
#[derive(Debug, Clone)]
pub struct GetLocationAggregateQuery {
    pub id: LocationId,
}

/// Fetch one growing unit view model by id.
#[derive(Debug, Clone)]
pub struct FindGrowingUnitByIdQuery {
    pub id: GrowingUnitId,
}

impl FindGrowingUnitByIdQuery {
    pub fn new(id: &str) -> DomainResult<Self> {
        Ok(Self { id: id.parse()? })
    }
}

/// Filter, sort and paginate growing unit view models.
#[derive(Debug, Clone, Default)]
pub struct SearchGrowingUnitsQuery {
    pub criteria: GrowingUnitCriteria,
}

/// Write-path read: fetch the full growing unit aggregate with its plants.
#[derive(Debug, Clone)]
pub struct GetGrowingUnitAggregateQuery {
    pub id: GrowingUnitId,
}

/// Fetch one plant view model by id.
#[derive(Debug, Clone)]
pub struct FindPlantByIdQuery {
    pub id: PlantId,
}

impl FindPlantByIdQuery {
    pub fn new(id: &str) -> DomainResult<Self> {
        Ok(Self { id: id.parse()? })
    }
}

/// Filter, sort and paginate plant view models. Archived plants are hidden
/// unless the criteria ask for them.
#[derive(Debug, Clone, Default)]
pub struct SearchPlantsQuery {
    pub criteria: PlantCriteria,
}

/// Fetch one species view model by id.
#[derive(Debug, Clone)]
pub struct FindSpeciesByIdQuery {
    pub id: SpeciesId,
}

impl FindSpeciesByIdQuery {
    pub fn new(id: &str) -> DomainResult<Self> {
        Ok(Self { id: id.parse()? })
    }
}

/// Filter, sort and paginate species view models.
#[derive(Debug, Clone, Default)]
pub struct SearchSpeciesQuery {
    pub criteria: SpeciesCriteria,
}
