//! Write-side repository ports
//!
//! One repository per aggregate type. `find_by_id` returns `None` for an
//! absent aggregate - absence is a valid value, never an error; callers
//! that need a guaranteed-present aggregate go through the assert-exists
//! services.
//!
//! `save` is an upsert keyed by identity. It persists current field state,
//! not the event log, and enforces the optimistic concurrency stamp: a save
//! whose version does not match the stored row fails with a version
//! conflict.

use async_trait::async_trait;
use verdure_domain::aggregates::{GrowingUnit, Location, PlantSpecies};
use verdure_domain::value_objects::{GrowingUnitId, LocationId, PlantId, SpeciesId};
use verdure_domain::DomainResult;

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn find_by_id(&self, id: LocationId) -> DomainResult<Option<Location>>;

    async fn save(&self, location: Location) -> DomainResult<()>;

    async fn delete(&self, id: LocationId) -> DomainResult<()>;
}

#[async_trait]
pub trait GrowingUnitRepository: Send + Sync {
    async fn find_by_id(&self, id: GrowingUnitId) -> DomainResult<Option<GrowingUnit>>;

    /// Resolve the unit currently owning the given plant.
    async fn find_by_plant(&self, plant_id: PlantId) -> DomainResult<Option<GrowingUnit>>;

    /// All units assigned to the given location.
    async fn list_by_location(&self, location_id: LocationId) -> DomainResult<Vec<GrowingUnit>>;

    async fn save(&self, unit: GrowingUnit) -> DomainResult<()>;

    async fn delete(&self, id: GrowingUnitId) -> DomainResult<()>;
}

#[async_trait]
pub trait SpeciesRepository: Send + Sync {
    async fn find_by_id(&self, id: SpeciesId) -> DomainResult<Option<PlantSpecies>>;

    async fn save(&self, species: PlantSpecies) -> DomainResult<()>;

    async fn delete(&self, id: SpeciesId) -> DomainResult<()>;
}
