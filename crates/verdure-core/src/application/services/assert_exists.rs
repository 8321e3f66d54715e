//! Assert-exists services
//!
//! The standard guard for handlers that need a guaranteed-present
//! aggregate: `execute(id)` loads via `find_by_id` and turns absence into
//! the typed not-found error carrying the missing id. Centralizing the
//! check keeps the not-found contract in one place instead of inlined null
//! checks.

use crate::application::{ApplicationError, ApplicationResult};
use crate::ports::{GrowingUnitRepository, LocationRepository, SpeciesRepository};
use std::sync::Arc;
use verdure_domain::aggregates::{GrowingUnit, Location, PlantSpecies};
use verdure_domain::value_objects::{GrowingUnitId, LocationId, PlantId, SpeciesId};

#[derive(Debug)]
pub struct AssertLocationExists<R> {
    repository: Arc<R>,
}

impl<R: LocationRepository> AssertLocationExists<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: LocationId) -> ApplicationResult<Location> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ApplicationError::LocationNotFound(id))
    }
}

#[derive(Debug)]
pub struct AssertGrowingUnitExists<R> {
    repository: Arc<R>,
}

impl<R: GrowingUnitRepository> AssertGrowingUnitExists<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: GrowingUnitId) -> ApplicationResult<GrowingUnit> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ApplicationError::GrowingUnitNotFound(id))
    }
}

/// Resolves the owning unit of a plant; a plant without a unit does not
/// exist.
#[derive(Debug)]
pub struct AssertPlantExists<R> {
    repository: Arc<R>,
}

impl<R: GrowingUnitRepository> AssertPlantExists<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the owning unit; the plant itself is reachable through it.
    pub async fn execute(&self, id: PlantId) -> ApplicationResult<GrowingUnit> {
        self.repository
            .find_by_plant(id)
            .await?
            .ok_or(ApplicationError::PlantNotFound(id))
    }
}

#[derive(Debug)]
pub struct AssertSpeciesExists<R> {
    repository: Arc<R>,
}

impl<R: SpeciesRepository> AssertSpeciesExists<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: SpeciesId) -> ApplicationResult<PlantSpecies> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ApplicationError::SpeciesNotFound(id))
    }
}
