//! Read-side repository ports
//!
//! One repository per view model, backed by a document store: `save` is an
//! upsert keyed by id (re-projecting the same event is idempotent), and
//! criteria evaluation (filter, sort, paginate) is delegated to the store.

use crate::read_model::{
    GrowingUnitCriteria, GrowingUnitViewModel, LocationCriteria, LocationViewModel, Paginated,
    PlantCriteria, PlantViewModel, SpeciesCriteria, SpeciesViewModel,
};
use async_trait::async_trait;
use verdure_domain::value_objects::{GrowingUnitId, LocationId, PlantId, SpeciesId};
use verdure_domain::DomainResult;

#[async_trait]
pub trait LocationViewRepository: Send + Sync {
    async fn find_by_id(&self, id: LocationId) -> DomainResult<Option<LocationViewModel>>;

    async fn find_by_criteria(
        &self,
        criteria: LocationCriteria,
    ) -> DomainResult<Paginated<LocationViewModel>>;

    async fn save(&self, view: LocationViewModel) -> DomainResult<()>;

    async fn delete(&self, id: LocationId) -> DomainResult<()>;
}

#[async_trait]
pub trait GrowingUnitViewRepository: Send + Sync {
    async fn find_by_id(&self, id: GrowingUnitId) -> DomainResult<Option<GrowingUnitViewModel>>;

    async fn find_by_criteria(
        &self,
        criteria: GrowingUnitCriteria,
    ) -> DomainResult<Paginated<GrowingUnitViewModel>>;

    /// All unit view models referencing the given location, used to refresh
    /// the embedded location snapshot.
    async fn list_by_location(
        &self,
        location_id: LocationId,
    ) -> DomainResult<Vec<GrowingUnitViewModel>>;

    async fn save(&self, view: GrowingUnitViewModel) -> DomainResult<()>;

    async fn delete(&self, id: GrowingUnitId) -> DomainResult<()>;
}

#[async_trait]
pub trait PlantViewRepository: Send + Sync {
    async fn find_by_id(&self, id: PlantId) -> DomainResult<Option<PlantViewModel>>;

    async fn find_by_criteria(
        &self,
        criteria: PlantCriteria,
    ) -> DomainResult<Paginated<PlantViewModel>>;

    async fn save(&self, view: PlantViewModel) -> DomainResult<()>;

    async fn delete(&self, id: PlantId) -> DomainResult<()>;
}

#[async_trait]
pub trait SpeciesViewRepository: Send + Sync {
    async fn find_by_id(&self, id: SpeciesId) -> DomainResult<Option<SpeciesViewModel>>;

    async fn find_by_criteria(
        &self,
        criteria: SpeciesCriteria,
    ) -> DomainResult<Paginated<SpeciesViewModel>>;

    async fn save(&self, view: SpeciesViewModel) -> DomainResult<()>;

    async fn delete(&self, id: SpeciesId) -> DomainResult<()>;
}
