//! Query handlers for read operations
//!
//! Read-path queries are served entirely from the read store and return
//! view models. The narrow write-path aggregate queries go through the
//! assert-exists services and return the full aggregate.

use crate::{
    application::{
        ApplicationError, ApplicationResult,
        handlers::QueryHandler,
        queries::*,
        services::{AssertGrowingUnitExists, AssertLocationExists},
    },
    ports::{
        GrowingUnitRepository, GrowingUnitViewRepository, LocationRepository,
        LocationViewRepository, PlantViewRepository, SpeciesViewRepository,
    },
    read_model::{
        GrowingUnitViewModel, LocationViewModel, Paginated, PlantViewModel, SpeciesViewModel,
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use verdure_domain::aggregates::{GrowingUnit, Location};

/// Handler for location queries
#[derive(Debug)]
pub struct LocationQueryHandler<V, R>
where
    V: LocationViewRepository,
    R: LocationRepository,
{
    views: Arc<V>,
    assert_exists: AssertLocationExists<R>,
}

impl<V, R> LocationQueryHandler<V, R>
where
    V: LocationViewRepository,
    R: LocationRepository,
{
    pub fn new(views: Arc<V>, repository: Arc<R>) -> Self {
        Self {
            views,
            assert_exists: AssertLocationExists::new(repository),
        }
    }
}

#[async_trait]
impl<V, R> QueryHandler<FindLocationByIdQuery, LocationViewModel> for LocationQueryHandler<V, R>
where
    V: LocationViewRepository,
    R: LocationRepository,
{
    async fn handle(&self, query: FindLocationByIdQuery) -> ApplicationResult<LocationViewModel> {
        self.views
            .find_by_id(query.id)
            .await?
            .ok_or(ApplicationError::LocationNotFound(query.id))
    }
}

#[async_trait]
impl<V, R> QueryHandler<SearchLocationsQuery, Paginated<LocationViewModel>>
    for LocationQueryHandler<V, R>
where
    V: LocationViewRepository,
    R: LocationRepository,
{
    async fn handle(
        &self,
        query: SearchLocationsQuery,
    ) -> ApplicationResult<Paginated<LocationViewModel>> {
        Ok(self.views.find_by_criteria(query.criteria).await?)
    }
}

#[async_trait]
impl<V, R> QueryHandler<GetLocationAggregateQuery, Location> for LocationQueryHandler<V, R>
where
    V: LocationViewRepository,
    R: LocationRepository,
{
    async fn handle(&self, query: GetLocationAggregateQuery) -> ApplicationResult<Location> {
        self.assert_exists.execute(query.id).await
    }
}

/// Handler for growing unit queries
#[derive(Debug)]
pub struct GrowingUnitQueryHandler<V, U>
where
    V: GrowingUnitViewRepository,
    U: GrowingUnitRepository,
{
    views: Arc<V>,
    assert_exists: AssertGrowingUnitExists<U>,
}

impl<V, U> GrowingUnitQueryHandler<V, U>
where
    V: GrowingUnitViewRepository,
    U: GrowingUnitRepository,
{
    pub fn new(views: Arc<V>, repository: Arc<U>) -> Self {
        Self {
            views,
            assert_exists: AssertGrowingUnitExists::new(repository),
        }
    }
}

#[async_trait]
impl<V, U> QueryHandler<FindGrowingUnitByIdQuery, GrowingUnitViewModel>
    for GrowingUnitQueryHandler<V, U>
where
    V: GrowingUnitViewRepository,
    U: GrowingUnitRepository,
{
    async fn handle(
        &self,
        query: FindGrowingUnitByIdQuery,
    ) -> ApplicationResult<GrowingUnitViewModel> {
        self.views
            .find_by_id(query.id)
            .await?
            .ok_or(ApplicationError::GrowingUnitNotFound(query.id))
    }
}

#[async_trait]
impl<V, U> QueryHandler<SearchGrowingUnitsQuery, Paginated<GrowingUnitViewModel>>
    for GrowingUnitQueryHandler<V, U>
where
    V: GrowingUnitViewRepository,
    U: GrowingUnitRepository,
{
    async fn handle(
        &self,
        query: SearchGrowingUnitsQuery,
    ) -> ApplicationResult<Paginated<GrowingUnitViewModel>> {
        Ok(self.views.find_by_criteria(query.criteria).await?)
    }
}

#[async_trait]
impl<V, U> QueryHandler<GetGrowingUnitAggregateQuery, GrowingUnit>
    for GrowingUnitQueryHandler<V, U>
where
    V: GrowingUnitViewRepository,
    U: GrowingUnitRepository,
{
    async fn handle(&self, query: GetGrowingUnitAggregateQuery) -> ApplicationResult<GrowingUnit> {
        self.assert_exists.execute(query.id).await
    }
}

/// Handler for plant queries
#[derive(Debug)]
pub struct PlantQueryHandler<V>
where
    V: PlantViewRepository,
{
    views: Arc<V>,
}

impl<V> PlantQueryHandler<V>
where
    V: PlantViewRepository,
{
    pub fn new(views: Arc<V>) -> Self {
        Self { views }
    }
}

#[async_trait]
impl<V> QueryHandler<FindPlantByIdQuery, PlantViewModel> for PlantQueryHandler<V>
where
    V: PlantViewRepository,
{
    async fn handle(&self, query: FindPlantByIdQuery) -> ApplicationResult<PlantViewModel> {
        self.views
            .find_by_id(query.id)
            .await?
            .ok_or(ApplicationError::PlantNotFound(query.id))
    }
}

#[async_trait]
impl<V> QueryHandler<SearchPlantsQuery, Paginated<PlantViewModel>> for PlantQueryHandler<V>
where
    V: PlantViewRepository,
{
    async fn handle(
        &self,
        query: SearchPlantsQuery,
    ) -> ApplicationResult<Paginated<PlantViewModel>> {
        Ok(self.views.find_by_criteria(query.criteria).await?)
    }
}

/// Handler for species queries
#[derive(Debug)]
pub struct SpeciesQueryHandler<V>
where
    V: SpeciesViewRepository,
{
    views: Arc<V>,
}

impl<V> SpeciesQueryHandler<V>
where
    V: SpeciesViewRepository,
{
    pub fn new(views: Arc<V>) -> Self {
        Self { views }
    }
}

#[async_trait]
impl<V> QueryHandler<FindSpeciesByIdQuery, SpeciesViewModel> for SpeciesQueryHandler<V>
where
    V: SpeciesViewRepository,
{
    async fn handle(&self, query: FindSpeciesByIdQuery) -> ApplicationResult<SpeciesViewModel> {
        self.views
            .find_by_id(query.id)
            .await?
            .ok_or(ApplicationError::SpeciesNotFound(query.id))
    }
}

#[async_trait]
impl<V> QueryHandler<SearchSpeciesQuery, Paginated<SpeciesViewModel>> for SpeciesQueryHandler<V>
where
    V: SpeciesViewRepository,
{
    async fn handle(
        &self,
        query: SearchSpeciesQuery,
    ) -> ApplicationResult<Paginated<SpeciesViewModel>> {
        Ok(self.views.find_by_criteria(query.criteria).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{InMemoryLocationStore, InMemoryLocationViews};
    use verdure_domain::value_objects::{EntityName, LocationId, LocationType};

    fn handler() -> (
        Arc<InMemoryLocationViews>,
        Arc<InMemoryLocationStore>,
        LocationQueryHandler<InMemoryLocationViews, InMemoryLocationStore>,
    ) {
        let views = Arc::new(InMemoryLocationViews::new());
        let repository = Arc::new(InMemoryLocationStore::new());
        let handler = LocationQueryHandler::new(views.clone(), repository.clone());
        (views, repository, handler)
    }

    #[tokio::test]
    async fn find_by_id_returns_the_view_model() {
        let (views, _, handler) = handler();
        let location = Location::create(
            EntityName::new("Garden").unwrap(),
            LocationType::Garden,
            None,
        );
        let view = LocationViewModel::from_aggregate(&location);
        views.save(view.clone()).await.unwrap();

        let found = handler
            .handle(FindLocationByIdQuery { id: view.id })
            .await
            .unwrap();
        assert_eq!(found, view);
    }

    #[tokio::test]
    async fn find_by_id_of_missing_view_is_a_typed_not_found() {
        let (_, _, handler) = handler();
        let id = LocationId::new();

        let err = handler
            .handle(FindLocationByIdQuery { id })
            .await
            .unwrap_err();
        assert_eq!(err, ApplicationError::LocationNotFound(id));
    }

    #[tokio::test]
    async fn aggregate_query_reads_the_write_side() {
        let (_, repository, handler) = handler();
        let location = Location::create(
            EntityName::new("Greenhouse").unwrap(),
            LocationType::Greenhouse,
            None,
        );
        let id = location.id();
        repository.save(location).await.unwrap();

        let aggregate = handler
            .handle(GetLocationAggregateQuery { id })
            .await
            .unwrap();
        assert_eq!(aggregate.id(), id);
        assert_eq!(aggregate.name().as_str(), "Greenhouse");
    }
}
