//! Explicit dependency wiring
//!
//! One registry assembled at process start and passed by reference: every
//! store, handler and projector is constructed here, and the projector
//! registry of the event publisher is the single place deciding which
//! projector fires for which event kind. No container, no hidden global
//! state.

use crate::application::handlers::{
    GrowingUnitCommandHandler, GrowingUnitQueryHandler, LocationCommandHandler,
    LocationQueryHandler, PlantCommandHandler, PlantQueryHandler, SpeciesCommandHandler,
    SpeciesQueryHandler,
};
use crate::config::RetryPolicy;
use crate::infrastructure::adapters::{
    InMemoryGrowingUnitStore, InMemoryGrowingUnitViews, InMemoryLocationStore,
    InMemoryLocationViews, InMemoryPlantViews, InMemorySpeciesStore, InMemorySpeciesViews,
    ProjectionPublisher,
};
use crate::projection::{
    GrowingUnitProjector, LocationProjector, PlantProjector, SpeciesProjector,
};
use std::sync::Arc;

/// Fully wired core: stores, publisher with its projector registry, and one
/// handler per command/query family.
pub struct CoreRuntime {
    pub locations: Arc<InMemoryLocationStore>,
    pub units: Arc<InMemoryGrowingUnitStore>,
    pub species: Arc<InMemorySpeciesStore>,

    pub location_views: Arc<InMemoryLocationViews>,
    pub unit_views: Arc<InMemoryGrowingUnitViews>,
    pub plant_views: Arc<InMemoryPlantViews>,
    pub species_views: Arc<InMemorySpeciesViews>,

    pub publisher: Arc<ProjectionPublisher>,

    pub location_commands: LocationCommandHandler<InMemoryLocationStore, ProjectionPublisher>,
    pub unit_commands: GrowingUnitCommandHandler<
        InMemoryGrowingUnitStore,
        InMemoryLocationStore,
        ProjectionPublisher,
    >,
    pub plant_commands:
        PlantCommandHandler<InMemoryGrowingUnitStore, InMemorySpeciesStore, ProjectionPublisher>,
    pub species_commands: SpeciesCommandHandler<InMemorySpeciesStore, ProjectionPublisher>,

    pub location_queries: LocationQueryHandler<InMemoryLocationViews, InMemoryLocationStore>,
    pub unit_queries: GrowingUnitQueryHandler<InMemoryGrowingUnitViews, InMemoryGrowingUnitStore>,
    pub plant_queries: PlantQueryHandler<InMemoryPlantViews>,
    pub species_queries: SpeciesQueryHandler<InMemorySpeciesViews>,
}

impl CoreRuntime {
    /// Assemble the core with the default projection retry policy.
    pub fn bootstrap() -> Self {
        Self::with_retry(RetryPolicy::default())
    }

    /// Assemble the core with a custom projection retry policy.
    pub fn with_retry(retry: RetryPolicy) -> Self {
        let locations = Arc::new(InMemoryLocationStore::new());
        let units = Arc::new(InMemoryGrowingUnitStore::new());
        let species = Arc::new(InMemorySpeciesStore::new());

        let location_views = Arc::new(InMemoryLocationViews::new());
        let unit_views = Arc::new(InMemoryGrowingUnitViews::new());
        let plant_views = Arc::new(InMemoryPlantViews::new());
        let species_views = Arc::new(InMemorySpeciesViews::new());

        let mut publisher = ProjectionPublisher::new(retry);
        publisher.register(Arc::new(LocationProjector::new(
            locations.clone(),
            location_views.clone(),
            unit_views.clone(),
        )));
        publisher.register(Arc::new(GrowingUnitProjector::new(
            units.clone(),
            locations.clone(),
            unit_views.clone(),
        )));
        publisher.register(Arc::new(PlantProjector::new(
            units.clone(),
            plant_views.clone(),
        )));
        publisher.register(Arc::new(SpeciesProjector::new(
            species.clone(),
            species_views.clone(),
        )));
        let publisher = Arc::new(publisher);

        Self {
            location_commands: LocationCommandHandler::new(locations.clone(), publisher.clone()),
            unit_commands: GrowingUnitCommandHandler::new(
                units.clone(),
                locations.clone(),
                publisher.clone(),
            ),
            plant_commands: PlantCommandHandler::new(
                units.clone(),
                species.clone(),
                publisher.clone(),
            ),
            species_commands: SpeciesCommandHandler::new(species.clone(), publisher.clone()),

            location_queries: LocationQueryHandler::new(location_views.clone(), locations.clone()),
            unit_queries: GrowingUnitQueryHandler::new(unit_views.clone(), units.clone()),
            plant_queries: PlantQueryHandler::new(plant_views.clone()),
            species_queries: SpeciesQueryHandler::new(species_views.clone()),

            locations,
            units,
            species,
            location_views,
            unit_views,
            plant_views,
            species_views,
            publisher,
        }
    }
}

impl Default for CoreRuntime {
    fn default() -> Self {
        Self::bootstrap()
    }
}
