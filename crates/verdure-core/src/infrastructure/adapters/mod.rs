//! Concrete adapters for the repository and event-publisher ports
//!
//! The in-memory stores stand in for the relational write store and the
//! document read store; the persistence drivers themselves are outside the
//! core's scope.

mod event_publisher;
mod memory_repositories;
mod memory_views;

pub use event_publisher::{DeadLetter, ProjectionPublisher};
pub use memory_repositories::{
    InMemoryGrowingUnitStore, InMemoryLocationStore, InMemorySpeciesStore,
};
pub use memory_views::{
    InMemoryGrowingUnitViews, InMemoryLocationViews, InMemoryPlantViews, InMemorySpeciesViews,
};
