//! Ports - interfaces for external dependencies
//!
//! Contracts that infrastructure adapters must implement: the core's view
//! of what it needs from the outside world (Ports and Adapters pattern).

pub mod events;
pub mod repositories;
pub mod views;

pub use events::{EventHandler, EventPublisher};
pub use repositories::{GrowingUnitRepository, LocationRepository, SpeciesRepository};
pub use views::{
    GrowingUnitViewRepository, LocationViewRepository, PlantViewRepository, SpeciesViewRepository,
};
