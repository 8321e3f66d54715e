//! # verdure-core
//!
//! Command/event synchronization core of the verdure gardening tracker.
//!
//! Aggregates mutate state behind write-side repositories, emit domain
//! events, and projectors keep a denormalized read model eventually
//! consistent with the write model:
//!
//! ```text
//! Command -> CommandHandler -> WriteRepository (load)
//!         -> Aggregate (mutate, record event)
//!         -> WriteRepository (save, version-checked)
//!         -> EventPublisher (publish uncommitted events) -> commit
//!         -> Projector(s) -> ReadRepository (upsert/delete view model)
//! ```
//!
//! The write save and the read projection commit independently; readers can
//! observe stale data in the window between them. Projection failures are
//! retried and then dead-lettered, never propagated into the originating
//! command.

pub mod application;
pub mod bootstrap;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod projection;
pub mod read_model;

// Application layer exports
pub use application::{
    ApplicationError, ApplicationResult,
    handlers::{CommandHandler, QueryHandler},
};

// Ports
pub use ports::{
    EventHandler, EventPublisher, GrowingUnitRepository, GrowingUnitViewRepository,
    LocationRepository, LocationViewRepository, PlantViewRepository, SpeciesRepository,
    SpeciesViewRepository,
};

// Read model exports
pub use read_model::{
    GrowingUnitViewModel, LocationViewModel, Page, Paginated, PlantViewModel, SpeciesViewModel,
};

// Wiring
pub use bootstrap::CoreRuntime;
