//! Application layer - Use cases and orchestration
//!
//! Implements the CQRS pattern with separate command and query handlers.
//! Commands validate their inputs into value objects at construction time;
//! handlers orchestrate one use case each.

pub mod commands;
pub mod handlers;
pub mod queries;
pub mod services;

use verdure_domain::value_objects::{GrowingUnitId, LocationId, PlantId, SpeciesId};
use verdure_domain::DomainError;

/// Application Result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Application-specific errors
///
/// Not-found variants are raised by the assert-exists services and carry the
/// missing id; transport maps them to 404-equivalents.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("location {0} not found")]
    LocationNotFound(LocationId),

    #[error("growing unit {0} not found")]
    GrowingUnitNotFound(GrowingUnitId),

    #[error("plant {0} not found")]
    PlantNotFound(PlantId),

    #[error("plant species {0} not found")]
    SpeciesNotFound(SpeciesId),
}
