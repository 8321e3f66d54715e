//! Domain layer - Pure business logic
//!
//! Contains the aggregate roots, value objects and domain events of the
//! verdure gardening tracker. No dependencies on infrastructure concerns,
//! no I/O: everything in this crate is synchronous and self-validating.

pub mod aggregates;
pub mod events;
pub mod patch;
pub mod value_objects;

// Re-export core domain types
pub use aggregates::{GrowingUnit, Location, Plant, PlantSpecies};
pub use events::{AggregateKind, DomainEvent, EntityKind, EventKind, EventPayload};
pub use patch::FieldUpdate;
pub use value_objects::{
    Capacity, DayRange, Description, Dimensions, EntityName, EventId, GrowingUnitId,
    GrowingUnitKind, LocationId, LocationType, PhRange, PlantId, PlantStatus, SpeciesId,
};

/// Domain Result type
pub type DomainResult<T> = Result<T, DomainError>;

/// Validation errors raised by value object constructors.
///
/// Construction is the only validation point: invalid input fails here and
/// never produces a half-built value object.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyText { field: &'static str },

    #[error("{field} must be at most {max} characters, got {len}")]
    TextTooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },

    #[error("invalid {field}: `{value}` is not a version 4 UUID")]
    InvalidUuid { field: &'static str, value: String },

    #[error("invalid {field}: `{value}` is not one of {allowed:?}")]
    InvalidEnumValue {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("invalid {field}: min {min} must not exceed max {max}")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{field} {value} is outside {min}..={max}")]
    OutOfBounds {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a positive finite measurement, got {value}")]
    InvalidDimension { field: &'static str, value: f64 },

    #[error("invalid {field}: `{value}` is not an ISO date (YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },
}

/// Domain-specific errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("growing unit {unit_id} is full: capacity {capacity} reached")]
    CapacityExceeded {
        unit_id: GrowingUnitId,
        capacity: u32,
    },

    #[error(
        "capacity {requested} is below the current occupancy {occupancy} of growing unit {unit_id}"
    )]
    CapacityBelowOccupancy {
        unit_id: GrowingUnitId,
        requested: u32,
        occupancy: u32,
    },

    #[error("plant {plant_id} does not belong to growing unit {unit_id}")]
    PlantNotInUnit {
        plant_id: PlantId,
        unit_id: GrowingUnitId,
    },

    #[error("invalid plant status transition: {from} -> {to}")]
    InvalidStatusTransition { from: PlantStatus, to: PlantStatus },

    #[error("stale aggregate write: stored version {stored}, attempted {attempted}")]
    VersionConflict { stored: u64, attempted: u64 },

    #[error("storage error: {0}")]
    Storage(String),
}
