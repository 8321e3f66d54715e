//! Read model - denormalized, query-optimized projections
//!
//! View models are a pure function of the committed event sequence of their
//! aggregate; the read side computes no invariants and trusts the write
//! side.

pub mod criteria;
pub mod view_models;

pub use criteria::{
    GrowingUnitCriteria, LocationCriteria, Page, Paginated, PlantCriteria, SortField, SortOrder,
    SortSpec, SpeciesCriteria,
};
pub use view_models::{
    GrowingUnitViewModel, LocationViewModel, PlantViewModel, SpeciesViewModel,
};
