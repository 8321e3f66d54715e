//! Aggregate roots - write-side consistency boundaries
//!
//! Aggregates are mutated only through their methods, enforce their own
//! invariants, and append one domain event per mutating operation to an
//! in-memory uncommitted-event list. Events must be published before
//! `commit()` clears the list.

mod growing_unit;
mod location;
mod plant;
mod plant_species;

pub use growing_unit::{GrowingUnit, GrowingUnitPatch, GrowingUnitSnapshot, GrowingUnitUpdate, NewGrowingUnit};
pub use location::{Location, LocationPatch, LocationSnapshot, LocationUpdate, NewLocation};
pub use plant::{NewPlant, Plant, PlantPatch, PlantSnapshot, PlantUpdate};
pub use plant_species::{NewSpecies, PlantSpecies, SpeciesPatch, SpeciesSnapshot, SpeciesUpdate};
