//! Commands - Write operations that change system state
//!
//! A command carries pre-validated value-object fields: its constructor maps
//! raw transport primitives into value objects and fails with a typed
//! validation error before any handler runs.

mod growing_unit;
mod location;
mod plant;
mod species;

pub use growing_unit::{
    CreateGrowingUnitCommand, DeleteGrowingUnitCommand, UpdateGrowingUnitCommand,
};
pub use location::{CreateLocationCommand, DeleteLocationCommand, UpdateLocationCommand};
pub use plant::{
    ChangePlantStatusCommand, CreatePlantCommand, DeletePlantCommand, TransplantPlantCommand,
    UpdatePlantCommand,
};
pub use species::{CreateSpeciesCommand, DeleteSpeciesCommand, UpdateSpeciesCommand};
