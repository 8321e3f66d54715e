//! Projectors - event handlers that maintain the read model
//!
//! Each projector subscribes to the event kinds of one view model
//! collection. For created/updated events it re-fetches the full current
//! aggregate from the write side (partial event payloads are insufficient
//! to rebuild a complete view model, e.g. the embedded location data) and
//! upserts the rebuilt view; for deleted events it removes the view.
//! Rebuild-and-upsert makes re-processing the same event idempotent.

mod growing_unit;
mod location;
mod plant;
mod species;

pub use growing_unit::GrowingUnitProjector;
pub use location::LocationProjector;
pub use plant::PlantProjector;
pub use species::SpeciesProjector;
