//! Domain events
//!
//! Events are the only channel through which the read side learns about
//! write-side changes. Each event is an immutable envelope: a generated
//! unique id, the time it was recorded, and a payload drawn from the closed
//! [`EventPayload`] sum type. Created and Deleted payloads carry full
//! snapshots; Updated payloads carry partial patches with only the changed
//! fields.
//!
//! Plants are created and destroyed only through their owning growing unit,
//! so plant lifecycle events use the added/removed naming and always carry
//! the owning unit id as the aggregate id.

use crate::aggregates::{
    GrowingUnitPatch, GrowingUnitSnapshot, LocationPatch, LocationSnapshot, PlantPatch,
    PlantSnapshot, SpeciesPatch, SpeciesSnapshot,
};
use crate::value_objects::{EventId, GrowingUnitId, LocationId, PlantId, SpeciesId};
use crate::value_objects::PlantStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Immutable record of one write-side state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    id: EventId,
    occurred_at: DateTime<Utc>,
    #[serde(flatten)]
    payload: EventPayload,
}

impl DomainEvent {
    /// Record a new event, stamping a fresh id and the current time.
    pub fn record(payload: EventPayload) -> Self {
        Self {
            id: EventId::new(),
            occurred_at: Utc::now(),
            payload,
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    /// Id of the aggregate root this event belongs to.
    pub fn aggregate_id(&self) -> Uuid {
        self.payload.aggregate_id()
    }

    pub fn aggregate_kind(&self) -> AggregateKind {
        self.payload.aggregate_kind()
    }

    /// Id of the entity the event describes; differs from the aggregate id
    /// for plant events, where the aggregate is the owning unit.
    pub fn entity_id(&self) -> Uuid {
        self.payload.entity_id()
    }

    pub fn entity_kind(&self) -> EntityKind {
        self.payload.entity_kind()
    }
}

/// Closed sum type of every state change the write side can emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum EventPayload {
    LocationCreated {
        location: LocationSnapshot,
    },
    LocationUpdated {
        location_id: LocationId,
        patch: LocationPatch,
    },
    LocationDeleted {
        location: LocationSnapshot,
    },

    SpeciesCreated {
        species: SpeciesSnapshot,
    },
    SpeciesUpdated {
        species_id: SpeciesId,
        patch: SpeciesPatch,
    },
    SpeciesDeleted {
        species: SpeciesSnapshot,
    },

    GrowingUnitCreated {
        unit: GrowingUnitSnapshot,
    },
    GrowingUnitUpdated {
        unit_id: GrowingUnitId,
        patch: GrowingUnitPatch,
    },
    GrowingUnitDeleted {
        unit: GrowingUnitSnapshot,
    },

    PlantAdded {
        unit_id: GrowingUnitId,
        plant: PlantSnapshot,
    },
    PlantUpdated {
        unit_id: GrowingUnitId,
        plant_id: PlantId,
        patch: PlantPatch,
    },
    PlantRemoved {
        unit_id: GrowingUnitId,
        plant: PlantSnapshot,
    },
    PlantStatusChanged {
        unit_id: GrowingUnitId,
        plant_id: PlantId,
        previous: PlantStatus,
        status: PlantStatus,
    },
    PlantTransplanted {
        plant_id: PlantId,
        source_unit_id: GrowingUnitId,
        target_unit_id: GrowingUnitId,
    },
}

impl EventPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::LocationCreated { .. } => EventKind::LocationCreated,
            Self::LocationUpdated { .. } => EventKind::LocationUpdated,
            Self::LocationDeleted { .. } => EventKind::LocationDeleted,
            Self::SpeciesCreated { .. } => EventKind::SpeciesCreated,
            Self::SpeciesUpdated { .. } => EventKind::SpeciesUpdated,
            Self::SpeciesDeleted { .. } => EventKind::SpeciesDeleted,
            Self::GrowingUnitCreated { .. } => EventKind::GrowingUnitCreated,
            Self::GrowingUnitUpdated { .. } => EventKind::GrowingUnitUpdated,
            Self::GrowingUnitDeleted { .. } => EventKind::GrowingUnitDeleted,
            Self::PlantAdded { .. } => EventKind::PlantAdded,
            Self::PlantUpdated { .. } => EventKind::PlantUpdated,
            Self::PlantRemoved { .. } => EventKind::PlantRemoved,
            Self::PlantStatusChanged { .. } => EventKind::PlantStatusChanged,
            Self::PlantTransplanted { .. } => EventKind::PlantTransplanted,
        }
    }

    pub fn aggregate_id(&self) -> Uuid {
        match self {
            Self::LocationCreated { location } | Self::LocationDeleted { location } => {
                location.id.as_uuid()
            }
            Self::LocationUpdated { location_id, .. } => location_id.as_uuid(),
            Self::SpeciesCreated { species } | Self::SpeciesDeleted { species } => {
                species.id.as_uuid()
            }
            Self::SpeciesUpdated { species_id, .. } => species_id.as_uuid(),
            Self::GrowingUnitCreated { unit } | Self::GrowingUnitDeleted { unit } => {
                unit.id.as_uuid()
            }
            Self::GrowingUnitUpdated { unit_id, .. }
            | Self::PlantAdded { unit_id, .. }
            | Self::PlantUpdated { unit_id, .. }
            | Self::PlantRemoved { unit_id, .. }
            | Self::PlantStatusChanged { unit_id, .. } => unit_id.as_uuid(),
            Self::PlantTransplanted { target_unit_id, .. } => target_unit_id.as_uuid(),
        }
    }

    pub fn aggregate_kind(&self) -> AggregateKind {
        match self {
            Self::LocationCreated { .. }
            | Self::LocationUpdated { .. }
            | Self::LocationDeleted { .. } => AggregateKind::Location,
            Self::SpeciesCreated { .. }
            | Self::SpeciesUpdated { .. }
            | Self::SpeciesDeleted { .. } => AggregateKind::PlantSpecies,
            _ => AggregateKind::GrowingUnit,
        }
    }

    pub fn entity_id(&self) -> Uuid {
        match self {
            Self::PlantAdded { plant, .. } | Self::PlantRemoved { plant, .. } => {
                plant.id.as_uuid()
            }
            Self::PlantUpdated { plant_id, .. }
            | Self::PlantStatusChanged { plant_id, .. }
            | Self::PlantTransplanted { plant_id, .. } => plant_id.as_uuid(),
            other => other.aggregate_id(),
        }
    }

    pub fn entity_kind(&self) -> EntityKind {
        match self {
            Self::LocationCreated { .. }
            | Self::LocationUpdated { .. }
            | Self::LocationDeleted { .. } => EntityKind::Location,
            Self::SpeciesCreated { .. }
            | Self::SpeciesUpdated { .. }
            | Self::SpeciesDeleted { .. } => EntityKind::PlantSpecies,
            Self::GrowingUnitCreated { .. }
            | Self::GrowingUnitUpdated { .. }
            | Self::GrowingUnitDeleted { .. } => EntityKind::GrowingUnit,
            Self::PlantAdded { .. }
            | Self::PlantUpdated { .. }
            | Self::PlantRemoved { .. }
            | Self::PlantStatusChanged { .. }
            | Self::PlantTransplanted { .. } => EntityKind::Plant,
        }
    }
}

/// Discriminant of [`EventPayload`], used as the dispatch key of the
/// projector registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    LocationCreated,
    LocationUpdated,
    LocationDeleted,
    SpeciesCreated,
    SpeciesUpdated,
    SpeciesDeleted,
    GrowingUnitCreated,
    GrowingUnitUpdated,
    GrowingUnitDeleted,
    PlantAdded,
    PlantUpdated,
    PlantRemoved,
    PlantStatusChanged,
    PlantTransplanted,
}

impl EventKind {
    pub const ALL: [EventKind; 14] = [
        Self::LocationCreated,
        Self::LocationUpdated,
        Self::LocationDeleted,
        Self::SpeciesCreated,
        Self::SpeciesUpdated,
        Self::SpeciesDeleted,
        Self::GrowingUnitCreated,
        Self::GrowingUnitUpdated,
        Self::GrowingUnitDeleted,
        Self::PlantAdded,
        Self::PlantUpdated,
        Self::PlantRemoved,
        Self::PlantStatusChanged,
        Self::PlantTransplanted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LocationCreated => "location_created",
            Self::LocationUpdated => "location_updated",
            Self::LocationDeleted => "location_deleted",
            Self::SpeciesCreated => "species_created",
            Self::SpeciesUpdated => "species_updated",
            Self::SpeciesDeleted => "species_deleted",
            Self::GrowingUnitCreated => "growing_unit_created",
            Self::GrowingUnitUpdated => "growing_unit_updated",
            Self::GrowingUnitDeleted => "growing_unit_deleted",
            Self::PlantAdded => "plant_added",
            Self::PlantUpdated => "plant_updated",
            Self::PlantRemoved => "plant_removed",
            Self::PlantStatusChanged => "plant_status_changed",
            Self::PlantTransplanted => "plant_transplanted",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate roots of the write model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    Location,
    GrowingUnit,
    PlantSpecies,
}

/// Entities described by events; plants are entities owned by a growing
/// unit aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Location,
    GrowingUnit,
    Plant,
    PlantSpecies,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::Location;
    use crate::value_objects::{EntityName, LocationType};

    fn sample_location() -> Location {
        Location::create(
            EntityName::new("Living Room").unwrap(),
            LocationType::Room,
            None,
        )
    }

    #[test]
    fn envelope_carries_ids_and_kinds() {
        let location = sample_location();
        let event = DomainEvent::record(EventPayload::LocationCreated {
            location: location.snapshot(),
        });

        assert_eq!(event.kind(), EventKind::LocationCreated);
        assert_eq!(event.aggregate_id(), location.id().as_uuid());
        assert_eq!(event.entity_id(), location.id().as_uuid());
        assert_eq!(event.aggregate_kind(), AggregateKind::Location);
        assert_eq!(event.entity_kind(), EntityKind::Location);
    }

    #[test]
    fn event_ids_are_unique() {
        let location = sample_location();
        let a = DomainEvent::record(EventPayload::LocationCreated {
            location: location.snapshot(),
        });
        let b = DomainEvent::record(EventPayload::LocationCreated {
            location: location.snapshot(),
        });
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn plant_events_expose_owning_unit_as_aggregate() {
        let unit_id = GrowingUnitId::new();
        let plant_id = PlantId::new();
        let event = DomainEvent::record(EventPayload::PlantStatusChanged {
            unit_id,
            plant_id,
            previous: PlantStatus::Planted,
            status: PlantStatus::Growing,
        });

        assert_eq!(event.aggregate_id(), unit_id.as_uuid());
        assert_eq!(event.entity_id(), plant_id.as_uuid());
        assert_eq!(event.aggregate_kind(), AggregateKind::GrowingUnit);
        assert_eq!(event.entity_kind(), EntityKind::Plant);
    }

    #[test]
    fn serialization_tags_the_event_type() {
        let location = sample_location();
        let event = DomainEvent::record(EventPayload::LocationCreated {
            location: location.snapshot(),
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "location_created");

        let back: DomainEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
