//! Growing unit aggregate root
//!
//! The unit owns its plants (composition): every plant mutation goes
//! through the unit, which enforces the capacity invariant and records the
//! events. Deleting a unit deletes its plants.

use crate::events::{DomainEvent, EventPayload};
use crate::patch::FieldUpdate;
use crate::value_objects::{
    Capacity, Description, Dimensions, EntityName, GrowingUnitId, GrowingUnitKind, LocationId,
    PlantId, PlantStatus,
};
use crate::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::plant::{NewPlant, Plant, PlantSnapshot, PlantUpdate};

/// Creation properties for a [`GrowingUnit`], already validated into value
/// objects by the command constructor.
#[derive(Debug, Clone)]
pub struct NewGrowingUnit {
    pub name: EntityName,
    pub kind: GrowingUnitKind,
    pub location_id: Option<LocationId>,
    pub capacity: Capacity,
    pub dimensions: Option<Dimensions>,
    pub description: Option<Description>,
}

/// A container or bed holding plants, optionally assigned to a location.
#[derive(Debug, Clone)]
pub struct GrowingUnit {
    id: GrowingUnitId,
    name: EntityName,
    kind: GrowingUnitKind,
    location_id: Option<LocationId>,
    capacity: Capacity,
    dimensions: Option<Dimensions>,
    description: Option<Description>,
    plants: Vec<Plant>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
    deleted: bool,
    events: SmallVec<[DomainEvent; 2]>,
}

impl GrowingUnit {
    /// Factory: assign identity, stamp timestamps and record the Created
    /// event.
    pub fn create(props: NewGrowingUnit) -> Self {
        let now = Utc::now();
        let mut unit = Self {
            id: GrowingUnitId::new(),
            name: props.name,
            kind: props.kind,
            location_id: props.location_id,
            capacity: props.capacity,
            dimensions: props.dimensions,
            description: props.description,
            plants: Vec::new(),
            created_at: now,
            updated_at: now,
            version: 0,
            deleted: false,
            events: SmallVec::new(),
        };
        unit.record(EventPayload::GrowingUnitCreated {
            unit: unit.snapshot(),
        });
        unit
    }

    /// Apply a partial update. The capacity may not be lowered below the
    /// current occupancy. Records one Updated event carrying only the
    /// changed keys.
    pub fn update(&mut self, update: GrowingUnitUpdate) -> DomainResult<()> {
        if let Some(capacity) = update.capacity
            && (capacity.get() as usize) < self.plants.len()
        {
            return Err(DomainError::CapacityBelowOccupancy {
                unit_id: self.id,
                requested: capacity.get(),
                occupancy: self.plants.len() as u32,
            });
        }

        let mut patch = GrowingUnitPatch::default();

        if let Some(name) = update.name {
            patch.name = Some(name.as_str().to_owned());
            self.name = name;
        }
        if let Some(kind) = update.kind {
            patch.kind = Some(kind);
            self.kind = kind;
        }
        if !update.location_id.is_keep() {
            patch.location_id = update.location_id;
            update.location_id.apply(&mut self.location_id);
        }
        if let Some(capacity) = update.capacity {
            patch.capacity = Some(capacity.get());
            self.capacity = capacity;
        }
        if !update.dimensions.is_keep() {
            patch.dimensions = update.dimensions;
            update.dimensions.apply(&mut self.dimensions);
        }
        if !update.description.is_keep() {
            patch.description = update.description.as_ref().map(|d| d.as_str().to_owned());
            update.description.apply(&mut self.description);
        }

        self.touch();
        let unit_id = self.id;
        self.record(EventPayload::GrowingUnitUpdated { unit_id, patch });
        Ok(())
    }

    /// Mark the aggregate for removal and record a Deleted event with a
    /// full snapshot, including the owned plants so the read side can
    /// cascade.
    pub fn delete(&mut self) {
        self.deleted = true;
        self.record(EventPayload::GrowingUnitDeleted {
            unit: self.snapshot(),
        });
    }

    /// Add a new plant, enforcing the capacity invariant. Returns the new
    /// plant's id.
    pub fn add_plant(&mut self, props: NewPlant) -> DomainResult<PlantId> {
        self.ensure_free_slot()?;

        let plant = Plant::new(self.id, props);
        let plant_id = plant.id();
        let unit_id = self.id;
        self.record(EventPayload::PlantAdded {
            unit_id,
            plant: plant.snapshot(),
        });
        self.plants.push(plant);
        self.touch();
        Ok(plant_id)
    }

    /// Apply a partial update to an owned plant.
    pub fn update_plant(&mut self, plant_id: PlantId, update: PlantUpdate) -> DomainResult<()> {
        let unit_id = self.id;
        let plant = self.plant_mut(plant_id)?;
        let patch = plant.apply_update(update);
        self.record(EventPayload::PlantUpdated {
            unit_id,
            plant_id,
            patch,
        });
        Ok(())
    }

    /// Move an owned plant through the status transition table.
    pub fn change_plant_status(&mut self, plant_id: PlantId, next: PlantStatus) -> DomainResult<()> {
        let unit_id = self.id;
        let plant = self.plant_mut(plant_id)?;
        let previous = plant.change_status(next)?;
        self.record(EventPayload::PlantStatusChanged {
            unit_id,
            plant_id,
            previous,
            status: next,
        });
        Ok(())
    }

    /// Remove an owned plant, recording a Removed event with a full
    /// snapshot. Returns the removed plant.
    pub fn remove_plant(&mut self, plant_id: PlantId) -> DomainResult<Plant> {
        let index = self.plant_index(plant_id)?;
        let plant = self.plants.remove(index);
        let unit_id = self.id;
        self.record(EventPayload::PlantRemoved {
            unit_id,
            plant: plant.snapshot(),
        });
        self.touch();
        Ok(plant)
    }

    /// Detach a plant for a transplant without recording an event; the
    /// receiving unit records the single PlantTransplanted event naming
    /// both units.
    pub fn release_for_transplant(&mut self, plant_id: PlantId) -> DomainResult<Plant> {
        let index = self.plant_index(plant_id)?;
        let plant = self.plants.remove(index);
        self.touch();
        Ok(plant)
    }

    /// Receive a plant released from `source`, enforcing the capacity
    /// invariant and recording the PlantTransplanted event.
    pub fn receive_transplant(
        &mut self,
        mut plant: Plant,
        source_unit_id: GrowingUnitId,
    ) -> DomainResult<()> {
        self.ensure_free_slot()?;

        plant.reassign(self.id);
        let payload = EventPayload::PlantTransplanted {
            plant_id: plant.id(),
            source_unit_id,
            target_unit_id: self.id,
        };
        self.plants.push(plant);
        self.record(payload);
        self.touch();
        Ok(())
    }

    pub fn id(&self) -> GrowingUnitId {
        self.id
    }

    pub fn name(&self) -> &EntityName {
        &self.name
    }

    pub fn kind(&self) -> GrowingUnitKind {
        self.kind
    }

    pub fn location_id(&self) -> Option<LocationId> {
        self.location_id
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dimensions
    }

    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn plant(&self, plant_id: PlantId) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id() == plant_id)
    }

    /// Number of plants currently occupying slots.
    pub fn occupancy(&self) -> u32 {
        self.plants.len() as u32
    }

    pub fn remaining_capacity(&self) -> u32 {
        self.capacity.get().saturating_sub(self.occupancy())
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Optimistic concurrency stamp of the loaded row.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Set the concurrency stamp. Called by repositories when persisting.
    pub fn stamp_version(&mut self, version: u64) {
        self.version = version;
    }

    pub fn snapshot(&self) -> GrowingUnitSnapshot {
        GrowingUnitSnapshot {
            id: self.id,
            name: self.name.as_str().to_owned(),
            kind: self.kind,
            location_id: self.location_id,
            capacity: self.capacity.get(),
            dimensions: self.dimensions,
            description: self.description.as_ref().map(|d| d.as_str().to_owned()),
            plants: self.plants.iter().map(Plant::snapshot).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Events recorded since the last commit, in append order.
    pub fn uncommitted_events(&self) -> &[DomainEvent] {
        &self.events
    }

    /// Clear the uncommitted-event list. Must be called only after the
    /// events have been handed to the publisher.
    pub fn commit(&mut self) {
        self.events.clear();
    }

    fn ensure_free_slot(&self) -> DomainResult<()> {
        if self.plants.len() >= self.capacity.get() as usize {
            return Err(DomainError::CapacityExceeded {
                unit_id: self.id,
                capacity: self.capacity.get(),
            });
        }
        Ok(())
    }

    fn plant_index(&self, plant_id: PlantId) -> DomainResult<usize> {
        self.plants
            .iter()
            .position(|p| p.id() == plant_id)
            .ok_or(DomainError::PlantNotInUnit {
                plant_id,
                unit_id: self.id,
            })
    }

    fn plant_mut(&mut self, plant_id: PlantId) -> DomainResult<&mut Plant> {
        let unit_id = self.id;
        self.plants
            .iter_mut()
            .find(|p| p.id() == plant_id)
            .ok_or(DomainError::PlantNotInUnit { plant_id, unit_id })
    }

    fn record(&mut self, payload: EventPayload) {
        self.events.push(DomainEvent::record(payload));
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Partial update for a [`GrowingUnit`].
#[derive(Debug, Clone, Default)]
pub struct GrowingUnitUpdate {
    pub name: Option<EntityName>,
    pub kind: Option<GrowingUnitKind>,
    pub location_id: FieldUpdate<LocationId>,
    pub capacity: Option<Capacity>,
    pub dimensions: FieldUpdate<Dimensions>,
    pub description: FieldUpdate<Description>,
}

/// Changed-fields payload of a GrowingUnitUpdated event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GrowingUnitPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<GrowingUnitKind>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub location_id: FieldUpdate<LocationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub dimensions: FieldUpdate<Dimensions>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub description: FieldUpdate<String>,
}

/// Full post-mutation state of a [`GrowingUnit`], as primitives, including
/// the owned plants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowingUnitSnapshot {
    pub id: GrowingUnitId,
    pub name: String,
    pub kind: GrowingUnitKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    pub capacity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub plants: Vec<PlantSnapshot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
