//! Location aggregate root

use crate::events::{DomainEvent, EventPayload};
use crate::patch::FieldUpdate;
use crate::value_objects::{Description, EntityName, LocationId, LocationType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Creation properties for a [`Location`], already validated into value
/// objects by the command constructor.
#[derive(Debug, Clone)]
pub struct NewLocation {
    pub name: EntityName,
    pub kind: LocationType,
    pub description: Option<Description>,
}

/// A place where growing units live: a room, a balcony, a garden bed area.
#[derive(Debug, Clone)]
pub struct Location {
    id: LocationId,
    name: EntityName,
    kind: LocationType,
    description: Option<Description>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
    deleted: bool,
    events: SmallVec<[DomainEvent; 2]>,
}

impl Location {
    /// Factory: assign identity, stamp timestamps and record the Created
    /// event.
    pub fn create(name: EntityName, kind: LocationType, description: Option<Description>) -> Self {
        let now = Utc::now();
        let mut location = Self {
            id: LocationId::new(),
            name,
            kind,
            description,
            created_at: now,
            updated_at: now,
            version: 0,
            deleted: false,
            events: SmallVec::new(),
        };
        location.record(EventPayload::LocationCreated {
            location: location.snapshot(),
        });
        location
    }

    /// Apply a partial update. Omitted fields are unchanged; an explicit
    /// null clears a nullable field. Records one Updated event carrying
    /// only the changed keys.
    pub fn update(&mut self, update: LocationUpdate) {
        let mut patch = LocationPatch::default();

        if let Some(name) = update.name {
            patch.name = Some(name.as_str().to_owned());
            self.name = name;
        }
        if let Some(kind) = update.kind {
            patch.kind = Some(kind);
            self.kind = kind;
        }
        if !update.description.is_keep() {
            patch.description = update.description.as_ref().map(|d| d.as_str().to_owned());
            update.description.apply(&mut self.description);
        }

        self.touch();
        let location_id = self.id;
        self.record(EventPayload::LocationUpdated { location_id, patch });
    }

    /// Mark the aggregate for removal and record a Deleted event with a
    /// full snapshot; the read side has nothing else to diff against.
    pub fn delete(&mut self) {
        self.deleted = true;
        self.record(EventPayload::LocationDeleted {
            location: self.snapshot(),
        });
    }

    pub fn id(&self) -> LocationId {
        self.id
    }

    pub fn name(&self) -> &EntityName {
        &self.name
    }

    pub fn kind(&self) -> LocationType {
        self.kind
    }

    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
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

    pub fn snapshot(&self) -> LocationSnapshot {
        LocationSnapshot {
            id: self.id,
            name: self.name.as_str().to_owned(),
            kind: self.kind,
            description: self.description.as_ref().map(|d| d.as_str().to_owned()),
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

    fn record(&mut self, payload: EventPayload) {
        self.events.push(DomainEvent::record(payload));
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Partial update for a [`Location`].
#[derive(Debug, Clone, Default)]
pub struct LocationUpdate {
    pub name: Option<EntityName>,
    pub kind: Option<LocationType>,
    pub description: FieldUpdate<Description>,
}

/// Changed-fields payload of a LocationUpdated event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<LocationType>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub description: FieldUpdate<String>,
}

/// Full post-mutation state of a [`Location`], as primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSnapshot {
    pub id: LocationId,
    pub name: String,
    pub kind: LocationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
