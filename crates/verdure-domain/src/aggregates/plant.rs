//! Plant entity
//!
//! Plants are child entities of a growing unit (composition): they are
//! created, mutated and removed only through the owning unit's methods,
//! which record the corresponding events, and are never independently
//! persisted.

use crate::patch::FieldUpdate;
use crate::value_objects::{
    Description, EntityName, GrowingUnitId, PlantId, PlantStatus, SpeciesId,
};
use crate::{DomainError, DomainResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Creation properties for a [`Plant`], already validated into value
/// objects by the command constructor.
#[derive(Debug, Clone)]
pub struct NewPlant {
    pub name: EntityName,
    pub species_id: Option<SpeciesId>,
    pub status: PlantStatus,
    pub planted_on: Option<NaiveDate>,
    pub notes: Option<Description>,
}

/// A single plant growing inside a unit.
#[derive(Debug, Clone)]
pub struct Plant {
    id: PlantId,
    name: EntityName,
    species_id: Option<SpeciesId>,
    growing_unit_id: GrowingUnitId,
    status: PlantStatus,
    planted_on: Option<NaiveDate>,
    notes: Option<Description>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Plant {
    pub(crate) fn new(growing_unit_id: GrowingUnitId, props: NewPlant) -> Self {
        let now = Utc::now();
        Self {
            id: PlantId::new(),
            name: props.name,
            species_id: props.species_id,
            growing_unit_id,
            status: props.status,
            planted_on: props.planted_on,
            notes: props.notes,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> PlantId {
        self.id
    }

    pub fn name(&self) -> &EntityName {
        &self.name
    }

    pub fn species_id(&self) -> Option<SpeciesId> {
        self.species_id
    }

    pub fn growing_unit_id(&self) -> GrowingUnitId {
        self.growing_unit_id
    }

    pub fn status(&self) -> PlantStatus {
        self.status
    }

    pub fn planted_on(&self) -> Option<NaiveDate> {
        self.planted_on
    }

    pub fn notes(&self) -> Option<&Description> {
        self.notes.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply a partial update and return the changed-fields patch.
    pub(crate) fn apply_update(&mut self, update: PlantUpdate) -> PlantPatch {
        let mut patch = PlantPatch::default();

        if let Some(name) = update.name {
            patch.name = Some(name.as_str().to_owned());
            self.name = name;
        }
        if !update.species_id.is_keep() {
            patch.species_id = update.species_id;
            update.species_id.apply(&mut self.species_id);
        }
        if !update.planted_on.is_keep() {
            patch.planted_on = update.planted_on;
            update.planted_on.apply(&mut self.planted_on);
        }
        if !update.notes.is_keep() {
            patch.notes = update.notes.as_ref().map(|n| n.as_str().to_owned());
            update.notes.apply(&mut self.notes);
        }

        self.updated_at = Utc::now();
        patch
    }

    /// Move to `next` if the transition table allows it; returns the
    /// previous status.
    pub(crate) fn change_status(&mut self, next: PlantStatus) -> DomainResult<PlantStatus> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        let previous = self.status;
        self.status = next;
        self.updated_at = Utc::now();
        Ok(previous)
    }

    /// Point this plant at a new owning unit during a transplant.
    pub(crate) fn reassign(&mut self, growing_unit_id: GrowingUnitId) {
        self.growing_unit_id = growing_unit_id;
        self.updated_at = Utc::now();
    }

    pub fn snapshot(&self) -> PlantSnapshot {
        PlantSnapshot {
            id: self.id,
            name: self.name.as_str().to_owned(),
            species_id: self.species_id,
            growing_unit_id: self.growing_unit_id,
            status: self.status,
            planted_on: self.planted_on,
            notes: self.notes.as_ref().map(|n| n.as_str().to_owned()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Partial update for a [`Plant`]. Status changes go through the owning
/// unit's `change_plant_status`, never through an update.
#[derive(Debug, Clone, Default)]
pub struct PlantUpdate {
    pub name: Option<EntityName>,
    pub species_id: FieldUpdate<SpeciesId>,
    pub planted_on: FieldUpdate<NaiveDate>,
    pub notes: FieldUpdate<Description>,
}

/// Changed-fields payload of a PlantUpdated event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlantPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub species_id: FieldUpdate<SpeciesId>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub planted_on: FieldUpdate<NaiveDate>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub notes: FieldUpdate<String>,
}

/// Full post-mutation state of a [`Plant`], as primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantSnapshot {
    pub id: PlantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species_id: Option<SpeciesId>,
    pub growing_unit_id: GrowingUnitId,
    pub status: PlantStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planted_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
