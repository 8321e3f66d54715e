//! Plant species aggregate root

use crate::events::{DomainEvent, EventPayload};
use crate::patch::FieldUpdate;
use crate::value_objects::{DayRange, Description, EntityName, PhRange, SpeciesId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Creation properties for a [`PlantSpecies`], already validated into
/// value objects by the command constructor.
#[derive(Debug, Clone)]
pub struct NewSpecies {
    pub name: EntityName,
    pub scientific_name: Option<EntityName>,
    pub optimal_ph: Option<PhRange>,
    pub germination: Option<DayRange>,
    pub description: Option<Description>,
}

/// Reference profile of a species plants can be linked to.
#[derive(Debug, Clone)]
pub struct PlantSpecies {
    id: SpeciesId,
    name: EntityName,
    scientific_name: Option<EntityName>,
    optimal_ph: Option<PhRange>,
    germination: Option<DayRange>,
    description: Option<Description>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
    deleted: bool,
    events: SmallVec<[DomainEvent; 2]>,
}

impl PlantSpecies {
    /// Factory: assign identity, stamp timestamps and record the Created
    /// event.
    pub fn create(props: NewSpecies) -> Self {
        let now = Utc::now();
        let mut species = Self {
            id: SpeciesId::new(),
            name: props.name,
            scientific_name: props.scientific_name,
            optimal_ph: props.optimal_ph,
            germination: props.germination,
            description: props.description,
            created_at: now,
            updated_at: now,
            version: 0,
            deleted: false,
            events: SmallVec::new(),
        };
        species.record(EventPayload::SpeciesCreated {
            species: species.snapshot(),
        });
        species
    }

    /// Apply a partial update. Records one Updated event carrying only the
    /// changed keys.
    pub fn update(&mut self, update: SpeciesUpdate) {
        let mut patch = SpeciesPatch::default();

        if let Some(name) = update.name {
            patch.name = Some(name.as_str().to_owned());
            self.name = name;
        }
        if !update.scientific_name.is_keep() {
            patch.scientific_name = update
                .scientific_name
                .as_ref()
                .map(|n| n.as_str().to_owned());
            update.scientific_name.apply(&mut self.scientific_name);
        }
        if !update.optimal_ph.is_keep() {
            patch.optimal_ph = update.optimal_ph;
            update.optimal_ph.apply(&mut self.optimal_ph);
        }
        if !update.germination.is_keep() {
            patch.germination = update.germination;
            update.germination.apply(&mut self.germination);
        }
        if !update.description.is_keep() {
            patch.description = update.description.as_ref().map(|d| d.as_str().to_owned());
            update.description.apply(&mut self.description);
        }

        self.touch();
        let species_id = self.id;
        self.record(EventPayload::SpeciesUpdated { species_id, patch });
    }

    /// Mark the aggregate for removal and record a Deleted event with a
    /// full snapshot.
    pub fn delete(&mut self) {
        self.deleted = true;
        self.record(EventPayload::SpeciesDeleted {
            species: self.snapshot(),
        });
    }

    pub fn id(&self) -> SpeciesId {
        self.id
    }

    pub fn name(&self) -> &EntityName {
        &self.name
    }

    pub fn scientific_name(&self) -> Option<&EntityName> {
        self.scientific_name.as_ref()
    }

    pub fn optimal_ph(&self) -> Option<PhRange> {
        self.optimal_ph
    }

    pub fn germination(&self) -> Option<DayRange> {
        self.germination
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

    pub fn snapshot(&self) -> SpeciesSnapshot {
        SpeciesSnapshot {
            id: self.id,
            name: self.name.as_str().to_owned(),
            scientific_name: self.scientific_name.as_ref().map(|n| n.as_str().to_owned()),
            optimal_ph: self.optimal_ph,
            germination: self.germination,
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

/// Partial update for a [`PlantSpecies`].
#[derive(Debug, Clone, Default)]
pub struct SpeciesUpdate {
    pub name: Option<EntityName>,
    pub scientific_name: FieldUpdate<EntityName>,
    pub optimal_ph: FieldUpdate<PhRange>,
    pub germination: FieldUpdate<DayRange>,
    pub description: FieldUpdate<Description>,
}

/// Changed-fields payload of a SpeciesUpdated event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpeciesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub scientific_name: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub optimal_ph: FieldUpdate<PhRange>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub germination: FieldUpdate<DayRange>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_keep")]
    pub description: FieldUpdate<String>,
}

/// Full post-mutation state of a [`PlantSpecies`], as primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesSnapshot {
    pub id: SpeciesId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimal_ph: Option<PhRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub germination: Option<DayRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    fn basil_species() -> PlantSpecies {
        PlantSpecies::create(NewSpecies {
            name: EntityName::new("Basil").unwrap(),
            scientific_name: Some(EntityName::new("Ocimum basilicum").unwrap()),
            optimal_ph: Some(PhRange::new(5.5, 6.5).unwrap()),
            germination: Some(DayRange::new(5, 10).unwrap()),
            description: None,
        })
    }

    #[test]
    fn create_records_exactly_one_created_event() {
        let species = basil_species();
        let events = species.uncommitted_events();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::SpeciesCreated);
    }

    #[test]
    fn update_emits_patch_with_changed_keys_only() {
        let mut species = basil_species();
        species.commit();

        species.update(SpeciesUpdate {
            optimal_ph: FieldUpdate::Set(PhRange::new(6.0, 7.0).unwrap()),
            scientific_name: FieldUpdate::Clear,
            ..Default::default()
        });

        assert!(species.scientific_name().is_none());
        assert_eq!(species.optimal_ph().unwrap().min(), 6.0);

        match species.uncommitted_events()[0].payload() {
            EventPayload::SpeciesUpdated { patch, .. } => {
                assert!(patch.name.is_none());
                assert_eq!(patch.scientific_name, FieldUpdate::Clear);
                assert!(matches!(patch.optimal_ph, FieldUpdate::Set(_)));
                assert!(patch.germination.is_keep());
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn delete_records_full_snapshot() {
        let mut species = basil_species();
        species.commit();

        species.delete();

        match species.uncommitted_events()[0].payload() {
            EventPayload::SpeciesDeleted { species: snapshot } => {
                assert_eq!(snapshot.name, "Basil");
                assert_eq!(snapshot.scientific_name.as_deref(), Some("Ocimum basilicum"));
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }
}
