//! In-memory write-side repositories
//!
//! Upsert keyed by identity with optimistic concurrency: every stored row
//! carries a version, and a save whose version does not match the stored
//! row fails with a version conflict. The stored row is the aggregate's
//! field state only - the uncommitted-event list is cleared before
//! insertion.

use crate::ports::{GrowingUnitRepository, LocationRepository, SpeciesRepository};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::hash::Hash;
use verdure_domain::aggregates::{GrowingUnit, Location, PlantSpecies};
use verdure_domain::value_objects::{GrowingUnitId, LocationId, PlantId, SpeciesId};
use verdure_domain::{DomainError, DomainResult};

/// Version-stamped aggregate row.
trait Versioned: Clone {
    fn version(&self) -> u64;
    fn stamp_version(&mut self, version: u64);
    fn clear_events(&mut self);
}

macro_rules! impl_versioned {
    ($aggregate:ty) => {
        impl Versioned for $aggregate {
            fn version(&self) -> u64 {
                <$aggregate>::version(self)
            }

            fn stamp_version(&mut self, version: u64) {
                <$aggregate>::stamp_version(self, version)
            }

            fn clear_events(&mut self) {
                self.commit();
            }
        }
    };
}

impl_versioned!(Location);
impl_versioned!(GrowingUnit);
impl_versioned!(PlantSpecies);

/// Upsert with the version check. New rows must come from a fresh
/// aggregate (version 0); existing rows require the loaded version.
fn save_row<K, A>(rows: &DashMap<K, A>, key: K, mut aggregate: A) -> DomainResult<()>
where
    K: Eq + Hash,
    A: Versioned,
{
    match rows.entry(key) {
        Entry::Occupied(mut occupied) => {
            let stored = occupied.get().version();
            if stored != aggregate.version() {
                return Err(DomainError::VersionConflict {
                    stored,
                    attempted: aggregate.version(),
                });
            }
            aggregate.clear_events();
            aggregate.stamp_version(stored + 1);
            occupied.insert(aggregate);
        }
        Entry::Vacant(vacant) => {
            if aggregate.version() != 0 {
                return Err(DomainError::VersionConflict {
                    stored: 0,
                    attempted: aggregate.version(),
                });
            }
            aggregate.clear_events();
            aggregate.stamp_version(1);
            vacant.insert(aggregate);
        }
    }
    Ok(())
}

/// In-memory location store.
#[derive(Debug, Default)]
pub struct InMemoryLocationStore {
    rows: DashMap<LocationId, Location>,
}

impl InMemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationStore {
    async fn find_by_id(&self, id: LocationId) -> DomainResult<Option<Location>> {
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }

    async fn save(&self, location: Location) -> DomainResult<()> {
        save_row(&self.rows, location.id(), location)
    }

    async fn delete(&self, id: LocationId) -> DomainResult<()> {
        self.rows.remove(&id);
        Ok(())
    }
}

/// In-memory growing unit store; plants are persisted inside their unit's
/// row, never independently.
#[derive(Debug, Default)]
pub struct InMemoryGrowingUnitStore {
    rows: DashMap<GrowingUnitId, GrowingUnit>,
}

impl InMemoryGrowingUnitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GrowingUnitRepository for InMemoryGrowingUnitStore {
    async fn find_by_id(&self, id: GrowingUnitId) -> DomainResult<Option<GrowingUnit>> {
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }

    async fn find_by_plant(&self, plant_id: PlantId) -> DomainResult<Option<GrowingUnit>> {
        Ok(self
            .rows
            .iter()
            .find(|row| row.plant(plant_id).is_some())
            .map(|row| row.value().clone()))
    }

    async fn list_by_location(&self, location_id: LocationId) -> DomainResult<Vec<GrowingUnit>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| row.location_id() == Some(location_id))
            .map(|row| row.value().clone())
            .collect())
    }

    async fn save(&self, unit: GrowingUnit) -> DomainResult<()> {
        save_row(&self.rows, unit.id(), unit)
    }

    async fn delete(&self, id: GrowingUnitId) -> DomainResult<()> {
        self.rows.remove(&id);
        Ok(())
    }
}

/// In-memory plant species store.
#[derive(Debug, Default)]
pub struct InMemorySpeciesStore {
    rows: DashMap<SpeciesId, PlantSpecies>,
}

impl InMemorySpeciesStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SpeciesRepository for InMemorySpeciesStore {
    async fn find_by_id(&self, id: SpeciesId) -> DomainResult<Option<PlantSpecies>> {
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }

    async fn save(&self, species: PlantSpecies) -> DomainResult<()> {
        save_row(&self.rows, species.id(), species)
    }

    async fn delete(&self, id: SpeciesId) -> DomainResult<()> {
        self.rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdure_domain::aggregates::{NewGrowingUnit, NewPlant};
    use verdure_domain::value_objects::{
        Capacity, EntityName, GrowingUnitKind, LocationType, PlantStatus,
    };

    fn sample_location() -> Location {
        Location::create(EntityName::new("Garden").unwrap(), LocationType::Garden, None)
    }

    #[tokio::test]
    async fn absence_is_a_value_not_an_error() {
        let store = InMemoryLocationStore::new();
        let found = store.find_by_id(LocationId::new()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn save_stamps_versions_and_clears_events() {
        let store = InMemoryLocationStore::new();
        let location = sample_location();
        let id = location.id();
        assert_eq!(location.version(), 0);

        store.save(location).await.unwrap();

        let loaded = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(loaded.version(), 1);
        assert!(loaded.uncommitted_events().is_empty());

        store.save(loaded.clone()).await.unwrap();
        assert_eq!(store.find_by_id(id).await.unwrap().unwrap().version(), 2);
    }

    #[tokio::test]
    async fn stale_save_is_a_version_conflict() {
        let store = InMemoryLocationStore::new();
        let location = sample_location();
        let id = location.id();
        store.save(location).await.unwrap();

        let first = store.find_by_id(id).await.unwrap().unwrap();
        let second = store.find_by_id(id).await.unwrap().unwrap();

        store.save(first).await.unwrap();

        let err = store.save(second).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::VersionConflict {
                stored: 2,
                attempted: 1
            }
        );
    }

    #[tokio::test]
    async fn find_by_plant_resolves_the_owning_unit() {
        let store = InMemoryGrowingUnitStore::new();
        let mut unit = GrowingUnit::create(NewGrowingUnit {
            name: EntityName::new("Pot").unwrap(),
            kind: GrowingUnitKind::Pot,
            location_id: None,
            capacity: Capacity::new(3).unwrap(),
            dimensions: None,
            description: None,
        });
        let plant_id = unit
            .add_plant(NewPlant {
                name: EntityName::new("Basil").unwrap(),
                species_id: None,
                status: PlantStatus::Planted,
                planted_on: None,
                notes: None,
            })
            .unwrap();
        let unit_id = unit.id();
        store.save(unit).await.unwrap();

        let owner = store.find_by_plant(plant_id).await.unwrap().unwrap();
        assert_eq!(owner.id(), unit_id);

        assert!(store.find_by_plant(PlantId::new()).await.unwrap().is_none());
    }
}
