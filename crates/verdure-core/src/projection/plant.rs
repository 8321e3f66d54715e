//! Plant projector
//!
//! Maintains the plant view models. Plants are resolved through their
//! owning unit on the write side; removing a plant or deleting its unit
//! removes the view (composition cascade).

use crate::ports::{EventHandler, GrowingUnitRepository, PlantViewRepository};
use crate::read_model::PlantViewModel;
use async_trait::async_trait;
use std::sync::Arc;
use verdure_domain::events::{DomainEvent, EventKind, EventPayload};
use verdure_domain::value_objects::PlantId;
use verdure_domain::DomainResult;

pub struct PlantProjector<U, PV> {
    units: Arc<U>,
    views: Arc<PV>,
}

impl<U, PV> PlantProjector<U, PV>
where
    U: GrowingUnitRepository,
    PV: PlantViewRepository,
{
    pub fn new(units: Arc<U>, views: Arc<PV>) -> Self {
        Self { units, views }
    }

    /// Rebuild the view from the plant's current state inside its owning
    /// unit.
    async fn project(&self, plant_id: PlantId) -> DomainResult<()> {
        let plant = self
            .units
            .find_by_plant(plant_id)
            .await?
            .and_then(|unit| unit.plant(plant_id).map(PlantViewModel::from_entity));

        match plant {
            Some(view) => self.views.save(view).await,
            // Removed between publish and projection; drop the view.
            None => self.views.delete(plant_id).await,
        }
    }
}

#[async_trait]
impl<U, PV> EventHandler for PlantProjector<U, PV>
where
    U: GrowingUnitRepository,
    PV: PlantViewRepository,
{
    fn name(&self) -> &'static str {
        "plant-projector"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::PlantAdded,
            EventKind::PlantUpdated,
            EventKind::PlantStatusChanged,
            EventKind::PlantTransplanted,
            EventKind::PlantRemoved,
            EventKind::GrowingUnitDeleted,
        ]
    }

    async fn handle(&self, event: &DomainEvent) -> DomainResult<()> {
        match event.payload() {
            EventPayload::PlantAdded { plant, .. } => self.project(plant.id).await,
            EventPayload::PlantUpdated { plant_id, .. }
            | EventPayload::PlantStatusChanged { plant_id, .. }
            | EventPayload::PlantTransplanted { plant_id, .. } => self.project(*plant_id).await,
            EventPayload::PlantRemoved { plant, .. } => self.views.delete(plant.id).await,
            // Composition: deleting the unit deletes its plants' views. The
            // snapshot is the only remaining record of the owned plants.
            EventPayload::GrowingUnitDeleted { unit } => {
                for plant in &unit.plants {
                    self.views.delete(plant.id).await?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{InMemoryGrowingUnitStore, InMemoryPlantViews};
    use verdure_domain::aggregates::{GrowingUnit, NewGrowingUnit, NewPlant};
    use verdure_domain::value_objects::{Capacity, EntityName, GrowingUnitKind, PlantStatus};

    struct Fixture {
        units: Arc<InMemoryGrowingUnitStore>,
        views: Arc<InMemoryPlantViews>,
        projector: PlantProjector<InMemoryGrowingUnitStore, InMemoryPlantViews>,
    }

    fn fixture() -> Fixture {
        let units = Arc::new(InMemoryGrowingUnitStore::new());
        let views = Arc::new(InMemoryPlantViews::new());
        let projector = PlantProjector::new(units.clone(), views.clone());
        Fixture {
            units,
            views,
            projector,
        }
    }

    fn pot(capacity: u32) -> GrowingUnit {
        GrowingUnit::create(NewGrowingUnit {
            name: EntityName::new("Pot").unwrap(),
            kind: GrowingUnitKind::Pot,
            location_id: None,
            capacity: Capacity::new(capacity).unwrap(),
            dimensions: None,
            description: None,
        })
    }

    fn basil() -> NewPlant {
        NewPlant {
            name: EntityName::new("Basil").unwrap(),
            species_id: None,
            status: PlantStatus::Planted,
            planted_on: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn added_event_projects_the_plant_view() {
        let fx = fixture();
        let mut unit = pot(3);
        unit.commit();
        let plant_id = unit.add_plant(basil()).unwrap();
        let event = unit.uncommitted_events()[0].clone();
        fx.units.save(unit.clone()).await.unwrap();

        fx.projector.handle(&event).await.unwrap();

        let view = fx.views.find_by_id(plant_id).await.unwrap().unwrap();
        assert_eq!(view.name, "Basil");
        assert_eq!(view.growing_unit_id, unit.id());
        assert_eq!(view.status, PlantStatus::Planted);
    }

    #[tokio::test]
    async fn unit_deletion_cascades_to_plant_views() {
        let fx = fixture();
        let mut unit = pot(3);
        let first = unit.add_plant(basil()).unwrap();
        let second = unit.add_plant(basil()).unwrap();
        unit.commit();
        fx.units.save(unit.clone()).await.unwrap();

        for id in [first, second] {
            fx.projector.project(id).await.unwrap();
            assert!(fx.views.find_by_id(id).await.unwrap().is_some());
        }

        unit.delete();
        let deleted = unit.uncommitted_events()[0].clone();
        fx.units.delete(unit.id()).await.unwrap();

        fx.projector.handle(&deleted).await.unwrap();

        assert!(fx.views.find_by_id(first).await.unwrap().is_none());
        assert!(fx.views.find_by_id(second).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn transplanted_event_repoints_the_view_at_the_target_unit() {
        let fx = fixture();
        let mut source = pot(3);
        let mut target = pot(3);
        let plant_id = source.add_plant(basil()).unwrap();
        source.commit();
        target.commit();

        let plant = source.release_for_transplant(plant_id).unwrap();
        target.receive_transplant(plant, source.id()).unwrap();
        let event = target.uncommitted_events()[0].clone();

        fx.units.save(source).await.unwrap();
        fx.units.save(target.clone()).await.unwrap();

        fx.projector.handle(&event).await.unwrap();

        let view = fx.views.find_by_id(plant_id).await.unwrap().unwrap();
        assert_eq!(view.growing_unit_id, target.id());
    }
}
