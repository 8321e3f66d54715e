//! Plant species projector

use crate::ports::{EventHandler, SpeciesRepository, SpeciesViewRepository};
use crate::read_model::SpeciesViewModel;
use async_trait::async_trait;
use std::sync::Arc;
use verdure_domain::events::{DomainEvent, EventKind, EventPayload};
use verdure_domain::value_objects::SpeciesId;
use verdure_domain::DomainResult;

pub struct SpeciesProjector<S, SV> {
    species: Arc<S>,
    views: Arc<SV>,
}

impl<S, SV> SpeciesProjector<S, SV>
where
    S: SpeciesRepository,
    SV: SpeciesViewRepository,
{
    pub fn new(species: Arc<S>, views: Arc<SV>) -> Self {
        Self { species, views }
    }

    async fn project(&self, id: SpeciesId) -> DomainResult<()> {
        match self.species.find_by_id(id).await? {
            Some(species) => {
                self.views
                    .save(SpeciesViewModel::from_aggregate(&species))
                    .await
            }
            None => self.views.delete(id).await,
        }
    }
}

#[async_trait]
impl<S, SV> EventHandler for SpeciesProjector<S, SV>
where
    S: SpeciesRepository,
    SV: SpeciesViewRepository,
{
    fn name(&self) -> &'static str {
        "species-projector"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::SpeciesCreated,
            EventKind::SpeciesUpdated,
            EventKind::SpeciesDeleted,
        ]
    }

    async fn handle(&self, event: &DomainEvent) -> DomainResult<()> {
        match event.payload() {
            EventPayload::SpeciesCreated { species } => self.project(species.id).await,
            EventPayload::SpeciesUpdated { species_id, .. } => self.project(*species_id).await,
            EventPayload::SpeciesDeleted { species } => self.views.delete(species.id).await,
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{InMemorySpeciesStore, InMemorySpeciesViews};
    use verdure_domain::aggregates::{NewSpecies, PlantSpecies};
    use verdure_domain::value_objects::{EntityName, PhRange};

    #[tokio::test]
    async fn created_and_deleted_round_trip() {
        let store = Arc::new(InMemorySpeciesStore::new());
        let views = Arc::new(InMemorySpeciesViews::new());
        let projector = SpeciesProjector::new(store.clone(), views.clone());

        let mut species = PlantSpecies::create(NewSpecies {
            name: EntityName::new("Basil").unwrap(),
            scientific_name: None,
            optimal_ph: Some(PhRange::new(5.5, 6.5).unwrap()),
            germination: None,
            description: None,
        });
        let created = species.uncommitted_events()[0].clone();
        store.save(species.clone()).await.unwrap();
        species.commit();

        projector.handle(&created).await.unwrap();
        let view = views.find_by_id(species.id()).await.unwrap().unwrap();
        assert_eq!(view.name, "Basil");
        assert_eq!(view.optimal_ph.unwrap().max(), 6.5);

        species.delete();
        let deleted = species.uncommitted_events()[0].clone();
        store.delete(species.id()).await.unwrap();

        projector.handle(&deleted).await.unwrap();
        assert!(views.find_by_id(species.id()).await.unwrap().is_none());
    }
}
