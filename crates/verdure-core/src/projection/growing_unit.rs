//! Growing unit projector
//!
//! Rebuilds growing unit view models, embedding the current location view
//! and recomputing occupancy figures. Plant membership events re-project
//! the owning unit because they change its occupancy; a transplant
//! re-projects both units.

use crate::ports::{
    EventHandler, GrowingUnitRepository, GrowingUnitViewRepository, LocationRepository,
};
use crate::read_model::{GrowingUnitViewModel, LocationViewModel};
use async_trait::async_trait;
use std::sync::Arc;
use verdure_domain::events::{DomainEvent, EventKind, EventPayload};
use verdure_domain::value_objects::GrowingUnitId;
use verdure_domain::DomainResult;

pub struct GrowingUnitProjector<U, L, UV> {
    units: Arc<U>,
    locations: Arc<L>,
    views: Arc<UV>,
}

impl<U, L, UV> GrowingUnitProjector<U, L, UV>
where
    U: GrowingUnitRepository,
    L: LocationRepository,
    UV: GrowingUnitViewRepository,
{
    pub fn new(units: Arc<U>, locations: Arc<L>, views: Arc<UV>) -> Self {
        Self {
            units,
            locations,
            views,
        }
    }

    /// Rebuild the view from the current write-side state, re-fetching the
    /// related location for the embedded snapshot.
    async fn project(&self, id: GrowingUnitId) -> DomainResult<()> {
        let Some(unit) = self.units.find_by_id(id).await? else {
            // Deleted between publish and projection; drop the view.
            return self.views.delete(id).await;
        };

        let location = match unit.location_id() {
            Some(location_id) => self
                .locations
                .find_by_id(location_id)
                .await?
                .map(|location| LocationViewModel::from_aggregate(&location)),
            None => None,
        };

        self.views
            .save(GrowingUnitViewModel::from_aggregate(&unit, location))
            .await
    }
}

#[async_trait]
impl<U, L, UV> EventHandler for GrowingUnitProjector<U, L, UV>
where
    U: GrowingUnitRepository,
    L: LocationRepository,
    UV: GrowingUnitViewRepository,
{
    fn name(&self) -> &'static str {
        "growing-unit-projector"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::GrowingUnitCreated,
            EventKind::GrowingUnitUpdated,
            EventKind::GrowingUnitDeleted,
            EventKind::PlantAdded,
            EventKind::PlantRemoved,
            EventKind::PlantTransplanted,
        ]
    }

    async fn handle(&self, event: &DomainEvent) -> DomainResult<()> {
        match event.payload() {
            EventPayload::GrowingUnitCreated { unit } => self.project(unit.id).await,
            EventPayload::GrowingUnitUpdated { unit_id, .. }
            | EventPayload::PlantAdded { unit_id, .. }
            | EventPayload::PlantRemoved { unit_id, .. } => self.project(*unit_id).await,
            EventPayload::PlantTransplanted {
                source_unit_id,
                target_unit_id,
                ..
            } => {
                self.project(*source_unit_id).await?;
                self.project(*target_unit_id).await
            }
            EventPayload::GrowingUnitDeleted { unit } => self.views.delete(unit.id).await,
            _ => Ok(()),
        }
    }
}
