//! Location projector
//!
//! Maintains the location view models and keeps the location snapshot
//! embedded in growing unit view models in sync when a location changes or
//! disappears.

use crate::ports::{
    EventHandler, GrowingUnitViewRepository, LocationRepository, LocationViewRepository,
};
use crate::read_model::LocationViewModel;
use async_trait::async_trait;
use std::sync::Arc;
use verdure_domain::events::{DomainEvent, EventKind, EventPayload};
use verdure_domain::value_objects::LocationId;
use verdure_domain::DomainResult;

pub struct LocationProjector<L, LV, UV> {
    locations: Arc<L>,
    views: Arc<LV>,
    unit_views: Arc<UV>,
}

impl<L, LV, UV> LocationProjector<L, LV, UV>
where
    L: LocationRepository,
    LV: LocationViewRepository,
    UV: GrowingUnitViewRepository,
{
    pub fn new(locations: Arc<L>, views: Arc<LV>, unit_views: Arc<UV>) -> Self {
        Self {
            locations,
            views,
            unit_views,
        }
    }

    /// Rebuild the view from the current write-side state and refresh every
    /// unit view embedding this location.
    async fn project(&self, id: LocationId) -> DomainResult<()> {
        match self.locations.find_by_id(id).await? {
            Some(location) => {
                let view = LocationViewModel::from_aggregate(&location);
                self.views.save(view.clone()).await?;
                self.refresh_embedded(id, Some(view)).await
            }
            // Deleted between publish and projection; drop the view.
            None => self.remove(id).await,
        }
    }

    async fn remove(&self, id: LocationId) -> DomainResult<()> {
        self.views.delete(id).await?;
        self.refresh_embedded(id, None).await
    }

    async fn refresh_embedded(
        &self,
        id: LocationId,
        view: Option<LocationViewModel>,
    ) -> DomainResult<()> {
        for mut unit_view in self.unit_views.list_by_location(id).await? {
            unit_view.location = view.clone();
            self.unit_views.save(unit_view).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<L, LV, UV> EventHandler for LocationProjector<L, LV, UV>
where
    L: LocationRepository,
    LV: LocationViewRepository,
    UV: GrowingUnitViewRepository,
{
    fn name(&self) -> &'static str {
        "location-projector"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::LocationCreated,
            EventKind::LocationUpdated,
            EventKind::LocationDeleted,
        ]
    }

    async fn handle(&self, event: &DomainEvent) -> DomainResult<()> {
        match event.payload() {
            EventPayload::LocationCreated { location } => self.project(location.id).await,
            EventPayload::LocationUpdated { location_id, .. } => self.project(*location_id).await,
            EventPayload::LocationDeleted { location } => self.remove(location.id).await,
            _ => Ok(()),
        }
    }
}
