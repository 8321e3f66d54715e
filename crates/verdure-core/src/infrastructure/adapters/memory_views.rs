//! In-memory read-side document stores
//!
//! One document per aggregate id; `save` is an upsert, so re-projecting the
//! same event is idempotent. Criteria evaluation (filter, sort, paginate)
//! happens here, standing in for the document store's query layer.

use crate::ports::{
    GrowingUnitViewRepository, LocationViewRepository, PlantViewRepository, SpeciesViewRepository,
};
use crate::read_model::{
    GrowingUnitCriteria, GrowingUnitViewModel, LocationCriteria, LocationViewModel, Page,
    Paginated, PlantCriteria, PlantViewModel, SortField, SortOrder, SortSpec, SpeciesCriteria,
    SpeciesViewModel,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use verdure_domain::value_objects::{GrowingUnitId, LocationId, PlantId, PlantStatus, SpeciesId};
use verdure_domain::DomainResult;

/// Fields every view model exposes for sorting.
trait SortableView {
    fn sort_name(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
}

macro_rules! impl_sortable {
    ($view:ty) => {
        impl SortableView for $view {
            fn sort_name(&self) -> &str {
                &self.name
            }

            fn created_at(&self) -> DateTime<Utc> {
                self.created_at
            }

            fn updated_at(&self) -> DateTime<Utc> {
                self.updated_at
            }
        }
    };
}

impl_sortable!(LocationViewModel);
impl_sortable!(GrowingUnitViewModel);
impl_sortable!(PlantViewModel);
impl_sortable!(SpeciesViewModel);

fn sort_views<V: SortableView>(views: &mut [V], spec: SortSpec) {
    views.sort_by(|a, b| {
        let ordering = match spec.field {
            SortField::Name => a.sort_name().cmp(b.sort_name()),
            SortField::CreatedAt => a.created_at().cmp(&b.created_at()),
            SortField::UpdatedAt => a.updated_at().cmp(&b.updated_at()),
        };
        match spec.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

fn paginate<V>(mut views: Vec<V>, page: Page) -> Paginated<V> {
    let total = views.len();
    let start = page.offset().min(total);
    let end = (start + page.per_page() as usize).min(total);
    let items = views.drain(start..end).collect();
    Paginated {
        items,
        total,
        page: page.page(),
        per_page: page.per_page(),
    }
}

fn name_matches(name: &str, needle: &Option<String>) -> bool {
    match needle {
        Some(needle) => name.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

/// In-memory location view store.
#[derive(Debug, Default)]
pub struct InMemoryLocationViews {
    docs: DashMap<LocationId, LocationViewModel>,
}

impl InMemoryLocationViews {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationViewRepository for InMemoryLocationViews {
    async fn find_by_id(&self, id: LocationId) -> DomainResult<Option<LocationViewModel>> {
        Ok(self.docs.get(&id).map(|doc| doc.value().clone()))
    }

    async fn find_by_criteria(
        &self,
        criteria: LocationCriteria,
    ) -> DomainResult<Paginated<LocationViewModel>> {
        let mut views: Vec<_> = self
            .docs
            .iter()
            .filter(|doc| {
                name_matches(&doc.name, &criteria.name_contains)
                    && criteria.kind.is_none_or(|kind| doc.kind == kind)
            })
            .map(|doc| doc.value().clone())
            .collect();
        sort_views(&mut views, criteria.sort);
        Ok(paginate(views, criteria.page))
    }

    async fn save(&self, view: LocationViewModel) -> DomainResult<()> {
        self.docs.insert(view.id, view);
        Ok(())
    }

    async fn delete(&self, id: LocationId) -> DomainResult<()> {
        self.docs.remove(&id);
        Ok(())
    }
}

/// In-memory growing unit view store.
#[derive(Debug, Default)]
pub struct InMemoryGrowingUnitViews {
    docs: DashMap<GrowingUnitId, GrowingUnitViewModel>,
}

impl InMemoryGrowingUnitViews {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GrowingUnitViewRepository for InMemoryGrowingUnitViews {
    async fn find_by_id(&self, id: GrowingUnitId) -> DomainResult<Option<GrowingUnitViewModel>> {
        Ok(self.docs.get(&id).map(|doc| doc.value().clone()))
    }

    async fn find_by_criteria(
        &self,
        criteria: GrowingUnitCriteria,
    ) -> DomainResult<Paginated<GrowingUnitViewModel>> {
        let mut views: Vec<_> = self
            .docs
            .iter()
            .filter(|doc| {
                name_matches(&doc.name, &criteria.name_contains)
                    && criteria.kind.is_none_or(|kind| doc.kind == kind)
                    && criteria
                        .location_id
                        .is_none_or(|id| doc.location_id == Some(id))
                    && (!criteria.only_available || doc.has_free_capacity())
            })
            .map(|doc| doc.value().clone())
            .collect();
        sort_views(&mut views, criteria.sort);
        Ok(paginate(views, criteria.page))
    }

    async fn list_by_location(
        &self,
        location_id: LocationId,
    ) -> DomainResult<Vec<GrowingUnitViewModel>> {
        Ok(self
            .docs
            .iter()
            .filter(|doc| doc.location_id == Some(location_id))
            .map(|doc| doc.value().clone())
            .collect())
    }

    async fn save(&self, view: GrowingUnitViewModel) -> DomainResult<()> {
        self.docs.insert(view.id, view);
        Ok(())
    }

    async fn delete(&self, id: GrowingUnitId) -> DomainResult<()> {
        self.docs.remove(&id);
        Ok(())
    }
}

/// In-memory plant view store. Archived plants are hidden from criteria
/// queries unless explicitly requested.
#[derive(Debug, Default)]
pub struct InMemoryPlantViews {
    docs: DashMap<PlantId, PlantViewModel>,
}

impl InMemoryPlantViews {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlantViewRepository for InMemoryPlantViews {
    async fn find_by_id(&self, id: PlantId) -> DomainResult<Option<PlantViewModel>> {
        Ok(self.docs.get(&id).map(|doc| doc.value().clone()))
    }

    async fn find_by_criteria(
        &self,
        criteria: PlantCriteria,
    ) -> DomainResult<Paginated<PlantViewModel>> {
        let show_archived =
            criteria.include_archived || criteria.status == Some(PlantStatus::Archived);

        let mut views: Vec<_> = self
            .docs
            .iter()
            .filter(|doc| {
                if doc.status.is_archived() && !show_archived {
                    return false;
                }
                name_matches(&doc.name, &criteria.name_contains)
                    && criteria
                        .growing_unit_id
                        .is_none_or(|id| doc.growing_unit_id == id)
                    && criteria.species_id.is_none_or(|id| doc.species_id == Some(id))
                    && criteria.status.is_none_or(|status| doc.status == status)
            })
            .map(|doc| doc.value().clone())
            .collect();
        sort_views(&mut views, criteria.sort);
        Ok(paginate(views, criteria.page))
    }

    async fn save(&self, view: PlantViewModel) -> DomainResult<()> {
        self.docs.insert(view.id, view);
        Ok(())
    }

    async fn delete(&self, id: PlantId) -> DomainResult<()> {
        self.docs.remove(&id);
        Ok(())
    }
}

/// In-memory species view store.
#[derive(Debug, Default)]
pub struct InMemorySpeciesViews {
    docs: DashMap<SpeciesId, SpeciesViewModel>,
}

impl InMemorySpeciesViews {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SpeciesViewRepository for InMemorySpeciesViews {
    async fn find_by_id(&self, id: SpeciesId) -> DomainResult<Option<SpeciesViewModel>> {
        Ok(self.docs.get(&id).map(|doc| doc.value().clone()))
    }

    async fn find_by_criteria(
        &self,
        criteria: SpeciesCriteria,
    ) -> DomainResult<Paginated<SpeciesViewModel>> {
        let mut views: Vec<_> = self
            .docs
            .iter()
            .filter(|doc| name_matches(&doc.name, &criteria.name_contains))
            .map(|doc| doc.value().clone())
            .collect();
        sort_views(&mut views, criteria.sort);
        Ok(paginate(views, criteria.page))
    }

    async fn save(&self, view: SpeciesViewModel) -> DomainResult<()> {
        self.docs.insert(view.id, view);
        Ok(())
    }

    async fn delete(&self, id: SpeciesId) -> DomainResult<()> {
        self.docs.remove(&id);
        Ok(())
    }
}
