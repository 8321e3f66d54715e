//! Query criteria and pagination
//!
//! Typed filter predicates, sort specification and validated page
//! parameters for read-side criteria queries.

use crate::config::{DEFAULT_PER_PAGE, MAX_PER_PAGE};
use serde::{Deserialize, Serialize};
use verdure_domain::value_objects::{
    GrowingUnitId, GrowingUnitKind, LocationId, LocationType, PlantStatus, SpeciesId,
};
use verdure_domain::{DomainResult, ValidationError};

/// Validated page request. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    page: u32,
    per_page: u32,
}

impl Page {
    pub fn new(page: u32, per_page: u32) -> DomainResult<Self> {
        if page == 0 {
            return Err(ValidationError::OutOfBounds {
                field: "page",
                value: 0.0,
                min: 1.0,
                max: f64::from(u32::MAX),
            }
            .into());
        }
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(ValidationError::OutOfBounds {
                field: "per page",
                value: f64::from(per_page),
                min: 1.0,
                max: f64::from(MAX_PER_PAGE),
            }
            .into());
        }
        Ok(Self { page, per_page })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Zero-based offset of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.per_page as usize
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Sort direction for criteria queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Sortable fields shared by all view model collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortField {
    #[default]
    Name,
    CreatedAt,
    UpdatedAt,
}

/// Sort specification: field plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            order: SortOrder::Descending,
        }
    }
}

/// One page of query results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Paginated<T> {
    pub fn total_pages(&self) -> u32 {
        (self.total as u32).div_ceil(self.per_page)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Filter predicates for location queries.
#[derive(Debug, Clone, Default)]
pub struct LocationCriteria {
    pub name_contains: Option<String>,
    pub kind: Option<LocationType>,
    pub sort: SortSpec,
    pub page: Page,
}

/// Filter predicates for growing unit queries.
#[derive(Debug, Clone, Default)]
pub struct GrowingUnitCriteria {
    pub name_contains: Option<String>,
    pub kind: Option<GrowingUnitKind>,
    pub location_id: Option<LocationId>,
    /// Only units with at least one free slot.
    pub only_available: bool,
    pub sort: SortSpec,
    pub page: Page,
}

/// Filter predicates for plant queries.
///
/// Archived plants are excluded unless `include_archived` is set or the
/// status filter explicitly asks for `ARCHIVED`.
#[derive(Debug, Clone, Default)]
pub struct PlantCriteria {
    pub name_contains: Option<String>,
    pub growing_unit_id: Option<GrowingUnitId>,
    pub species_id: Option<SpeciesId>,
    pub status: Option<PlantStatus>,
    pub include_archived: bool,
    pub sort: SortSpec,
    pub page: Page,
}

/// Filter predicates for species queries.
#[derive(Debug, Clone, Default)]
pub struct SpeciesCriteria {
    pub name_contains: Option<String>,
    pub sort: SortSpec,
    pub page: Page,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_validates_bounds() {
        assert!(Page::new(0, 10).is_err());
        assert!(Page::new(1, 0).is_err());
        assert!(Page::new(1, MAX_PER_PAGE + 1).is_err());

        let page = Page::new(3, 10).unwrap();
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn pagination_math() {
        let result = Paginated::<u32> {
            items: vec![1, 2, 3],
            total: 23,
            page: 1,
            per_page: 10,
        };
        assert_eq!(result.total_pages(), 3);

        let empty = Paginated::<u32> {
            items: vec![],
            total: 0,
            page: 1,
            per_page: 10,
        };
        assert_eq!(empty.total_pages(), 0);
    }
}
