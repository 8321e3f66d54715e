//! End-to-end command pipeline tests
//!
//! Drives the fully wired core through commands and observes the outcome
//! through queries: write repository -> events -> projectors -> read
//! repository.

use verdure_core::application::commands::*;
use verdure_core::application::queries::*;
use verdure_core::read_model::{GrowingUnitCriteria, PlantCriteria};
use verdure_core::{
    ApplicationError, CommandHandler, CoreRuntime, GrowingUnitRepository, LocationRepository,
    QueryHandler,
};
use verdure_domain::patch::FieldUpdate;
use verdure_domain::value_objects::{LocationId, LocationType, PlantStatus};
use verdure_domain::DomainError;

#[tokio::test]
async fn location_create_flows_through_to_the_read_model() {
    let rt = CoreRuntime::bootstrap();

    let command = CreateLocationCommand::new("Living Room", "ROOM", None).unwrap();
    let id = rt.location_commands.handle(command).await.unwrap();

    let view = rt
        .location_queries
        .handle(FindLocationByIdQuery { id })
        .await
        .unwrap();

    assert_eq!(view.id, id);
    assert_eq!(view.name, "Living Room");
    assert_eq!(view.kind, LocationType::Room);
    assert_eq!(view.created_at, view.updated_at);
}

#[tokio::test]
async fn absence_is_null_on_the_write_side_and_typed_not_found_above() {
    let rt = CoreRuntime::bootstrap();
    let id = LocationId::new();

    // The repository distinguishes absence from error.
    let found = rt.locations.find_by_id(id).await.unwrap();
    assert!(found.is_none());

    // The assert-exists path turns absence into the typed error.
    let err = rt
        .location_queries
        .handle(GetLocationAggregateQuery { id })
        .await
        .unwrap_err();
    assert_eq!(err, ApplicationError::LocationNotFound(id));
}

#[tokio::test]
async fn partial_updates_distinguish_omitted_from_null() {
    let rt = CoreRuntime::bootstrap();

    let id = rt
        .location_commands
        .handle(CreateLocationCommand::new("Desk", "ROOM", Some("A")).unwrap())
        .await
        .unwrap();
    let raw_id = id.to_string();

    // Omitted field: unchanged.
    rt.location_commands
        .handle(UpdateLocationCommand::new(&raw_id, None, None, FieldUpdate::Keep).unwrap())
        .await
        .unwrap();
    let view = rt
        .location_queries
        .handle(FindLocationByIdQuery { id })
        .await
        .unwrap();
    assert_eq!(view.description.as_deref(), Some("A"));

    // Explicit null: cleared.
    rt.location_commands
        .handle(UpdateLocationCommand::new(&raw_id, None, None, FieldUpdate::Clear).unwrap())
        .await
        .unwrap();
    let view = rt
        .location_queries
        .handle(FindLocationByIdQuery { id })
        .await
        .unwrap();
    assert_eq!(view.description, None);

    // Provided value: replaced.
    rt.location_commands
        .handle(UpdateLocationCommand::new(&raw_id, None, None, FieldUpdate::Set("B")).unwrap())
        .await
        .unwrap();
    let view = rt
        .location_queries
        .handle(FindLocationByIdQuery { id })
        .await
        .unwrap();
    assert_eq!(view.description.as_deref(), Some("B"));
}

#[tokio::test]
async fn growing_unit_view_embeds_location_and_computes_occupancy() {
    let rt = CoreRuntime::bootstrap();

    let location_id = rt
        .location_commands
        .handle(CreateLocationCommand::new("Balcony", "BALCONY", None).unwrap())
        .await
        .unwrap();

    let unit_id = rt
        .unit_commands
        .handle(
            CreateGrowingUnitCommand::new(
                "Planter",
                "PLANTER_BOX",
                Some(&location_id.to_string()),
                4,
                Some((100.0, 40.0, 30.0)),
                None,
            )
            .unwrap(),
        )
        .await
        .unwrap();

    rt.plant_commands
        .handle(
            CreatePlantCommand::new(&unit_id.to_string(), "Basil", None, None, None, None)
                .unwrap(),
        )
        .await
        .unwrap();

    let view = rt
        .unit_queries
        .handle(FindGrowingUnitByIdQuery { id: unit_id })
        .await
        .unwrap();

    assert_eq!(view.capacity, 4);
    assert_eq!(view.occupancy, 1);
    assert_eq!(view.remaining_capacity, 3);
    assert_eq!(view.volume_liters, Some(120.0));
    assert_eq!(view.location_id, Some(location_id));
    assert_eq!(view.location.as_ref().unwrap().name, "Balcony");

    // only_available filters out full units.
    let available = rt
        .unit_queries
        .handle(SearchGrowingUnitsQuery {
            criteria: GrowingUnitCriteria {
                only_available: true,
                ..Default::default()
            },
        })
        .await
        .unwrap();
    assert_eq!(available.total, 1);
}

#[tokio::test]
async fn capacity_is_enforced_end_to_end() {
    let rt = CoreRuntime::bootstrap();

    let unit_id = rt
        .unit_commands
        .handle(CreateGrowingUnitCommand::new("Pot", "POT", None, 2, None, None).unwrap())
        .await
        .unwrap();
    let raw_unit = unit_id.to_string();

    for name in ["Basil", "Thyme"] {
        rt.plant_commands
            .handle(CreatePlantCommand::new(&raw_unit, name, None, None, None, None).unwrap())
            .await
            .unwrap();
    }

    let err = rt
        .plant_commands
        .handle(CreatePlantCommand::new(&raw_unit, "Mint", None, None, None, None).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::CapacityExceeded { capacity: 2, .. })
    ));

    // The read model still reflects exactly two plants.
    let view = rt
        .unit_queries
        .handle(FindGrowingUnitByIdQuery { id: unit_id })
        .await
        .unwrap();
    assert_eq!(view.occupancy, 2);
    assert_eq!(view.remaining_capacity, 0);

    // A full unit no longer shows up as available.
    let available = rt
        .unit_queries
        .handle(SearchGrowingUnitsQuery {
            criteria: GrowingUnitCriteria {
                only_available: true,
                ..Default::default()
            },
        })
        .await
        .unwrap();
    assert_eq!(available.total, 0);
}

#[tokio::test]
async fn transplant_updates_both_unit_views_and_the_plant_view() {
    let rt = CoreRuntime::bootstrap();

    let source = rt
        .unit_commands
        .handle(CreateGrowingUnitCommand::new("Source", "POT", None, 2, None, None).unwrap())
        .await
        .unwrap();
    let target = rt
        .unit_commands
        .handle(CreateGrowingUnitCommand::new("Target", "POT", None, 2, None, None).unwrap())
        .await
        .unwrap();

    let plant_id = rt
        .plant_commands
        .handle(
            CreatePlantCommand::new(&source.to_string(), "Basil", None, None, None, None)
                .unwrap(),
        )
        .await
        .unwrap();

    rt.plant_commands
        .handle(
            TransplantPlantCommand::new(&plant_id.to_string(), &target.to_string()).unwrap(),
        )
        .await
        .unwrap();

    let source_view = rt
        .unit_queries
        .handle(FindGrowingUnitByIdQuery { id: source })
        .await
        .unwrap();
    let target_view = rt
        .unit_queries
        .handle(FindGrowingUnitByIdQuery { id: target })
        .await
        .unwrap();
    let plant_view = rt
        .plant_queries
        .handle(FindPlantByIdQuery { id: plant_id })
        .await
        .unwrap();

    assert_eq!(source_view.occupancy, 0);
    assert_eq!(target_view.occupancy, 1);
    assert_eq!(plant_view.growing_unit_id, target);
}

#[tokio::test]
async fn transplant_into_a_missing_unit_is_a_typed_not_found() {
    let rt = CoreRuntime::bootstrap();

    let unit = rt
        .unit_commands
        .handle(CreateGrowingUnitCommand::new("Pot", "POT", None, 2, None, None).unwrap())
        .await
        .unwrap();
    let plant_id = rt
        .plant_commands
        .handle(
            CreatePlantCommand::new(&unit.to_string(), "Basil", None, None, None, None).unwrap(),
        )
        .await
        .unwrap();

    let missing = verdure_domain::value_objects::GrowingUnitId::new();
    let err = rt
        .plant_commands
        .handle(TransplantPlantCommand::new(&plant_id.to_string(), &missing.to_string()).unwrap())
        .await
        .unwrap_err();

    assert_eq!(err, ApplicationError::GrowingUnitNotFound(missing));

    // The plant stayed where it was.
    let view = rt
        .plant_queries
        .handle(FindPlantByIdQuery { id: plant_id })
        .await
        .unwrap();
    assert_eq!(view.growing_unit_id, unit);
}

#[tokio::test]
async fn plant_lifecycle_and_archived_visibility() {
    let rt = CoreRuntime::bootstrap();

    let unit = rt
        .unit_commands
        .handle(CreateGrowingUnitCommand::new("Bed", "BED", None, 5, None, None).unwrap())
        .await
        .unwrap();
    let plant_id = rt
        .plant_commands
        .handle(
            CreatePlantCommand::new(&unit.to_string(), "Tomato", None, None, None, None).unwrap(),
        )
        .await
        .unwrap();
    let raw_plant = plant_id.to_string();

    rt.plant_commands
        .handle(ChangePlantStatusCommand::new(&raw_plant, "GROWING").unwrap())
        .await
        .unwrap();

    // Skipping GROWING->HARVESTED->... backwards is rejected.
    let err = rt
        .plant_commands
        .handle(ChangePlantStatusCommand::new(&raw_plant, "PLANTED").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidStatusTransition { .. })
    ));

    rt.plant_commands
        .handle(ChangePlantStatusCommand::new(&raw_plant, "HARVESTED").unwrap())
        .await
        .unwrap();
    rt.plant_commands
        .handle(ChangePlantStatusCommand::new(&raw_plant, "ARCHIVED").unwrap())
        .await
        .unwrap();

    // Archived plants are hidden from normal queries...
    let visible = rt
        .plant_queries
        .handle(SearchPlantsQuery {
            criteria: PlantCriteria::default(),
        })
        .await
        .unwrap();
    assert_eq!(visible.total, 0);

    // ...but remain reachable when asked for explicitly.
    let archived = rt
        .plant_queries
        .handle(SearchPlantsQuery {
            criteria: PlantCriteria {
                include_archived: true,
                ..Default::default()
            },
        })
        .await
        .unwrap();
    assert_eq!(archived.total, 1);
    assert_eq!(archived.items[0].status, PlantStatus::Archived);
}

#[tokio::test]
async fn deleting_a_unit_cascades_to_its_plants() {
    let rt = CoreRuntime::bootstrap();

    let unit = rt
        .unit_commands
        .handle(CreateGrowingUnitCommand::new("Pot", "POT", None, 3, None, None).unwrap())
        .await
        .unwrap();
    let plant_id = rt
        .plant_commands
        .handle(
            CreatePlantCommand::new(&unit.to_string(), "Basil", None, None, None, None).unwrap(),
        )
        .await
        .unwrap();

    rt.unit_commands
        .handle(DeleteGrowingUnitCommand { id: unit })
        .await
        .unwrap();

    let unit_err = rt
        .unit_queries
        .handle(FindGrowingUnitByIdQuery { id: unit })
        .await
        .unwrap_err();
    assert_eq!(unit_err, ApplicationError::GrowingUnitNotFound(unit));

    let plant_err = rt
        .plant_queries
        .handle(FindPlantByIdQuery { id: plant_id })
        .await
        .unwrap_err();
    assert_eq!(plant_err, ApplicationError::PlantNotFound(plant_id));

    // The write side is gone too.
    assert!(rt.units.find_by_id(unit).await.unwrap().is_none());
}

#[tokio::test]
async fn renaming_a_location_refreshes_embedded_snapshots() {
    let rt = CoreRuntime::bootstrap();

    let location_id = rt
        .location_commands
        .handle(CreateLocationCommand::new("Garden", "GARDEN", None).unwrap())
        .await
        .unwrap();
    let unit = rt
        .unit_commands
        .handle(
            CreateGrowingUnitCommand::new(
                "Bed",
                "RAISED_BED",
                Some(&location_id.to_string()),
                6,
                None,
                None,
            )
            .unwrap(),
        )
        .await
        .unwrap();

    rt.location_commands
        .handle(
            UpdateLocationCommand::new(
                &location_id.to_string(),
                Some("Kitchen Garden"),
                None,
                FieldUpdate::Keep,
            )
            .unwrap(),
        )
        .await
        .unwrap();

    let view = rt
        .unit_queries
        .handle(FindGrowingUnitByIdQuery { id: unit })
        .await
        .unwrap();
    assert_eq!(view.location.unwrap().name, "Kitchen Garden");

    // Deleting the location clears the embedded snapshot but keeps the unit.
    rt.location_commands
        .handle(DeleteLocationCommand { id: location_id })
        .await
        .unwrap();

    let view = rt
        .unit_queries
        .handle(FindGrowingUnitByIdQuery { id: unit })
        .await
        .unwrap();
    assert!(view.location.is_none());
    assert_eq!(view.location_id, Some(location_id));
}

#[tokio::test]
async fn species_profile_round_trip() {
    let rt = CoreRuntime::bootstrap();

    let id = rt
        .species_commands
        .handle(
            CreateSpeciesCommand::new(
                "Basil",
                Some("Ocimum basilicum"),
                Some((5.5, 6.5)),
                Some((5, 10)),
                None,
            )
            .unwrap(),
        )
        .await
        .unwrap();
    let raw = id.to_string();

    let view = rt
        .species_queries
        .handle(FindSpeciesByIdQuery { id })
        .await
        .unwrap();
    assert_eq!(view.scientific_name.as_deref(), Some("Ocimum basilicum"));
    assert_eq!(view.optimal_ph.unwrap().min(), 5.5);

    rt.species_commands
        .handle(
            UpdateSpeciesCommand::new(
                &raw,
                None,
                FieldUpdate::Keep,
                FieldUpdate::Set((6.0, 7.0)),
                FieldUpdate::Clear,
                FieldUpdate::Keep,
            )
            .unwrap(),
        )
        .await
        .unwrap();

    let view = rt
        .species_queries
        .handle(FindSpeciesByIdQuery { id })
        .await
        .unwrap();
    assert_eq!(view.optimal_ph.unwrap().max(), 7.0);
    assert!(view.germination.is_none());

    rt.species_commands
        .handle(DeleteSpeciesCommand { id })
        .await
        .unwrap();
    let err = rt
        .species_queries
        .handle(FindSpeciesByIdQuery { id })
        .await
        .unwrap_err();
    assert_eq!(err, ApplicationError::SpeciesNotFound(id));
}

#[tokio::test]
async fn lowering_capacity_below_occupancy_is_rejected() {
    let rt = CoreRuntime::bootstrap();

    let unit = rt
        .unit_commands
        .handle(CreateGrowingUnitCommand::new("Bed", "BED", None, 3, None, None).unwrap())
        .await
        .unwrap();
    let raw = unit.to_string();

    for name in ["Basil", "Thyme"] {
        rt.plant_commands
            .handle(CreatePlantCommand::new(&raw, name, None, None, None, None).unwrap())
            .await
            .unwrap();
    }

    let err = rt
        .unit_commands
        .handle(
            UpdateGrowingUnitCommand::new(
                &raw,
                None,
                None,
                FieldUpdate::Keep,
                Some(1),
                FieldUpdate::Keep,
                FieldUpdate::Keep,
            )
            .unwrap(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::CapacityBelowOccupancy {
            requested: 1,
            occupancy: 2,
            ..
        })
    ));

    let view = rt
        .unit_queries
        .handle(FindGrowingUnitByIdQuery { id: unit })
        .await
        .unwrap();
    assert_eq!(view.capacity, 3);
}
