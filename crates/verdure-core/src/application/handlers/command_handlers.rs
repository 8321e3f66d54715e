//! Command handlers implementing business use cases
//!
//! One handler struct per aggregate. Every use case follows the same
//! sequence: assert preconditions, mutate or construct the aggregate, save
//! through the write repository, publish the uncommitted events, commit.
//! A save failure prevents any publication; a projection failure is
//! absorbed by the publisher's retry/dead-letter policy and never aborts
//! the command.

use crate::{
    application::{
        ApplicationResult,
        commands::*,
        handlers::CommandHandler,
        services::{
            AssertGrowingUnitExists, AssertLocationExists, AssertPlantExists, AssertSpeciesExists,
        },
    },
    ports::{EventPublisher, GrowingUnitRepository, LocationRepository, SpeciesRepository},
};
use async_trait::async_trait;
use std::sync::Arc;
use verdure_domain::aggregates::{GrowingUnit, Location, PlantSpecies};
use verdure_domain::patch::FieldUpdate;
use verdure_domain::value_objects::{GrowingUnitId, LocationId, PlantId, SpeciesId};

/// Handler for location commands
#[derive(Debug)]
pub struct LocationCommandHandler<R, P>
where
    R: LocationRepository,
    P: EventPublisher,
{
    repository: Arc<R>,
    assert_exists: AssertLocationExists<R>,
    publisher: Arc<P>,
}

impl<R, P> LocationCommandHandler<R, P>
where
    R: LocationRepository,
    P: EventPublisher,
{
    pub fn new(repository: Arc<R>, publisher: Arc<P>) -> Self {
        Self {
            assert_exists: AssertLocationExists::new(repository.clone()),
            repository,
            publisher,
        }
    }
}

#[async_trait]
impl<R, P> CommandHandler<CreateLocationCommand, LocationId> for LocationCommandHandler<R, P>
where
    R: LocationRepository,
    P: EventPublisher,
{
    async fn handle(&self, command: CreateLocationCommand) -> ApplicationResult<LocationId> {
        let mut location = Location::create(
            command.props.name,
            command.props.kind,
            command.props.description,
        );
        let location_id = location.id();

        self.repository.save(location.clone()).await?;

        self.publisher
            .publish_batch(location.uncommitted_events().to_vec())
            .await?;
        location.commit();

        Ok(location_id)
    }
}

#[async_trait]
impl<R, P> CommandHandler<UpdateLocationCommand, ()> for LocationCommandHandler<R, P>
where
    R: LocationRepository,
    P: EventPublisher,
{
    async fn handle(&self, command: UpdateLocationCommand) -> ApplicationResult<()> {
        let mut location = self.assert_exists.execute(command.id).await?;

        location.update(command.update);

        self.repository.save(location.clone()).await?;

        self.publisher
            .publish_batch(location.uncommitted_events().to_vec())
            .await?;
        location.commit();

        Ok(())
    }
}

#[async_trait]
impl<R, P> CommandHandler<DeleteLocationCommand, ()> for LocationCommandHandler<R, P>
where
    R: LocationRepository,
    P: EventPublisher,
{
    async fn handle(&self, command: DeleteLocationCommand) -> ApplicationResult<()> {
        let mut location = self.assert_exists.execute(command.id).await?;

        location.delete();

        self.repository.delete(location.id()).await?;

        self.publisher
            .publish_batch(location.uncommitted_events().to_vec())
            .await?;
        location.commit();

        Ok(())
    }
}

/// Handler for growing unit commands
#[derive(Debug)]
pub struct GrowingUnitCommandHandler<U, L, P>
where
    U: GrowingUnitRepository,
    L: LocationRepository,
    P: EventPublisher,
{
    units: Arc<U>,
    assert_unit: AssertGrowingUnitExists<U>,
    assert_location: AssertLocationExists<L>,
    publisher: Arc<P>,
}

impl<U, L, P> GrowingUnitCommandHandler<U, L, P>
where
    U: GrowingUnitRepository,
    L: LocationRepository,
    P: EventPublisher,
{
    pub fn new(units: Arc<U>, locations: Arc<L>, publisher: Arc<P>) -> Self {
        Self {
            assert_unit: AssertGrowingUnitExists::new(units.clone()),
            assert_location: AssertLocationExists::new(locations),
            units,
            publisher,
        }
    }
}

#[async_trait]
impl<U, L, P> CommandHandler<CreateGrowingUnitCommand, GrowingUnitId>
    for GrowingUnitCommandHandler<U, L, P>
where
    U: GrowingUnitRepository,
    L: LocationRepository,
    P: EventPublisher,
{
    async fn handle(
        &self,
        command: CreateGrowingUnitCommand,
    ) -> ApplicationResult<GrowingUnitId> {
        // The referenced location must exist before the unit is created.
        if let Some(location_id) = command.props.location_id {
            self.assert_location.execute(location_id).await?;
        }

        let mut unit = GrowingUnit::create(command.props);
        let unit_id = unit.id();

        self.units.save(unit.clone()).await?;

        self.publisher
            .publish_batch(unit.uncommitted_events().to_vec())
            .await?;
        unit.commit();

        Ok(unit_id)
    }
}

#[async_trait]
impl<U, L, P> CommandHandler<UpdateGrowingUnitCommand, ()> for GrowingUnitCommandHandler<U, L, P>
where
    U: GrowingUnitRepository,
    L: LocationRepository,
    P: EventPublisher,
{
    async fn handle(&self, command: UpdateGrowingUnitCommand) -> ApplicationResult<()> {
        let mut unit = self.assert_unit.execute(command.id).await?;

        if let FieldUpdate::Set(location_id) = command.update.location_id {
            self.assert_location.execute(location_id).await?;
        }

        unit.update(command.update)?;

        self.units.save(unit.clone()).await?;

        self.publisher
            .publish_batch(unit.uncommitted_events().to_vec())
            .await?;
        unit.commit();

        Ok(())
    }
}

#[async_trait]
impl<U, L, P> CommandHandler<DeleteGrowingUnitCommand, ()> for GrowingUnitCommandHandler<U, L, P>
where
    U: GrowingUnitRepository,
    L: LocationRepository,
    P: EventPublisher,
{
    async fn handle(&self, command: DeleteGrowingUnitCommand) -> ApplicationResult<()> {
        let mut unit = self.assert_unit.execute(command.id).await?;

        unit.delete();

        self.units.delete(unit.id()).await?;

        self.publisher
            .publish_batch(unit.uncommitted_events().to_vec())
            .await?;
        unit.commit();

        Ok(())
    }
}

/// Handler for plant commands
///
/// Plants are owned by their growing unit, so every plant command loads the
/// owning unit aggregate and mutates the plant through it.
#[derive(Debug)]
pub struct PlantCommandHandler<U, S, P>
where
    U: GrowingUnitRepository,
    S: SpeciesRepository,
    P: EventPublisher,
{
    units: Arc<U>,
    assert_unit: AssertGrowingUnitExists<U>,
    assert_plant: AssertPlantExists<U>,
    assert_species: AssertSpeciesExists<S>,
    publisher: Arc<P>,
}

impl<U, S, P> PlantCommandHandler<U, S, P>
where
    U: GrowingUnitRepository,
    S: SpeciesRepository,
    P: EventPublisher,
{
    pub fn new(units: Arc<U>, species: Arc<S>, publisher: Arc<P>) -> Self {
        Self {
            assert_unit: AssertGrowingUnitExists::new(units.clone()),
            assert_plant: AssertPlantExists::new(units.clone()),
            assert_species: AssertSpeciesExists::new(species),
            units,
            publisher,
        }
    }
}

#[async_trait]
impl<U, S, P> CommandHandler<CreatePlantCommand, PlantId> for PlantCommandHandler<U, S, P>
where
    U: GrowingUnitRepository,
    S: SpeciesRepository,
    P: EventPublisher,
{
    async fn handle(&self, command: CreatePlantCommand) -> ApplicationResult<PlantId> {
        let mut unit = self.assert_unit.execute(command.growing_unit_id).await?;

        if let Some(species_id) = command.props.species_id {
            self.assert_species.execute(species_id).await?;
        }

        let plant_id = unit.add_plant(command.props)?;

        self.units.save(unit.clone()).await?;

        self.publisher
            .publish_batch(unit.uncommitted_events().to_vec())
            .await?;
        unit.commit();

        Ok(plant_id)
    }
}

#[async_trait]
impl<U, S, P> CommandHandler<UpdatePlantCommand, ()> for PlantCommandHandler<U, S, P>
where
    U: GrowingUnitRepository,
    S: SpeciesRepository,
    P: EventPublisher,
{
    async fn handle(&self, command: UpdatePlantCommand) -> ApplicationResult<()> {
        let mut unit = self.assert_plant.execute(command.plant_id).await?;

        if let FieldUpdate::Set(species_id) = command.update.species_id {
            self.assert_species.execute(species_id).await?;
        }

        unit.update_plant(command.plant_id, command.update)?;

        self.units.save(unit.clone()).await?;

        self.publisher
            .publish_batch(unit.uncommitted_events().to_vec())
            .await?;
        unit.commit();

        Ok(())
    }
}

#[async_trait]
impl<U, S, P> CommandHandler<DeletePlantCommand, ()> for PlantCommandHandler<U, S, P>
where
    U: GrowingUnitRepository,
    S: SpeciesRepository,
    P: EventPublisher,
{
    async fn handle(&self, command: DeletePlantCommand) -> ApplicationResult<()> {
        let mut unit = self.assert_plant.execute(command.plant_id).await?;

        unit.remove_plant(command.plant_id)?;

        self.units.save(unit.clone()).await?;

        self.publisher
            .publish_batch(unit.uncommitted_events().to_vec())
            .await?;
        unit.commit();

        Ok(())
    }
}

#[async_trait]
impl<U, S, P> CommandHandler<TransplantPlantCommand, ()> for PlantCommandHandler<U, S, P>
where
    U: GrowingUnitRepository,
    S: SpeciesRepository,
    P: EventPublisher,
{
    async fn handle(&self, command: TransplantPlantCommand) -> ApplicationResult<()> {
        let mut source = self.assert_plant.execute(command.plant_id).await?;

        // Transplanting into the current unit is a no-op.
        if source.id() == command.target_unit_id {
            return Ok(());
        }

        let mut target = self.assert_unit.execute(command.target_unit_id).await?;

        // Both in-memory mutations must succeed before either save; the
        // capacity check on the target happens here.
        let plant = source.release_for_transplant(command.plant_id)?;
        target.receive_transplant(plant, source.id())?;

        self.units.save(source.clone()).await?;
        self.units.save(target.clone()).await?;

        self.publisher
            .publish_batch(target.uncommitted_events().to_vec())
            .await?;
        target.commit();
        source.commit();

        Ok(())
    }
}

#[async_trait]
impl<U, S, P> CommandHandler<ChangePlantStatusCommand, ()> for PlantCommandHandler<U, S, P>
where
    U: GrowingUnitRepository,
    S: SpeciesRepository,
    P: EventPublisher,
{
    async fn handle(&self, command: ChangePlantStatusCommand) -> ApplicationResult<()> {
        let mut unit = self.assert_plant.execute(command.plant_id).await?;

        unit.change_plant_status(command.plant_id, command.status)?;

        self.units.save(unit.clone()).await?;

        self.publisher
            .publish_batch(unit.uncommitted_events().to_vec())
            .await?;
        unit.commit();

        Ok(())
    }
}

/// Handler for plant species commands
#[derive(Debug)]
pub struct SpeciesCommandHandler<S, P>
where
    S: SpeciesRepository,
    P: EventPublisher,
{
    repository: Arc<S>,
    assert_exists: AssertSpeciesExists<S>,
    publisher: Arc<P>,
}

impl<S, P> SpeciesCommandHandler<S, P>
where
    S: SpeciesRepository,
    P: EventPublisher,
{
    pub fn new(repository: Arc<S>, publisher: Arc<P>) -> Self {
        Self {
            assert_exists: AssertSpeciesExists::new(repository.clone()),
            repository,
            publisher,
        }
    }
}

#[async_trait]
impl<S, P> CommandHandler<CreateSpeciesCommand, SpeciesId> for SpeciesCommandHandler<S, P>
where
    S: SpeciesRepository,
    P: EventPublisher,
{
    async fn handle(&self, command: CreateSpeciesCommand) -> ApplicationResult<SpeciesId> {
        let mut species = PlantSpecies::create(command.props);
        let species_id = species.id();

        self.repository.save(species.clone()).await?;

        self.publisher
            .publish_batch(species.uncommitted_events().to_vec())
            .await?;
        species.commit();

        Ok(species_id)
    }
}

#[async_trait]
impl<S, P> CommandHandler<UpdateSpeciesCommand, ()> for SpeciesCommandHandler<S, P>
where
    S: SpeciesRepository,
    P: EventPublisher,
{
    async fn handle(&self, command: UpdateSpeciesCommand) -> ApplicationResult<()> {
        let mut species = self.assert_exists.execute(command.id).await?;

        species.update(command.update);

        self.repository.save(species.clone()).await?;

        self.publisher
            .publish_batch(species.uncommitted_events().to_vec())
            .await?;
        species.commit();

        Ok(())
    }
}

#[async_trait]
impl<S, P> CommandHandler<DeleteSpeciesCommand, ()> for SpeciesCommandHandler<S, P>
where
    S: SpeciesRepository,
    P: EventPublisher,
{
    async fn handle(&self, command: DeleteSpeciesCommand) -> ApplicationResult<()> {
        let mut species = self.assert_exists.execute(command.id).await?;

        species.delete();

        self.repository.delete(species.id()).await?;

        self.publisher
            .publish_batch(species.uncommitted_events().to_vec())
            .await?;
        species.commit();

        Ok(())
    }
}
