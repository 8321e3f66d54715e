//! Command and Query handlers implementing the CQRS pattern

pub mod command_handlers;
pub mod query_handlers;

pub use command_handlers::{
    GrowingUnitCommandHandler, LocationCommandHandler, PlantCommandHandler, SpeciesCommandHandler,
};
pub use query_handlers::{
    GrowingUnitQueryHandler, LocationQueryHandler, PlantQueryHandler, SpeciesQueryHandler,
};

use crate::application::ApplicationResult;
use async_trait::async_trait;

/// Handler for one command type, producing one response type.
///
/// Canonical shape of an implementation: assert preconditions, mutate or
/// construct the aggregate, save, publish the uncommitted events, commit,
/// and return the minimal result - typically the id, never a view model.
#[async_trait]
pub trait CommandHandler<TCommand, TResponse>: Send + Sync {
    async fn handle(&self, command: TCommand) -> ApplicationResult<TResponse>;
}

/// Handler for one query type, producing one response type.
#[async_trait]
pub trait QueryHandler<TQuery, TResponse>: Send + Sync {
    async fn handle(&self, query: TQuery) -> ApplicationResult<TResponse>;
}
