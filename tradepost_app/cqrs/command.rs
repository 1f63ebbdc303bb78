use async_trait::async_trait;
use std::sync::Arc;
use tradepost_types::errors::ApplicationError;

use crate::{config::Config, effects::Outcome, uow::UnitOfWork};

/// A marker trait for Command structs.
/// Commands are operations that change the state of the system.
pub trait Command: Send + Sync {
    /// The data type handed back to the caller after the command succeeds.
    type Output: Send + Sync;
}

/// A trait for handlers that execute Commands.
/// It receives the command and a Unit of Work (&Box<dyn UnitOfWork...>) to use.
/// It should NOT manage the transaction lifecycle (commit/rollback),
/// nor run the effects it returns; that is the job of the AppBus.
#[async_trait]
pub trait CommandHandler<C: Command> {
    async fn handle(
        &self,
        cmd: C,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<Outcome<C::Output>, ApplicationError>;
}
