use std::sync::Arc;

use tracing::{info, instrument};

use tradepost_market::models::{
    engagement::Engagement,
    transaction::{Transaction, TransactionSource},
};
use tradepost_types::{
    Result,
    errors::{ApplicationError, MarketError},
    statuses::EngagementStatus,
};

use crate::{
    cache::CacheEntity,
    command_handlers::helpers::{existing_transaction, record_transaction},
    config::Config,
    cqrs::{CommandHandler, commands::CompleteServiceRun},
    effects::Outcome,
    notifications::service_run_completed,
    uow::UnitOfWork,
};

pub struct CompleteServiceRunCommandHandler {}

impl Default for CompleteServiceRunCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CompleteServiceRunCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<CompleteServiceRun> for CompleteServiceRunCommandHandler {
    /// Same contract as trade completion, except the service itself stays
    /// as it is so the provider can keep taking offers.
    #[instrument(skip_all, fields(service_run_id = %command.service_run_id, actor_id = %command.actor_id))]
    async fn handle(
        &self,
        command: CompleteServiceRun,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<Outcome<Transaction>, ApplicationError> {
        let run_repo = uow.service_runs();

        let mut run = run_repo.get_by_id(command.service_run_id).await?;
        run.ensure_participant(command.actor_id)?;

        let source = TransactionSource::ServiceRun(run.id);
        if run.lifecycle.is_completed() {
            return Ok(Outcome::new(existing_transaction(uow, source).await?));
        }

        run.complete()?;
        if !run_repo.transition(&run, EngagementStatus::Active).await? {
            let current = run_repo.get_by_id(run.id).await?;
            if current.lifecycle.is_completed() {
                return Ok(Outcome::new(existing_transaction(uow, source).await?));
            }
            return Err(ApplicationError::Market(MarketError::ServiceRunNotActive {
                service_run_id: run.id,
                status: current.status(),
            }));
        }

        let offer_repo = uow.offers();
        let mut offer = offer_repo.get_by_id(run.offer_id).await?;
        offer.sync_completed();
        offer_repo.save(&offer).await?;

        let service = uow.services().get_by_id(run.service_id).await?;

        let transaction =
            record_transaction(uow, Transaction::for_service_run(&run, &service, &offer)).await?;
        info!(transaction_id = %transaction.id, "Service run completed");

        let recipient = run.other_participant(command.actor_id);
        Ok(Outcome::new(transaction)
            .notify(service_run_completed(&run, recipient, &service.name))
            .invalidate(CacheEntity::ServiceRun, run.id)
            .invalidate(CacheEntity::Offer, offer.id))
    }
}
