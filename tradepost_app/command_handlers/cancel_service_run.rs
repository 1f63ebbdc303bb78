use std::sync::Arc;

use tracing::info;

use tradepost_market::models::{engagement::Engagement, service_run::ServiceRun};
use tradepost_types::{
    Result,
    errors::{ApplicationError, MarketError},
    statuses::EngagementStatus,
};

use crate::{
    cache::CacheEntity,
    config::Config,
    cqrs::{CommandHandler, commands::CancelServiceRun},
    effects::Outcome,
    notifications::service_run_cancelled,
    uow::UnitOfWork,
};

pub struct CancelServiceRunCommandHandler {}

impl Default for CancelServiceRunCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelServiceRunCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<CancelServiceRun> for CancelServiceRunCommandHandler {
    async fn handle(
        &self,
        command: CancelServiceRun,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<Outcome<ServiceRun>, ApplicationError> {
        let run_repo = uow.service_runs();

        let mut run = run_repo.get_by_id(command.service_run_id).await?;
        run.ensure_participant(command.actor_id)?;
        run.cancel(command.actor_id, command.reason)?;

        if !run_repo.transition(&run, EngagementStatus::Active).await? {
            let current = run_repo.get_by_id(run.id).await?;
            return Err(ApplicationError::Market(MarketError::ServiceRunNotActive {
                service_run_id: run.id,
                status: current.status(),
            }));
        }

        let offer_repo = uow.offers();
        let mut offer = offer_repo.get_by_id(run.offer_id).await?;
        offer.sync_cancelled();
        offer_repo.save(&offer).await?;

        info!(service_run_id = %run.id, cancelled_by = %command.actor_id, "Service run cancelled");

        let notification = service_run_cancelled(&run, run.other_participant(command.actor_id));
        let (run_id, offer_id) = (run.id, offer.id);
        Ok(Outcome::new(run)
            .notify(notification)
            .invalidate(CacheEntity::ServiceRun, run_id)
            .invalidate(CacheEntity::Offer, offer_id))
    }
}
