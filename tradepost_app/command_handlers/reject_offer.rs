use std::sync::Arc;

use tracing::info;

use tradepost_market::models::offer::{Offer, OfferParties};
use tradepost_types::{
    Result,
    errors::{ApplicationError, DbError, MarketError},
    statuses::OfferStatus,
};

use crate::{
    cache::CacheEntity,
    command_handlers::helpers::load_subject,
    config::Config,
    cqrs::{CommandHandler, commands::RejectOffer},
    effects::Outcome,
    notifications::offer_rejected,
    uow::UnitOfWork,
};

pub struct RejectOfferCommandHandler {}

impl Default for RejectOfferCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl RejectOfferCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<RejectOffer> for RejectOfferCommandHandler {
    async fn handle(
        &self,
        command: RejectOffer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<Outcome<Offer>, ApplicationError> {
        let offer_repo = uow.offers();

        let mut offer = offer_repo.get_by_id(command.offer_id).await?;
        let subject = load_subject(uow, &offer.target).await?;

        OfferParties::new(&offer, &subject).ensure_owner(command.actor_id)?;
        offer.ensure_pending()?;

        // Retired reasons can't be picked anymore.
        let reason = uow
            .decline_reasons()
            .get_by_id(command.decline_reason_id)
            .await?;
        if !reason.is_active {
            return Err(ApplicationError::Db(DbError::DeclineReasonNotFound(
                reason.id,
            )));
        }

        offer.reject(reason.id, command.note)?;
        if !offer_repo.transition(&offer, OfferStatus::Pending).await? {
            let current = offer_repo.get_by_id(offer.id).await?;
            return Err(ApplicationError::Market(MarketError::OfferNotPending {
                offer_id: offer.id,
                status: current.status,
            }));
        }
        info!(offer_id = %offer.id, reason = %reason.code, "Offer rejected");

        let notification = offer_rejected(&offer, &subject, &reason.label);
        let offer_id = offer.id;
        Ok(Outcome::new(offer)
            .notify(notification)
            .invalidate(CacheEntity::Offer, offer_id))
    }
}
