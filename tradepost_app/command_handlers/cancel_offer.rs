use std::sync::Arc;

use tracing::info;

use tradepost_market::models::offer::Offer;
use tradepost_types::{
    Result,
    errors::{ApplicationError, MarketError},
    statuses::OfferStatus,
};

use crate::{
    cache::CacheEntity,
    config::Config,
    cqrs::{CommandHandler, commands::CancelOffer},
    effects::Outcome,
    uow::UnitOfWork,
};

pub struct CancelOfferCommandHandler {}

impl Default for CancelOfferCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelOfferCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<CancelOffer> for CancelOfferCommandHandler {
    async fn handle(
        &self,
        command: CancelOffer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<Outcome<Offer>, ApplicationError> {
        let offer_repo = uow.offers();

        let mut offer = offer_repo.get_by_id(command.offer_id).await?;
        offer.ensure_requester(command.actor_id)?;
        offer.cancel()?;

        if !offer_repo.transition(&offer, OfferStatus::Pending).await? {
            let current = offer_repo.get_by_id(offer.id).await?;
            return Err(ApplicationError::Market(MarketError::OfferNotPending {
                offer_id: offer.id,
                status: current.status,
            }));
        }
        info!(offer_id = %offer.id, "Offer cancelled by requester");

        let offer_id = offer.id;
        Ok(Outcome::new(offer).invalidate(CacheEntity::Offer, offer_id))
    }
}
