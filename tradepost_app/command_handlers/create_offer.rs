use std::sync::Arc;

use tracing::{info, instrument};

use tradepost_market::models::offer::{Offer, OfferTarget};
use tradepost_types::{
    Result,
    errors::{ApplicationError, MarketError},
};

use crate::{
    command_handlers::helpers::load_subject,
    config::Config,
    cqrs::{CommandHandler, commands::CreateOffer},
    effects::Outcome,
    notifications::new_offer,
    uow::UnitOfWork,
};

pub struct CreateOfferCommandHandler {}

impl Default for CreateOfferCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateOfferCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<CreateOffer> for CreateOfferCommandHandler {
    #[instrument(skip_all, fields(requester_id = %command.requester_id))]
    async fn handle(
        &self,
        command: CreateOffer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<Outcome<Offer>, ApplicationError> {
        let target = OfferTarget::from_parts(command.listing_id, command.service_id)?;

        if command.offered_items.len() > config.max_offered_items {
            return Err(ApplicationError::Market(MarketError::TooManyOfferedItems {
                limit: config.max_offered_items,
            }));
        }

        let subject = load_subject(uow, &target).await?;
        if subject.owner_id() == command.requester_id {
            return Err(ApplicationError::Market(MarketError::SelfOffer));
        }
        subject.ensure_active()?;

        if let OfferTarget::Listing(listing_id) = target {
            if uow.trades().has_active_for_listing(listing_id).await? {
                return Err(ApplicationError::Market(MarketError::ActiveTradeExists {
                    listing_id,
                }));
            }
        }

        let offer = Offer::new(
            command.requester_id,
            target,
            command.offered_items,
            command.message,
        );
        uow.offers().create(&offer).await?;
        info!(offer_id = %offer.id, kind = %offer.kind(), target_id = %target.id(), "Offer created");

        let notification = new_offer(&offer, &subject);
        Ok(Outcome::new(offer).notify(notification))
    }
}
