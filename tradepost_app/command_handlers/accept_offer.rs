use std::sync::Arc;

use tracing::{info, instrument};

use tradepost_market::models::{
    chat::Chat,
    offer::{OfferParties, OfferSubject},
    service_run::ServiceRun,
    trade::Trade,
};
use tradepost_types::{
    Result,
    errors::{ApplicationError, MarketError},
    statuses::OfferStatus,
};

use crate::{
    cache::CacheEntity,
    command_handlers::helpers::load_subject,
    config::Config,
    cqrs::{
        CommandHandler,
        commands::{AcceptOffer, AcceptedOffer},
    },
    effects::Outcome,
    notifications::offer_accepted,
    uow::UnitOfWork,
};

pub struct AcceptOfferCommandHandler {}

impl Default for AcceptOfferCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl AcceptOfferCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<AcceptOffer> for AcceptOfferCommandHandler {
    #[instrument(skip_all, fields(offer_id = %command.offer_id, actor_id = %command.actor_id))]
    async fn handle(
        &self,
        command: AcceptOffer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<Outcome<AcceptedOffer>, ApplicationError> {
        let offer_repo = uow.offers();

        let mut offer = offer_repo.get_by_id(command.offer_id).await?;
        let subject = load_subject(uow, &offer.target).await?;

        OfferParties::new(&offer, &subject).ensure_owner(command.actor_id)?;
        offer.ensure_pending()?;
        subject.ensure_active()?;

        // Another offer on the same listing may have been accepted meanwhile.
        if let OfferSubject::Listing(listing) = &subject {
            if uow.trades().has_active_for_listing(listing.id).await? {
                return Err(ApplicationError::Market(MarketError::ActiveTradeExists {
                    listing_id: listing.id,
                }));
            }
        }

        offer.accept()?;
        if !offer_repo.transition(&offer, OfferStatus::Pending).await? {
            let current = offer_repo.get_by_id(offer.id).await?;
            return Err(ApplicationError::Market(MarketError::OfferNotPending {
                offer_id: offer.id,
                status: current.status,
            }));
        }

        let (trade, service_run, chat) = match &subject {
            OfferSubject::Listing(listing) => {
                let trade = Trade::new(offer.id, listing.id, listing.seller_id, offer.requester_id);
                uow.trades().create(&trade).await?;
                let chat = Chat::for_trade(&trade);
                info!(trade_id = %trade.id, listing_id = %listing.id, "Offer accepted, trade started");
                (Some(trade), None, chat)
            }
            OfferSubject::Service(service) => {
                let run =
                    ServiceRun::new(offer.id, service.id, service.provider_id, offer.requester_id);
                uow.service_runs().create(&run).await?;
                let chat = Chat::for_service_run(&run);
                info!(service_run_id = %run.id, service_id = %service.id, "Offer accepted, service run started");
                (None, Some(run), chat)
            }
        };
        uow.chats().create(&chat).await?;

        let subject_kind = match &subject {
            OfferSubject::Listing(_) => CacheEntity::Listing,
            OfferSubject::Service(_) => CacheEntity::Service,
        };
        let notification = offer_accepted(&offer, &subject);
        let offer_id = offer.id;

        Ok(Outcome::new(AcceptedOffer {
            offer,
            trade,
            service_run,
            chat,
        })
        .notify(notification)
        .invalidate(CacheEntity::Offer, offer_id)
        .invalidate(subject_kind, subject.id()))
    }
}
