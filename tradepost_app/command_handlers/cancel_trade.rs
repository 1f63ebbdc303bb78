use std::sync::Arc;

use tracing::{debug, info};

use tradepost_market::models::{engagement::Engagement, trade::Trade};
use tradepost_types::{
    Result,
    errors::{ApplicationError, MarketError},
    statuses::EngagementStatus,
};

use crate::{
    cache::CacheEntity,
    config::Config,
    cqrs::{CommandHandler, commands::CancelTrade},
    effects::Outcome,
    notifications::trade_cancelled,
    uow::UnitOfWork,
};

pub struct CancelTradeCommandHandler {}

impl Default for CancelTradeCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelTradeCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<CancelTrade> for CancelTradeCommandHandler {
    async fn handle(
        &self,
        command: CancelTrade,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<Outcome<Trade>, ApplicationError> {
        let trade_repo = uow.trades();

        let mut trade = trade_repo.get_by_id(command.trade_id).await?;
        trade.ensure_participant(command.actor_id)?;
        trade.cancel(command.actor_id, command.reason)?;

        if !trade_repo.transition(&trade, EngagementStatus::Active).await? {
            let current = trade_repo.get_by_id(trade.id).await?;
            return Err(ApplicationError::Market(MarketError::TradeNotActive {
                trade_id: trade.id,
                status: current.status(),
            }));
        }

        let offer_repo = uow.offers();
        let mut offer = offer_repo.get_by_id(trade.offer_id).await?;
        offer.sync_cancelled();
        offer_repo.save(&offer).await?;

        let listing_repo = uow.listings();
        let mut listing = listing_repo.get_by_id(trade.listing_id).await?;
        if listing.relist() {
            listing_repo.save(&listing).await?;
        } else {
            debug!(listing_id = %listing.id, status = %listing.status, "Listing left as is");
        }
        info!(trade_id = %trade.id, cancelled_by = %command.actor_id, "Trade cancelled");

        let notification = trade_cancelled(&trade, trade.other_participant(command.actor_id));
        let (trade_id, offer_id, listing_id) = (trade.id, offer.id, listing.id);
        Ok(Outcome::new(trade)
            .notify(notification)
            .invalidate(CacheEntity::Trade, trade_id)
            .invalidate(CacheEntity::Offer, offer_id)
            .invalidate(CacheEntity::Listing, listing_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradepost_market::{
        models::offer::OfferTarget,
        test_utils::{ListingFactoryOptions, OfferFactoryOptions, listing_factory, offer_factory},
    };
    use tradepost_types::{
        errors::ErrorKind,
        statuses::{ListingStatus, OfferStatus},
    };

    use crate::{effects::Effect, test_utils::tests::MockUnitOfWork};

    fn setup(listing_status: ListingStatus) -> (Box<dyn UnitOfWork<'static> + 'static>, Trade) {
        let mock = MockUnitOfWork::new();
        let listing = listing_factory(ListingFactoryOptions {
            status: Some(listing_status),
            ..Default::default()
        });
        let offer = offer_factory(OfferFactoryOptions {
            target: Some(OfferTarget::Listing(listing.id)),
            status: Some(OfferStatus::Accepted),
            ..Default::default()
        });
        let trade = Trade::new(offer.id, listing.id, listing.seller_id, offer.requester_id);
        mock.add_listing(listing);
        mock.add_offer(offer);
        mock.add_trade(trade.clone());
        (Box::new(mock), trade)
    }

    #[tokio::test]
    async fn test_cancel_relists_pending_listing() -> Result<()> {
        let config = Arc::new(Config::from_env());
        let (uow, trade) = setup(ListingStatus::Pending);

        let outcome = CancelTradeCommandHandler::new()
            .handle(
                CancelTrade {
                    actor_id: trade.seller_id,
                    trade_id: trade.id,
                    reason: Some("buyer unresponsive".to_string()),
                },
                &uow,
                &config,
            )
            .await?;

        let cancelled = outcome.value;
        assert_eq!(cancelled.status(), EngagementStatus::Cancelled);
        assert_eq!(cancelled.lifecycle.cancelled_by, Some(trade.seller_id));
        assert_eq!(
            cancelled.lifecycle.cancel_reason.as_deref(),
            Some("buyer unresponsive")
        );
        assert_eq!(
            uow.listings().get_by_id(trade.listing_id).await?.status,
            ListingStatus::Active
        );
        assert_eq!(
            uow.offers().get_by_id(trade.offer_id).await?.status,
            OfferStatus::Cancelled
        );
        assert!(outcome.effects.iter().any(
            |e| matches!(e, Effect::Notify(n) if n.user_id == trade.buyer_id)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_keeps_final_listing() -> Result<()> {
        let config = Arc::new(Config::from_env());
        let (uow, trade) = setup(ListingStatus::Cancelled);

        CancelTradeCommandHandler::new()
            .handle(
                CancelTrade {
                    actor_id: trade.buyer_id,
                    trade_id: trade.id,
                    reason: None,
                },
                &uow,
                &config,
            )
            .await?;

        assert_eq!(
            uow.listings().get_by_id(trade.listing_id).await?.status,
            ListingStatus::Cancelled
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_cannot_cancel_twice() -> Result<()> {
        let config = Arc::new(Config::from_env());
        let (uow, trade) = setup(ListingStatus::Active);
        let handler = CancelTradeCommandHandler::new();
        let command = CancelTrade {
            actor_id: trade.buyer_id,
            trade_id: trade.id,
            reason: None,
        };

        handler.handle(command.clone(), &uow, &config).await?;
        let err = handler.handle(command, &uow, &config).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        Ok(())
    }
}
