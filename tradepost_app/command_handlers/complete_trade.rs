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
    cqrs::{CommandHandler, commands::CompleteTrade},
    effects::Outcome,
    notifications::trade_completed,
    uow::UnitOfWork,
};

pub struct CompleteTradeCommandHandler {}

impl Default for CompleteTradeCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CompleteTradeCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<CompleteTrade> for CompleteTradeCommandHandler {
    /// Completing an already completed trade returns its transaction and
    /// runs no side effects.
    #[instrument(skip_all, fields(trade_id = %command.trade_id, actor_id = %command.actor_id))]
    async fn handle(
        &self,
        command: CompleteTrade,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<Outcome<Transaction>, ApplicationError> {
        let trade_repo = uow.trades();

        let mut trade = trade_repo.get_by_id(command.trade_id).await?;
        trade.ensure_participant(command.actor_id)?;

        let source = TransactionSource::Trade(trade.id);
        if trade.lifecycle.is_completed() {
            return Ok(Outcome::new(existing_transaction(uow, source).await?));
        }

        trade.complete()?;
        if !trade_repo.transition(&trade, EngagementStatus::Active).await? {
            let current = trade_repo.get_by_id(trade.id).await?;
            if current.lifecycle.is_completed() {
                return Ok(Outcome::new(existing_transaction(uow, source).await?));
            }
            return Err(ApplicationError::Market(MarketError::TradeNotActive {
                trade_id: trade.id,
                status: current.status(),
            }));
        }

        let offer_repo = uow.offers();
        let mut offer = offer_repo.get_by_id(trade.offer_id).await?;
        offer.sync_completed();
        offer_repo.save(&offer).await?;

        let listing_repo = uow.listings();
        let mut listing = listing_repo.get_by_id(trade.listing_id).await?;
        listing.mark_completed();
        listing_repo.save(&listing).await?;

        let transaction =
            record_transaction(uow, Transaction::for_trade(&trade, &listing, &offer)).await?;
        info!(transaction_id = %transaction.id, "Trade completed");

        let recipient = trade.other_participant(command.actor_id);
        Ok(Outcome::new(transaction)
            .notify(trade_completed(&trade, recipient, &listing.name))
            .invalidate(CacheEntity::Trade, trade.id)
            .invalidate(CacheEntity::Offer, offer.id)
            .invalidate(CacheEntity::Listing, listing.id))
    }
}
