use std::sync::Arc;

use tradepost_market::models::{
    chat::ChatParent, engagement::Engagement, transaction::TransactionSource,
};
use tradepost_types::Result;

use crate::{
    config::Config,
    cqrs::{
        QueryHandler,
        queries::{GetTradeDetails, TradeDetails},
    },
    queries_handlers::helpers::{can_rate, find_transaction},
    uow::UnitOfWork,
};

pub struct GetTradeDetailsHandler;

impl GetTradeDetailsHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GetTradeDetailsHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl QueryHandler<GetTradeDetails> for GetTradeDetailsHandler {
    async fn handle(
        &self,
        query: GetTradeDetails,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<TradeDetails> {
        let trade = uow.trades().get_by_id(query.trade_id).await?;
        trade.ensure_participant(query.viewer_id)?;

        let chat = uow.chats().get_by_parent(ChatParent::Trade(trade.id)).await?;

        let transaction = if trade.lifecycle.is_completed() {
            find_transaction(uow, TransactionSource::Trade(trade.id)).await?
        } else {
            None
        };
        let can_rate = can_rate(uow, transaction.as_ref(), query.viewer_id).await?;

        Ok(TradeDetails {
            trade,
            chat_id: chat.id,
            transaction_id: transaction.map(|t| t.id),
            can_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradepost_market::{
        models::{chat::Chat, rating::Rating, trade::Trade, transaction::Transaction},
        test_utils::{ListingFactoryOptions, OfferFactoryOptions, listing_factory, offer_factory},
    };
    use tradepost_types::errors::ErrorKind;
    use uuid::Uuid;

    use crate::test_utils::tests::MockUnitOfWork;

    async fn setup(
        completed: bool,
    ) -> Result<(Box<dyn UnitOfWork<'static> + 'static>, Trade, Chat)> {
        let mock = MockUnitOfWork::new();
        let listing = listing_factory(ListingFactoryOptions::default());
        let offer = offer_factory(OfferFactoryOptions::default());
        let mut trade = Trade::new(offer.id, listing.id, listing.seller_id, offer.requester_id);
        if completed {
            trade.complete()?;
            mock.add_transaction(Transaction::for_trade(&trade, &listing, &offer));
        }
        mock.add_trade(trade.clone());
        let chat = Chat::for_trade(&trade);
        let uow: Box<dyn UnitOfWork<'static> + 'static> = Box::new(mock);
        uow.chats().create(&chat).await?;
        Ok((uow, trade, chat))
    }

    fn query(viewer_id: Uuid, trade_id: Uuid) -> GetTradeDetails {
        GetTradeDetails {
            viewer_id,
            trade_id,
        }
    }

    #[tokio::test]
    async fn test_active_trade_details() -> Result<()> {
        let config = Arc::new(Config::from_env());
        let (uow, trade, chat) = setup(false).await?;

        let details = GetTradeDetailsHandler::new()
            .handle(query(trade.buyer_id, trade.id), &uow, &config)
            .await?;
        assert_eq!(details.chat_id, chat.id);
        assert_eq!(details.transaction_id, None);
        assert!(!details.can_rate);
        Ok(())
    }

    #[tokio::test]
    async fn test_completed_trade_can_be_rated_once() -> Result<()> {
        let config = Arc::new(Config::from_env());
        let (uow, trade, _) = setup(true).await?;
        let handler = GetTradeDetailsHandler::new();

        let details = handler
            .handle(query(trade.seller_id, trade.id), &uow, &config)
            .await?;
        assert!(details.can_rate);

        let transaction = uow
            .transactions()
            .get_by_source(TransactionSource::Trade(trade.id))
            .await?;
        assert_eq!(details.transaction_id, Some(transaction.id));
        let rating = Rating::new(&transaction, trade.seller_id, 5, None)?;
        uow.ratings().create(&rating).await?;

        let details = handler
            .handle(query(trade.seller_id, trade.id), &uow, &config)
            .await?;
        assert!(!details.can_rate);

        let buyer_view = handler
            .handle(query(trade.buyer_id, trade.id), &uow, &config)
            .await?;
        assert!(buyer_view.can_rate);
        Ok(())
    }

    #[tokio::test]
    async fn test_outsider_is_forbidden() -> Result<()> {
        let config = Arc::new(Config::from_env());
        let (uow, trade, _) = setup(false).await?;

        let err = GetTradeDetailsHandler::new()
            .handle(query(Uuid::new_v4(), trade.id), &uow, &config)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        Ok(())
    }
}
