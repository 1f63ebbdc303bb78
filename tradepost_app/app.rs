use std::sync::Arc;

use tradepost_market::stats::StatAliases;
use tradepost_types::{Result, errors::ApplicationError};

use crate::{
    cache::CacheStore,
    config::Config,
    cqrs::{Command, CommandHandler, Query, QueryHandler},
    effects::{EffectDispatcher, Outcome},
    tasks::BackgroundTasks,
    uow::UnitOfWorkProvider,
    wishlist::WishlistMatcher,
};

/// AppBus (Mediator)
/// This struct is the central entry point for all application logic.
/// It does not contain any business logic itself.
/// Its primary roles are:
/// 1. Managing Unit of Work (transaction) lifecycles.
/// 2. Dispatching Commands and Queries to their respective handlers.
/// 3. Running the effects of a command once its transaction committed.
pub struct AppBus {
    config: Arc<Config>,
    uow_provider: Arc<dyn UnitOfWorkProvider>,
    effects: EffectDispatcher,
}

impl AppBus {
    pub fn new(
        config: Arc<Config>,
        uow_provider: Arc<dyn UnitOfWorkProvider>,
        cache: Arc<dyn CacheStore>,
        aliases: Arc<dyn StatAliases>,
    ) -> Self {
        let wishlist = Arc::new(WishlistMatcher::new(uow_provider.clone(), aliases));
        let effects = EffectDispatcher::new(
            uow_provider.clone(),
            cache,
            wishlist,
            BackgroundTasks::new(),
        );
        Self {
            config,
            uow_provider,
            effects,
        }
    }

    /// Executes a command.
    /// A command is an operation that modifies the system state.
    /// This method manages the transaction:
    /// - It begins a Unit of Work.
    /// - It passes the UoW to the handler.
    /// - If the handler succeeds, it commits the UoW and then runs the
    ///   handler's effects. Effects can't fail the command.
    /// - If the handler fails, it rolls back the UoW and drops the effects.
    pub async fn execute<C, H>(&self, cmd: C, handler: H) -> Result<C::Output, ApplicationError>
    where
        C: Command,
        H: CommandHandler<C>,
    {
        let uow = self.uow_provider.tx().await?;

        match handler.handle(cmd, &uow, &self.config).await {
            Ok(Outcome { value, effects }) => {
                uow.commit().await?;
                self.effects.dispatch(effects).await;
                Ok(value)
            }
            Err(e) => {
                uow.rollback().await?;
                Err(e)
            }
        }
    }

    /// Executes a query.
    /// A query is an operation that reads system state and returns data.
    /// It should *never* modify the state.
    /// This method ensures the transaction is *always* rolled back.
    pub async fn query<Q, H>(&self, query: Q, handler: H) -> Result<Q::Output, ApplicationError>
    where
        Q: Query,
        H: QueryHandler<Q>,
    {
        let uow = self.uow_provider.tx().await?;
        let result = handler.handle(query, &uow, &self.config).await;
        uow.rollback().await?;
        result
    }

    /// Background work spawned by commands, e.g. wishlist matching.
    pub fn background_tasks(&self) -> &BackgroundTasks {
        self.effects.tasks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradepost_market::{
        models::{listing::Listing, offer::OfferedItem},
        stats::{GameStatAliases, IdentityAliases, StatCriterion},
        test_utils::{
            ProfileFactoryOptions, WishlistItemFactoryOptions, profile_factory,
            wishlist_item_factory,
        },
    };
    use tradepost_types::{
        errors::ErrorKind,
        notifications::NotificationType,
        statuses::{EngagementStatus, ListingStatus, OfferStatus},
    };
    use uuid::Uuid;

    use crate::{
        command_handlers::{
            AcceptOfferCommandHandler, CancelOfferCommandHandler, CancelTradeCommandHandler,
            CompleteTradeCommandHandler, CreateListingCommandHandler, CreateOfferCommandHandler,
            SendChatMessageCommandHandler,
        },
        cqrs::{
            commands::{
                AcceptOffer, AcceptedOffer, CancelOffer, CancelTrade, CompleteTrade,
                CreateListing, CreateOffer, SendChatMessage,
            },
            queries::GetTradeDetails,
        },
        queries_handlers::GetTradeDetailsHandler,
        test_utils::tests::{MockCache, MockUnitOfWorkProvider},
        uow::UnitOfWork,
    };

    fn config() -> Arc<Config> {
        Arc::new(Config {
            wishlist_matching_enabled: true,
            max_wishlist_items: 25,
            max_offered_items: 10,
            max_chat_message_len: 2000,
        })
    }

    fn bus(provider: &Arc<MockUnitOfWorkProvider>, aliases: Arc<dyn StatAliases>) -> AppBus {
        AppBus::new(config(), provider.clone(), Arc::new(MockCache::new()), aliases)
    }

    fn create_listing(seller_id: Uuid, name: &str, stats: &str) -> CreateListing {
        CreateListing {
            seller_id,
            name: name.to_string(),
            category: "helm".to_string(),
            rarity: Some("unique".to_string()),
            game: "d2r".to_string(),
            stats: stats.to_string(),
        }
    }

    async fn listing_status(provider: &MockUnitOfWorkProvider, id: Uuid) -> Result<ListingStatus> {
        Ok(provider.uow().listings().get_by_id(id).await?.status)
    }

    /// Seller lists an item, buyer offers, seller accepts.
    async fn accepted_trade(
        app: &AppBus,
        seller_id: Uuid,
        buyer_id: Uuid,
    ) -> Result<(Listing, AcceptedOffer)> {
        let listing = app
            .execute(
                create_listing(seller_id, "Harlequin Crest", r#"[{"code": "ed%", "value": 141}]"#),
                CreateListingCommandHandler::new(),
            )
            .await?;

        let offer = app
            .execute(
                CreateOffer {
                    requester_id: buyer_id,
                    listing_id: Some(listing.id),
                    service_id: None,
                    offered_items: vec![OfferedItem {
                        name: "Ist Rune".to_string(),
                        quantity: 2,
                        stats: None,
                    }],
                    message: None,
                },
                CreateOfferCommandHandler::new(),
            )
            .await?;

        let accepted = app
            .execute(
                AcceptOffer {
                    actor_id: seller_id,
                    offer_id: offer.id,
                },
                AcceptOfferCommandHandler::new(),
            )
            .await?;
        Ok((listing, accepted))
    }

    #[tokio::test]
    async fn test_offer_to_trade_flow() -> Result<()> {
        let provider = Arc::new(MockUnitOfWorkProvider::new());
        let app = bus(&provider, Arc::new(IdentityAliases));
        let (seller, buyer) = (Uuid::new_v4(), Uuid::new_v4());

        let (listing, accepted) = accepted_trade(&app, seller, buyer).await?;

        assert_eq!(accepted.offer.status, OfferStatus::Accepted);
        let trade = accepted.trade.clone().expect("item offers start a trade");
        assert!(accepted.service_run.is_none());
        assert_eq!(trade.seller_id, seller);
        assert_eq!(trade.buyer_id, buyer);
        assert_eq!(trade.lifecycle.status, EngagementStatus::Active);
        assert!(accepted.chat.is_participant(seller));
        assert!(accepted.chat.is_participant(buyer));

        let seller_inbox = provider.uow().notifications_for(seller);
        assert!(seller_inbox.iter().any(|n| n.kind == NotificationType::NewOffer));
        let buyer_inbox = provider.uow().notifications_for(buyer);
        assert_eq!(buyer_inbox.len(), 1);
        assert_eq!(buyer_inbox[0].kind, NotificationType::OfferAccepted);

        // the listing stays on the market until the trade completes
        assert_eq!(listing_status(&provider, listing.id).await?, ListingStatus::Active);

        app.execute(
            SendChatMessage {
                sender_id: buyer,
                chat_id: accepted.chat.id,
                body: "Online now, join game tp1".to_string(),
            },
            SendChatMessageCommandHandler::new(),
        )
        .await?;

        app.background_tasks().wait_idle().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_completion_is_idempotent() -> Result<()> {
        let provider = Arc::new(MockUnitOfWorkProvider::new());
        let app = bus(&provider, Arc::new(IdentityAliases));
        let (seller, buyer) = (Uuid::new_v4(), Uuid::new_v4());
        let (listing, accepted) = accepted_trade(&app, seller, buyer).await?;
        let trade_id = accepted.trade.expect("trade").id;

        let first = app
            .execute(
                CompleteTrade {
                    actor_id: buyer,
                    trade_id,
                },
                CompleteTradeCommandHandler::new(),
            )
            .await?;
        assert_eq!(listing_status(&provider, listing.id).await?, ListingStatus::Completed);
        let offer = provider.uow().offers().get_by_id(accepted.offer.id).await?;
        assert_eq!(offer.status, OfferStatus::Completed);

        let second = app
            .execute(
                CompleteTrade {
                    actor_id: seller,
                    trade_id,
                },
                CompleteTradeCommandHandler::new(),
            )
            .await?;
        assert_eq!(first.id, second.id);
        assert_eq!(provider.uow().transaction_count(), 1);

        let details = app
            .query(
                GetTradeDetails {
                    viewer_id: seller,
                    trade_id,
                },
                GetTradeDetailsHandler::new(),
            )
            .await?;
        assert_eq!(details.transaction_id, Some(first.id));
        assert!(details.can_rate);

        app.background_tasks().wait_idle().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_completion_records_one_transaction() -> Result<()> {
        let provider = Arc::new(MockUnitOfWorkProvider::new());
        let app = bus(&provider, Arc::new(IdentityAliases));
        let (seller, buyer) = (Uuid::new_v4(), Uuid::new_v4());
        let (_, accepted) = accepted_trade(&app, seller, buyer).await?;
        let trade_id = accepted.trade.expect("trade").id;

        let (by_seller, by_buyer) = tokio::join!(
            app.execute(
                CompleteTrade {
                    actor_id: seller,
                    trade_id,
                },
                CompleteTradeCommandHandler::new(),
            ),
            app.execute(
                CompleteTrade {
                    actor_id: buyer,
                    trade_id,
                },
                CompleteTradeCommandHandler::new(),
            ),
        );

        assert_eq!(by_seller?.id, by_buyer?.id);
        assert_eq!(provider.uow().transaction_count(), 1);
        app.background_tasks().wait_idle().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_cancelled_trade_relists_item() -> Result<()> {
        let provider = Arc::new(MockUnitOfWorkProvider::new());
        let app = bus(&provider, Arc::new(IdentityAliases));
        let (seller, buyer) = (Uuid::new_v4(), Uuid::new_v4());
        let (listing, accepted) = accepted_trade(&app, seller, buyer).await?;
        let trade_id = accepted.trade.expect("trade").id;

        let trade = app
            .execute(
                CancelTrade {
                    actor_id: seller,
                    trade_id,
                    reason: Some("buyer went offline".to_string()),
                },
                CancelTradeCommandHandler::new(),
            )
            .await?;
        assert_eq!(trade.lifecycle.status, EngagementStatus::Cancelled);
        assert_eq!(listing_status(&provider, listing.id).await?, ListingStatus::Active);

        let offer = provider.uow().offers().get_by_id(accepted.offer.id).await?;
        assert_eq!(offer.status, OfferStatus::Cancelled);
        assert!(
            provider
                .uow()
                .notifications_for(buyer)
                .iter()
                .any(|n| n.kind == NotificationType::TradeCancelled)
        );

        // the chat closed with the trade
        let err = app
            .execute(
                SendChatMessage {
                    sender_id: buyer,
                    chat_id: accepted.chat.id,
                    body: "still there?".to_string(),
                },
                SendChatMessageCommandHandler::new(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        app.background_tasks().wait_idle().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_new_listing_notifies_wishlist_owner() -> Result<()> {
        let provider = Arc::new(MockUnitOfWorkProvider::new());
        let app = bus(&provider, Arc::new(GameStatAliases));

        let wisher = profile_factory(ProfileFactoryOptions {
            is_premium: Some(true),
            ..Default::default()
        });
        provider.uow().add_profile(wisher.clone());
        provider
            .uow()
            .add_wishlist_item(wishlist_item_factory(WishlistItemFactoryOptions {
                user_id: Some(wisher.id),
                name: Some("Harlequin Crest"),
                criteria: Some(vec![StatCriterion::new("ed%").with_min(150)]),
                ..Default::default()
            }));

        let listing = app
            .execute(
                create_listing(
                    Uuid::new_v4(),
                    "Harlequin Crest Shako",
                    r#"[{"code": "item_armor_percent", "value": "+163% Enhanced Defense"}]"#,
                ),
                CreateListingCommandHandler::new(),
            )
            .await?;
        app.background_tasks().wait_idle().await;

        let inbox = provider.uow().notifications_for(wisher.id);
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind, NotificationType::WishlistMatch);
        assert_eq!(inbox[0].reference_id, listing.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_command_rolls_back() -> Result<()> {
        let provider = Arc::new(MockUnitOfWorkProvider::new());
        let app = bus(&provider, Arc::new(IdentityAliases));
        let (seller, buyer) = (Uuid::new_v4(), Uuid::new_v4());
        let (_, accepted) = accepted_trade(&app, seller, buyer).await?;

        let commits = provider.uow().commits();
        let rollbacks = provider.uow().rollbacks();

        let err = app
            .execute(
                CancelOffer {
                    actor_id: buyer,
                    offer_id: accepted.offer.id,
                },
                CancelOfferCommandHandler::new(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(provider.uow().commits(), commits);
        assert_eq!(provider.uow().rollbacks(), rollbacks + 1);

        app.background_tasks().wait_idle().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_queries_never_commit() -> Result<()> {
        let provider = Arc::new(MockUnitOfWorkProvider::new());
        let app = bus(&provider, Arc::new(IdentityAliases));
        let (seller, buyer) = (Uuid::new_v4(), Uuid::new_v4());
        let (_, accepted) = accepted_trade(&app, seller, buyer).await?;
        app.background_tasks().wait_idle().await;

        let commits = provider.uow().commits();
        let rollbacks = provider.uow().rollbacks();

        let details = app
            .query(
                GetTradeDetails {
                    viewer_id: buyer,
                    trade_id: accepted.trade.expect("trade").id,
                },
                GetTradeDetailsHandler::new(),
            )
            .await?;
        assert_eq!(details.chat_id, accepted.chat.id);
        assert!(!details.can_rate);
        assert_eq!(provider.uow().commits(), commits);
        assert_eq!(provider.uow().rollbacks(), rollbacks + 1);
        Ok(())
    }
}
