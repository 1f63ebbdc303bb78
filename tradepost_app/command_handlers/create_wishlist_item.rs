use std::sync::Arc;

use tracing::info;

use tradepost_market::models::wishlist::WishlistItem;
use tradepost_types::{
    Result,
    errors::{ApplicationError, MarketError},
};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::CreateWishlistItem},
    effects::Outcome,
    uow::UnitOfWork,
};

pub struct CreateWishlistItemCommandHandler {}

impl Default for CreateWishlistItemCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateWishlistItemCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<CreateWishlistItem> for CreateWishlistItemCommandHandler {
    async fn handle(
        &self,
        command: CreateWishlistItem,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<Outcome<WishlistItem>, ApplicationError> {
        let profile = uow.profiles().get_by_id(command.user_id).await?;
        if !profile.is_premium {
            return Err(ApplicationError::Market(MarketError::PremiumRequired));
        }

        let wishlist_repo = uow.wishlist();
        if wishlist_repo.count_by_user(command.user_id).await? >= config.max_wishlist_items {
            return Err(ApplicationError::Market(MarketError::WishlistFull {
                limit: config.max_wishlist_items,
            }));
        }

        let mut item = WishlistItem::new(
            command.user_id,
            command.name,
            command.game,
            command.criteria,
        )?;
        if let Some(category) = command.category.as_deref() {
            item = item.with_category(category);
        }
        if let Some(rarity) = command.rarity.as_deref() {
            item = item.with_rarity(rarity);
        }

        wishlist_repo.create(&item).await?;
        info!(wishlist_item_id = %item.id, user_id = %item.user_id, criteria = item.criteria.len(), "Wishlist item created");

        Ok(Outcome::new(item))
    }
}
