use std::sync::Arc;

use tracing::info;

use tradepost_market::models::listing::Listing;
use tradepost_types::{
    Result,
    errors::{ApplicationError, MarketError},
};

use crate::{
    cache::CacheEntity,
    config::Config,
    cqrs::{CommandHandler, commands::CreateListing},
    effects::{Effect, Outcome},
    uow::UnitOfWork,
};

pub struct CreateListingCommandHandler {}

impl Default for CreateListingCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateListingCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<CreateListing> for CreateListingCommandHandler {
    async fn handle(
        &self,
        command: CreateListing,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<Outcome<Listing>, ApplicationError> {
        let mut listing = Listing::new(
            command.seller_id,
            command.name,
            command.category,
            command.game,
            command.stats,
        );
        if let Some(rarity) = command.rarity.as_deref() {
            listing = listing.with_rarity(rarity);
        }

        listing
            .parse_stats()
            .map_err(|e| MarketError::InvalidListingStats(e.to_string()))?;

        uow.listings().create(&listing).await?;
        info!(listing_id = %listing.id, seller_id = %listing.seller_id, "Listing created");

        let mut outcome = Outcome::new(listing.clone()).invalidate(CacheEntity::Listing, listing.id);
        if config.wishlist_matching_enabled {
            outcome.push(Effect::MatchWishlists(listing));
        }
        Ok(outcome)
    }
}
