use uuid::Uuid;

use tradepost_market::models::{listing::Listing, wishlist::WishlistItem};
use tradepost_types::{Result, errors::ApplicationError};

#[async_trait::async_trait]
pub trait WishlistRepository: Send + Sync {
    async fn create(&self, item: &WishlistItem) -> Result<(), ApplicationError>;

    async fn count_by_user(&self, user_id: Uuid) -> Result<usize, ApplicationError>;

    /// Wishlist items of premium users that may match the listing.
    /// Implementations may pre-filter on game, category, rarity or name,
    /// but must return every item that could match on stats.
    async fn find_candidates_for_listing(
        &self,
        listing: &Listing,
    ) -> Result<Vec<WishlistItem>, ApplicationError>;
}
