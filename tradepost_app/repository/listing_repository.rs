use uuid::Uuid;

use tradepost_market::models::listing::Listing;
use tradepost_types::{Result, errors::ApplicationError};

#[async_trait::async_trait]
pub trait ListingRepository: Send + Sync {
    async fn create(&self, listing: &Listing) -> Result<(), ApplicationError>;

    async fn get_by_id(&self, listing_id: Uuid) -> Result<Listing, ApplicationError>;

    /// Updates an existing listing.
    async fn save(&self, listing: &Listing) -> Result<(), ApplicationError>;
}
