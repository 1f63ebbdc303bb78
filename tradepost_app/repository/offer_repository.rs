use uuid::Uuid;

use tradepost_market::models::offer::Offer;
use tradepost_types::{Result, errors::ApplicationError, statuses::OfferStatus};

#[async_trait::async_trait]
pub trait OfferRepository: Send + Sync {
    async fn create(&self, offer: &Offer) -> Result<(), ApplicationError>;

    async fn get_by_id(&self, offer_id: Uuid) -> Result<Offer, ApplicationError>;

    /// Unconditionally updates an offer.
    async fn save(&self, offer: &Offer) -> Result<(), ApplicationError>;

    /// Writes the offer only if the stored row still has status `expected`.
    /// Returns false when another writer changed the status first.
    async fn transition(&self, offer: &Offer, expected: OfferStatus)
    -> Result<bool, ApplicationError>;
}
