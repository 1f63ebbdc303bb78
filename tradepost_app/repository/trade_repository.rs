use uuid::Uuid;

use tradepost_market::models::trade::Trade;
use tradepost_types::{Result, errors::ApplicationError, statuses::EngagementStatus};

#[async_trait::async_trait]
pub trait TradeRepository: Send + Sync {
    async fn create(&self, trade: &Trade) -> Result<(), ApplicationError>;

    async fn get_by_id(&self, trade_id: Uuid) -> Result<Trade, ApplicationError>;

    /// Writes the trade only if the stored row still has status `expected`.
    /// Returns false when another writer changed the status first.
    async fn transition(
        &self,
        trade: &Trade,
        expected: EngagementStatus,
    ) -> Result<bool, ApplicationError>;

    /// Full exclusion of concurrent accepts on one listing needs a storage
    /// constraint allowing a single active trade per listing.
    async fn has_active_for_listing(&self, listing_id: Uuid) -> Result<bool, ApplicationError>;
}
