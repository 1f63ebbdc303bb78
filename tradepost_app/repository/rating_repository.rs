use uuid::Uuid;

use tradepost_market::models::rating::Rating;
use tradepost_types::{Result, errors::ApplicationError};

#[async_trait::async_trait]
pub trait RatingRepository: Send + Sync {
    async fn create(&self, rating: &Rating) -> Result<(), ApplicationError>;

    /// Whether `rater_id` already rated the transaction.
    async fn exists_for_rater(
        &self,
        transaction_id: Uuid,
        rater_id: Uuid,
    ) -> Result<bool, ApplicationError>;
}
