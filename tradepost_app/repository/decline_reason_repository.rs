use tradepost_market::models::decline_reason::DeclineReason;
use tradepost_types::{Result, errors::ApplicationError};

#[async_trait::async_trait]
pub trait DeclineReasonRepository: Send + Sync {
    async fn get_by_id(&self, reason_id: i32) -> Result<DeclineReason, ApplicationError>;
}
