use uuid::Uuid;

use tradepost_market::models::notification::Notification;
use tradepost_types::{Result, errors::ApplicationError};

#[async_trait::async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &Notification) -> Result<(), ApplicationError>;

    /// Lists a user's notifications, newest first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>, ApplicationError>;
}
