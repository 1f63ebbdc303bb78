use uuid::Uuid;

use tradepost_types::{Result, common::Profile, errors::ApplicationError};

#[async_trait::async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn get_by_id(&self, user_id: Uuid) -> Result<Profile, ApplicationError>;

    async fn save(&self, profile: &Profile) -> Result<(), ApplicationError>;
}
