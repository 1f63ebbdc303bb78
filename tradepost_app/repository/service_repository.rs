use uuid::Uuid;

use tradepost_market::models::service::Service;
use tradepost_types::{Result, errors::ApplicationError};

#[async_trait::async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, service: &Service) -> Result<(), ApplicationError>;

    async fn get_by_id(&self, service_id: Uuid) -> Result<Service, ApplicationError>;

    /// Whether the provider already offers this service type for the game.
    async fn exists_by_provider_type_game(
        &self,
        provider_id: Uuid,
        service_type: &str,
        game: &str,
    ) -> Result<bool, ApplicationError>;
}
