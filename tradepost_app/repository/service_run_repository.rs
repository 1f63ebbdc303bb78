use uuid::Uuid;

use tradepost_market::models::service_run::ServiceRun;
use tradepost_types::{Result, errors::ApplicationError, statuses::EngagementStatus};

#[async_trait::async_trait]
pub trait ServiceRunRepository: Send + Sync {
    async fn create(&self, run: &ServiceRun) -> Result<(), ApplicationError>;

    async fn get_by_id(&self, service_run_id: Uuid) -> Result<ServiceRun, ApplicationError>;

    /// Writes the run only if the stored row still has status `expected`.
    /// Returns false when another writer changed the status first.
    async fn transition(
        &self,
        run: &ServiceRun,
        expected: EngagementStatus,
    ) -> Result<bool, ApplicationError>;
}
