use uuid::Uuid;

use tradepost_market::models::transaction::{Transaction, TransactionSource};
use tradepost_types::{Result, errors::ApplicationError};

#[async_trait::async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Stores a transaction. Fails with `DbError::DuplicateTransaction`
    /// if one already exists for the same source.
    async fn create(&self, transaction: &Transaction) -> Result<(), ApplicationError>;

    async fn get_by_id(&self, transaction_id: Uuid) -> Result<Transaction, ApplicationError>;

    async fn get_by_source(
        &self,
        source: TransactionSource,
    ) -> Result<Transaction, ApplicationError>;
}
