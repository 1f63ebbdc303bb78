use uuid::Uuid;

use tradepost_market::models::transaction::{Transaction, TransactionSource};
use tradepost_types::{
    Result,
    errors::{ApplicationError, DbError},
};

use crate::uow::UnitOfWork;

/// The transaction recorded for `source`, if any.
pub async fn find_transaction(
    uow: &Box<dyn UnitOfWork<'_> + '_>,
    source: TransactionSource,
) -> Result<Option<Transaction>, ApplicationError> {
    match uow.transactions().get_by_source(source).await {
        Ok(transaction) => Ok(Some(transaction)),
        Err(ApplicationError::Db(DbError::TransactionBySourceNotFound { .. })) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Whether `viewer_id` still has a rating to give on `transaction`.
pub async fn can_rate(
    uow: &Box<dyn UnitOfWork<'_> + '_>,
    transaction: Option<&Transaction>,
    viewer_id: Uuid,
) -> Result<bool, ApplicationError> {
    match transaction {
        Some(transaction) => Ok(!uow
            .ratings()
            .exists_for_rater(transaction.id, viewer_id)
            .await?),
        None => Ok(false),
    }
}
