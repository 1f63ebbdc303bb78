use std::sync::Arc;

use tracing::info;

use tradepost_market::models::rating::Rating;
use tradepost_types::{
    Result,
    errors::{ApplicationError, MarketError},
};

use crate::{
    cache::CacheEntity,
    config::Config,
    cqrs::{CommandHandler, commands::RateTransaction},
    effects::Outcome,
    uow::UnitOfWork,
};

pub struct RateTransactionCommandHandler {}

impl Default for RateTransactionCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl RateTransactionCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<RateTransaction> for RateTransactionCommandHandler {
    async fn handle(
        &self,
        command: RateTransaction,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<Outcome<Rating>, ApplicationError> {
        let transaction = uow.transactions().get_by_id(command.transaction_id).await?;
        let rating = Rating::new(
            &transaction,
            command.rater_id,
            command.score,
            command.comment,
        )?;

        let rating_repo = uow.ratings();
        if rating_repo
            .exists_for_rater(transaction.id, command.rater_id)
            .await?
        {
            return Err(ApplicationError::Market(MarketError::DuplicateRating {
                transaction_id: transaction.id,
            }));
        }

        rating_repo.create(&rating).await?;
        info!(transaction_id = %transaction.id, ratee_id = %rating.ratee_id, score = rating.score, "Transaction rated");

        let ratee_id = rating.ratee_id;
        Ok(Outcome::new(rating).invalidate(CacheEntity::Profile, ratee_id))
    }
}
