use tradepost_market::models::{
    offer::{OfferSubject, OfferTarget},
    transaction::{Transaction, TransactionSource},
};
use tradepost_types::{
    Result,
    errors::{ApplicationError, DbError, MarketError},
};

use crate::uow::UnitOfWork;

/// Loads the listing or service an offer points at.
pub async fn load_subject(
    uow: &Box<dyn UnitOfWork<'_> + '_>,
    target: &OfferTarget,
) -> Result<OfferSubject, ApplicationError> {
    let subject = match target {
        OfferTarget::Listing(id) => OfferSubject::Listing(uow.listings().get_by_id(*id).await?),
        OfferTarget::Service(id) => OfferSubject::Service(uow.services().get_by_id(*id).await?),
    };
    Ok(subject)
}

/// The transaction recorded for an already completed trade or service run.
///
/// A completed source without a transaction means another completion has not
/// finished yet; the caller should retry.
pub async fn existing_transaction(
    uow: &Box<dyn UnitOfWork<'_> + '_>,
    source: TransactionSource,
) -> Result<Transaction, ApplicationError> {
    match uow.transactions().get_by_source(source).await {
        Ok(transaction) => Ok(transaction),
        Err(ApplicationError::Db(DbError::TransactionBySourceNotFound { .. })) => Err(
            ApplicationError::Market(MarketError::CompletionInProgress(source.id())),
        ),
        Err(e) => Err(e),
    }
}

/// Stores `transaction`, or returns the one already stored for the same source.
pub async fn record_transaction(
    uow: &Box<dyn UnitOfWork<'_> + '_>,
    transaction: Transaction,
) -> Result<Transaction, ApplicationError> {
    match uow.transactions().create(&transaction).await {
        Ok(()) => Ok(transaction),
        Err(ApplicationError::Db(DbError::DuplicateTransaction { .. })) => {
            existing_transaction(uow, transaction.source).await
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradepost_market::{
        models::trade::Trade,
        test_utils::{
            ListingFactoryOptions, OfferFactoryOptions, listing_factory, offer_factory,
        },
    };
    use uuid::Uuid;

    use crate::test_utils::tests::MockUnitOfWork;

    #[tokio::test]
    async fn test_load_subject_missing_listing() {
        let uow: Box<dyn UnitOfWork<'static> + 'static> = Box::new(MockUnitOfWork::new());
        let id = Uuid::new_v4();

        let result = load_subject(&uow, &OfferTarget::Listing(id)).await;
        assert!(matches!(
            result,
            Err(ApplicationError::Db(DbError::ListingNotFound(missing))) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_record_transaction_returns_existing_on_duplicate() {
        let mock = MockUnitOfWork::new();
        let uow: Box<dyn UnitOfWork<'static> + 'static> = Box::new(mock.clone());

        let listing = listing_factory(ListingFactoryOptions::default());
        let offer = offer_factory(OfferFactoryOptions::default());
        let trade = Trade::new(offer.id, listing.id, listing.seller_id, offer.requester_id);

        let first = record_transaction(&uow, Transaction::for_trade(&trade, &listing, &offer))
            .await
            .unwrap();
        let second = record_transaction(&uow, Transaction::for_trade(&trade, &listing, &offer))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(mock.transaction_count(), 1);
    }

    #[tokio::test]
    async fn test_existing_transaction_missing_means_in_progress() {
        let uow: Box<dyn UnitOfWork<'static> + 'static> = Box::new(MockUnitOfWork::new());
        let trade_id = Uuid::new_v4();

        let result = existing_transaction(&uow, TransactionSource::Trade(trade_id)).await;
        assert!(matches!(
            result,
            Err(ApplicationError::Market(MarketError::CompletionInProgress(id))) if id == trade_id
        ));
    }
}
