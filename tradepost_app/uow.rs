use std::sync::Arc;

use tradepost_types::errors::ApplicationError;

use crate::repository::*;

/// A Unit of Work (UoW) works as a provider for repositories
/// that all operate within a single transaction.
#[async_trait::async_trait]
pub trait UnitOfWork<'a>: Send + Sync {
    fn listings(&self) -> Arc<dyn ListingRepository + 'a>;
    fn services(&self) -> Arc<dyn ServiceRepository + 'a>;
    fn offers(&self) -> Arc<dyn OfferRepository + 'a>;
    fn trades(&self) -> Arc<dyn TradeRepository + 'a>;
    fn service_runs(&self) -> Arc<dyn ServiceRunRepository + 'a>;
    fn chats(&self) -> Arc<dyn ChatRepository + 'a>;
    fn transactions(&self) -> Arc<dyn TransactionRepository + 'a>;
    fn ratings(&self) -> Arc<dyn RatingRepository + 'a>;
    fn wishlist(&self) -> Arc<dyn WishlistRepository + 'a>;
    fn notifications(&self) -> Arc<dyn NotificationRepository + 'a>;
    fn decline_reasons(&self) -> Arc<dyn DeclineReasonRepository + 'a>;
    fn profiles(&self) -> Arc<dyn ProfileRepository + 'a>;

    // Consume self so the UoW can't be used after commit/rollback
    async fn commit(self: Box<Self>) -> Result<(), ApplicationError>;
    async fn rollback(self: Box<Self>) -> Result<(), ApplicationError>;
}

/// A factory for creating Unit of Work instances.
#[async_trait::async_trait]
pub trait UnitOfWorkProvider: Send + Sync {
    /// Begin a new Unit of Work (transaction).
    async fn tx<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError>;
}
