use thiserror::Error;
use uuid::Uuid;

use super::ErrorKind;

/// Errors for storage lookups and persistence.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Listing with ID {0} not found")]
    ListingNotFound(Uuid),

    #[error("Service with ID {0} not found")]
    ServiceNotFound(Uuid),

    #[error("Offer with ID {0} not found")]
    OfferNotFound(Uuid),

    #[error("Trade with ID {0} not found")]
    TradeNotFound(Uuid),

    #[error("Service run with ID {0} not found")]
    ServiceRunNotFound(Uuid),

    #[error("Chat with ID {0} not found")]
    ChatNotFound(Uuid),

    #[error("Chat for {parent_kind} {parent_id} not found")]
    ChatByParentNotFound {
        parent_kind: &'static str,
        parent_id: Uuid,
    },

    #[error("Transaction with ID {0} not found")]
    TransactionNotFound(Uuid),

    #[error("Transaction for {source_kind} {source_id} not found")]
    TransactionBySourceNotFound {
        source_kind: &'static str,
        source_id: Uuid,
    },

    #[error("Transaction for {source_kind} {source_id} already exists")]
    DuplicateTransaction {
        source_kind: &'static str,
        source_id: Uuid,
    },

    #[error("Decline reason with ID {0} not found")]
    DeclineReasonNotFound(i32),

    #[error("Profile with ID {0} not found")]
    ProfileNotFound(Uuid),

    #[error("Wishlist item with ID {0} not found")]
    WishlistItemNotFound(Uuid),

    #[error("Transaction error: {0}")]
    Transaction(String),
}

impl DbError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::DuplicateTransaction { .. } => ErrorKind::AlreadyExists,
            DbError::Transaction(_) => ErrorKind::Internal,
            _ => ErrorKind::NotFound,
        }
    }
}
