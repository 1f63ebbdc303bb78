use thiserror::Error;
use uuid::Uuid;

use super::ErrorKind;
use crate::statuses::{EngagementStatus, ListingStatus, OfferStatus, ServiceStatus};

/// Errors for marketplace rules.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("You cannot make an offer on your own listing or service")]
    SelfOffer,

    #[error("An offer must target a listing or a service")]
    MissingOfferTarget,

    #[error("An offer cannot target both a listing and a service")]
    AmbiguousOfferTarget,

    #[error("Listing {listing_id} is {status}, not active")]
    ListingNotActive {
        listing_id: Uuid,
        status: ListingStatus,
    },

    #[error("Service {service_id} is {status}, not active")]
    ServiceNotActive {
        service_id: Uuid,
        status: ServiceStatus,
    },

    #[error("Listing {listing_id} already has an active trade")]
    ActiveTradeExists { listing_id: Uuid },

    #[error("Offer {offer_id} is {status}, not pending")]
    OfferNotPending { offer_id: Uuid, status: OfferStatus },

    #[error("Trade {trade_id} is {status}, not active")]
    TradeNotActive {
        trade_id: Uuid,
        status: EngagementStatus,
    },

    #[error("Service run {service_run_id} is {status}, not active")]
    ServiceRunNotActive {
        service_run_id: Uuid,
        status: EngagementStatus,
    },

    #[error("Completion of {0} is still in progress")]
    CompletionInProgress(Uuid),

    #[error("Chat {0} is closed")]
    ChatClosed(Uuid),

    #[error("Only the listing seller or service provider can do this")]
    NotOfferOwner,

    #[error("Only the offer requester can do this")]
    NotOfferRequester,

    #[error("Only participants can do this")]
    NotParticipant,

    #[error("This feature requires a premium subscription")]
    PremiumRequired,

    #[error("Wishlist is full ({limit} items)")]
    WishlistFull { limit: usize },

    #[error("Stat criterion '{code}' has a minimum above its maximum")]
    InvalidStatRange { code: String },

    #[error("Listing stats are not valid: {0}")]
    InvalidListingStats(String),

    #[error("Rating score must be between 1 and 5, got {0}")]
    InvalidRatingScore(u8),

    #[error("Transaction {transaction_id} was already rated by this user")]
    DuplicateRating { transaction_id: Uuid },

    #[error("A '{service_type}' service for {game} already exists")]
    DuplicateService { service_type: String, game: String },

    #[error("An offer can include at most {limit} items")]
    TooManyOfferedItems { limit: usize },

    #[error("Chat message cannot be empty")]
    EmptyChatMessage,

    #[error("Chat message exceeds {limit} characters")]
    ChatMessageTooLong { limit: usize },
}

impl MarketError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketError::SelfOffer => ErrorKind::SelfAction,

            MarketError::NotOfferOwner
            | MarketError::NotOfferRequester
            | MarketError::NotParticipant
            | MarketError::PremiumRequired => ErrorKind::Forbidden,

            MarketError::DuplicateRating { .. } | MarketError::DuplicateService { .. } => {
                ErrorKind::AlreadyExists
            }

            MarketError::InvalidStatRange { .. }
            | MarketError::InvalidListingStats(_)
            | MarketError::InvalidRatingScore(_)
            | MarketError::TooManyOfferedItems { .. }
            | MarketError::EmptyChatMessage
            | MarketError::ChatMessageTooLong { .. } => ErrorKind::Validation,

            MarketError::MissingOfferTarget
            | MarketError::AmbiguousOfferTarget
            | MarketError::ListingNotActive { .. }
            | MarketError::ServiceNotActive { .. }
            | MarketError::ActiveTradeExists { .. }
            | MarketError::OfferNotPending { .. }
            | MarketError::TradeNotActive { .. }
            | MarketError::ServiceRunNotActive { .. }
            | MarketError::CompletionInProgress(_)
            | MarketError::ChatClosed(_)
            | MarketError::WishlistFull { .. } => ErrorKind::InvalidState,
        }
    }
}
