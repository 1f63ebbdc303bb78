use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    NewOffer,
    OfferAccepted,
    OfferRejected,
    TradeCompleted,
    TradeCancelled,
    ServiceRunCompleted,
    ServiceRunCancelled,
    WishlistMatch,
}

/// Kind of entity a notification points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceType {
    Listing,
    Service,
    Offer,
    Trade,
    ServiceRun,
}
