use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    listing::Listing,
    offer::{Offer, OfferedItem},
    service::Service,
    service_run::ServiceRun,
    trade::Trade,
};

/// The completed engagement a transaction was recorded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum TransactionSource {
    Trade(Uuid),
    ServiceRun(Uuid),
}

impl TransactionSource {
    pub fn kind(&self) -> &'static str {
        match self {
            TransactionSource::Trade(_) => "trade",
            TransactionSource::ServiceRun(_) => "service run",
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            TransactionSource::Trade(id) | TransactionSource::ServiceRun(id) => *id,
        }
    }
}

/// Immutable record of a completed trade or service run, the basis for ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub source: TransactionSource,
    pub item_name: String,
    /// Stats snapshot taken at completion, as stored on the listing.
    pub stats: String,
    pub offered_items: Vec<OfferedItem>,
    pub seller_id: Uuid,
    pub buyer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn for_trade(trade: &Trade, listing: &Listing, offer: &Offer) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: TransactionSource::Trade(trade.id),
            item_name: listing.name.clone(),
            stats: listing.stats.clone(),
            offered_items: offer.offered_items.clone(),
            seller_id: trade.seller_id,
            buyer_id: trade.buyer_id,
            created_at: Utc::now(),
        }
    }

    pub fn for_service_run(run: &ServiceRun, service: &Service, offer: &Offer) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: TransactionSource::ServiceRun(run.id),
            item_name: service.name.clone(),
            stats: "[]".to_string(),
            offered_items: offer.offered_items.clone(),
            seller_id: run.provider_id,
            buyer_id: run.client_id,
            created_at: Utc::now(),
        }
    }

    pub fn is_party(&self, user_id: Uuid) -> bool {
        self.seller_id == user_id || self.buyer_id == user_id
    }

    /// The other side of the transaction, if `user_id` is a party to it.
    pub fn counterpart_of(&self, user_id: Uuid) -> Option<Uuid> {
        if user_id == self.seller_id {
            Some(self.buyer_id)
        } else if user_id == self.buyer_id {
            Some(self.seller_id)
        } else {
            None
        }
    }
}
