use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradepost_types::errors::MarketError;

use super::engagement::{Engagement, Lifecycle};

/// Active exchange spawned from an accepted item offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub listing_id: Uuid,
    pub seller_id: Uuid,
    pub buyer_id: Uuid,
    pub lifecycle: Lifecycle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trade {
    pub fn new(offer_id: Uuid, listing_id: Uuid, seller_id: Uuid, buyer_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            offer_id,
            listing_id,
            seller_id,
            buyer_id,
            lifecycle: Lifecycle::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn ensure_active(&self) -> Result<(), MarketError> {
        if !self.lifecycle.is_active() {
            return Err(MarketError::TradeNotActive {
                trade_id: self.id,
                status: self.lifecycle.status,
            });
        }
        Ok(())
    }

    pub fn complete(&mut self) -> Result<(), MarketError> {
        self.ensure_active()?;
        let now = Utc::now();
        self.lifecycle.complete(now);
        self.updated_at = now;
        Ok(())
    }

    pub fn cancel(&mut self, cancelled_by: Uuid, reason: Option<String>) -> Result<(), MarketError> {
        self.ensure_active()?;
        let now = Utc::now();
        self.lifecycle.cancel(cancelled_by, reason, now);
        self.updated_at = now;
        Ok(())
    }
}

impl Engagement for Trade {
    fn id(&self) -> Uuid {
        self.id
    }

    fn offer_id(&self) -> Uuid {
        self.offer_id
    }

    fn owner_id(&self) -> Uuid {
        self.seller_id
    }

    fn counterparty_id(&self) -> Uuid {
        self.buyer_id
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }
}
