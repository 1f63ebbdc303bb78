use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradepost_types::errors::MarketError;

use super::engagement::{Engagement, Lifecycle};

/// Active engagement spawned from an accepted service offer.
/// Its lifecycle never changes the parent service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRun {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub service_id: Uuid,
    pub provider_id: Uuid,
    pub client_id: Uuid,
    pub lifecycle: Lifecycle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceRun {
    pub fn new(offer_id: Uuid, service_id: Uuid, provider_id: Uuid, client_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            offer_id,
            service_id,
            provider_id,
            client_id,
            lifecycle: Lifecycle::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn ensure_active(&self) -> Result<(), MarketError> {
        if !self.lifecycle.is_active() {
            return Err(MarketError::ServiceRunNotActive {
                service_run_id: self.id,
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

impl Engagement for ServiceRun {
    fn id(&self) -> Uuid {
        self.id
    }

    fn offer_id(&self) -> Uuid {
        self.offer_id
    }

    fn owner_id(&self) -> Uuid {
        self.provider_id
    }

    fn counterparty_id(&self) -> Uuid {
        self.client_id
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }
}
