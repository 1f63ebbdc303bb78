use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradepost_types::{errors::MarketError, statuses::ServiceStatus};

/// A standalone offering by a provider, e.g. a boosting or crafting service.
/// Unique by (provider, service type, game).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub service_type: String,
    pub game: String,
    pub name: String,
    pub description: Option<String>,
    pub status: ServiceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    pub fn new(provider_id: Uuid, service_type: String, game: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            provider_id,
            service_type,
            game,
            name,
            description: None,
            status: ServiceStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == ServiceStatus::Active
    }

    pub fn ensure_active(&self) -> Result<(), MarketError> {
        if !self.is_active() {
            return Err(MarketError::ServiceNotActive {
                service_id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }
}
