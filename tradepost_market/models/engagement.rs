use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradepost_types::{errors::MarketError, statuses::EngagementStatus};

/// Status bookkeeping shared by trades and service runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lifecycle {
    pub status: EngagementStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancelled_by: Option<Uuid>,
    pub cancel_reason: Option<String>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            status: EngagementStatus::Active,
            completed_at: None,
            cancelled_at: None,
            cancelled_by: None,
            cancel_reason: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == EngagementStatus::Active
    }

    pub fn is_completed(&self) -> bool {
        self.status == EngagementStatus::Completed
    }

    pub(crate) fn complete(&mut self, at: DateTime<Utc>) {
        self.status = EngagementStatus::Completed;
        self.completed_at = Some(at);
    }

    pub(crate) fn cancel(&mut self, by: Uuid, reason: Option<String>, at: DateTime<Utc>) {
        self.status = EngagementStatus::Cancelled;
        self.cancelled_at = Some(at);
        self.cancelled_by = Some(by);
        self.cancel_reason = reason.filter(|r| !r.trim().is_empty());
    }
}

/// A two-party engagement spawned from an accepted offer.
///
/// The owner is the seller or provider, the counterparty is the buyer or client.
pub trait Engagement {
    fn id(&self) -> Uuid;
    fn offer_id(&self) -> Uuid;
    fn owner_id(&self) -> Uuid;
    fn counterparty_id(&self) -> Uuid;
    fn lifecycle(&self) -> &Lifecycle;

    fn status(&self) -> EngagementStatus {
        self.lifecycle().status
    }

    fn is_participant(&self, user_id: Uuid) -> bool {
        user_id == self.owner_id() || user_id == self.counterparty_id()
    }

    fn ensure_participant(&self, user_id: Uuid) -> Result<(), MarketError> {
        if !self.is_participant(user_id) {
            return Err(MarketError::NotParticipant);
        }
        Ok(())
    }

    /// The participant that is not `user_id`.
    fn other_participant(&self, user_id: Uuid) -> Uuid {
        if user_id == self.owner_id() {
            self.counterparty_id()
        } else {
            self.owner_id()
        }
    }
}
