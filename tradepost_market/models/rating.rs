use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradepost_types::errors::MarketError;

use super::transaction::Transaction;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// Feedback left by one party of a transaction about the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub rater_id: Uuid,
    pub ratee_id: Uuid,
    pub score: u8,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    pub fn new(
        transaction: &Transaction,
        rater_id: Uuid,
        score: u8,
        comment: Option<String>,
    ) -> Result<Self, MarketError> {
        let ratee_id = transaction
            .counterpart_of(rater_id)
            .ok_or(MarketError::NotParticipant)?;

        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(MarketError::InvalidRatingScore(score));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            transaction_id: transaction.id,
            rater_id,
            ratee_id,
            score,
            comment: comment.filter(|c| !c.trim().is_empty()),
            created_at: Utc::now(),
        })
    }
}
