use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradepost_types::{errors::MarketError, statuses::ListingStatus};

use crate::stats::{ListingStat, parse_stats};

/// An item put up for trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub name: String,
    pub category: String,
    pub rarity: Option<String>,
    pub game: String,
    /// JSON-encoded array of stats, kept as received from the client.
    pub stats: String,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    pub fn new(seller_id: Uuid, name: String, category: String, game: String, stats: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            seller_id,
            name,
            category,
            rarity: None,
            game,
            stats,
            status: ListingStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_rarity(mut self, rarity: &str) -> Self {
        self.rarity = Some(rarity.to_string());
        self
    }

    pub fn parse_stats(&self) -> Result<Vec<ListingStat>, serde_json::Error> {
        parse_stats(&self.stats)
    }

    pub fn is_active(&self) -> bool {
        self.status == ListingStatus::Active
    }

    pub fn ensure_active(&self) -> Result<(), MarketError> {
        if !self.is_active() {
            return Err(MarketError::ListingNotActive {
                listing_id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }

    pub fn mark_completed(&mut self) {
        self.status = ListingStatus::Completed;
        self.updated_at = Utc::now();
    }

    /// Puts the listing back on the market after a cancelled trade.
    /// Returns false when the listing already reached a final state.
    pub fn relist(&mut self) -> bool {
        if self.status.is_final() || self.status == ListingStatus::Active {
            return false;
        }
        self.status = ListingStatus::Active;
        self.updated_at = Utc::now();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Listing {
        Listing::new(
            Uuid::new_v4(),
            "Shako".to_string(),
            "helm".to_string(),
            "d2r".to_string(),
            r#"[{"code": "allskills", "value": 2}]"#.to_string(),
        )
    }

    #[test]
    fn test_new_listing_is_active() {
        let listing = listing();
        assert!(listing.is_active());
        assert!(listing.ensure_active().is_ok());
        assert_eq!(listing.parse_stats().unwrap().len(), 1);
    }

    #[test]
    fn test_relist_from_pending() {
        let mut listing = listing();
        listing.status = ListingStatus::Pending;
        assert!(matches!(
            listing.ensure_active(),
            Err(MarketError::ListingNotActive { .. })
        ));
        assert!(listing.relist());
        assert_eq!(listing.status, ListingStatus::Active);
    }

    #[test]
    fn test_relist_keeps_final_states() {
        let mut listing = listing();
        listing.mark_completed();
        assert!(!listing.relist());
        assert_eq!(listing.status, ListingStatus::Completed);

        listing.status = ListingStatus::Cancelled;
        assert!(!listing.relist());
        assert_eq!(listing.status, ListingStatus::Cancelled);
    }
}
