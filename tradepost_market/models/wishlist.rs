use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradepost_types::errors::MarketError;

use super::listing::Listing;
use crate::stats::{StatAliases, StatCriterion, StatMap, matches};

/// Saved search of a premium user. New listings matching it trigger a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub game: String,
    pub category: Option<String>,
    pub rarity: Option<String>,
    /// No criteria means any listing that passes the name/category filters.
    pub criteria: Vec<StatCriterion>,
    pub created_at: DateTime<Utc>,
}

impl WishlistItem {
    pub fn new(
        user_id: Uuid,
        name: String,
        game: String,
        criteria: Vec<StatCriterion>,
    ) -> Result<Self, MarketError> {
        if let Some(criterion) = criteria.iter().find(|c| !c.has_valid_range()) {
            return Err(MarketError::InvalidStatRange {
                code: criterion.code.clone(),
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            game,
            category: None,
            rarity: None,
            criteria,
            created_at: Utc::now(),
        })
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_rarity(mut self, rarity: &str) -> Self {
        self.rarity = Some(rarity.to_string());
        self
    }

    /// Name, game, category and rarity filters, the part of a match that
    /// storage can evaluate without looking at stats.
    pub fn is_candidate_for(&self, listing: &Listing) -> bool {
        let same = |a: &str, b: &str| a.eq_ignore_ascii_case(b);

        same(&self.game, &listing.game)
            && listing
                .name
                .to_lowercase()
                .contains(&self.name.to_lowercase())
            && self
                .category
                .as_deref()
                .is_none_or(|c| same(c, &listing.category))
            && self
                .rarity
                .as_deref()
                .is_none_or(|r| listing.rarity.as_deref().is_some_and(|lr| same(r, lr)))
    }

    pub fn matches_stats(&self, stat_map: &StatMap, aliases: &dyn StatAliases) -> bool {
        matches(&self.criteria, stat_map, aliases)
    }
}
