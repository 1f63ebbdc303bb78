use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use tradepost_market::{
    models::{listing::Listing, wishlist::WishlistItem},
    stats::{StatAliases, build_stat_map},
};
use tradepost_types::Result;

use crate::{
    notifications::{persist_notification, wishlist_match},
    uow::UnitOfWorkProvider,
};

/// Finds the wishlist entries a new listing satisfies and notifies their owners.
pub struct WishlistMatcher {
    uow_provider: Arc<dyn UnitOfWorkProvider>,
    aliases: Arc<dyn StatAliases>,
}

impl WishlistMatcher {
    pub fn new(uow_provider: Arc<dyn UnitOfWorkProvider>, aliases: Arc<dyn StatAliases>) -> Self {
        Self {
            uow_provider,
            aliases,
        }
    }

    /// Wishlist items matched by `listing`. The seller's own entries never match.
    ///
    /// Fails if the listing stats are not valid JSON.
    pub async fn find_matches(&self, listing: &Listing) -> Result<Vec<WishlistItem>> {
        let stats = listing.parse_stats()?;
        let stat_map = build_stat_map(&stats);

        let uow = self.uow_provider.tx().await?;
        let candidates = uow.wishlist().find_candidates_for_listing(listing).await;
        uow.rollback().await?;
        let candidates = candidates?;

        debug!(
            listing_id = %listing.id,
            candidates = candidates.len(),
            stats = stat_map.len(),
            "Evaluating wishlist candidates"
        );

        Ok(candidates
            .into_iter()
            .filter(|item| item.user_id != listing.seller_id)
            .filter(|item| item.matches_stats(&stat_map, self.aliases.as_ref()))
            .collect())
    }

    /// Notifies the owner of every matching wishlist item, one notification per
    /// match. Never fails: errors are logged and a failed notification doesn't
    /// stop the rest of the batch. Returns the number of notifications stored.
    #[instrument(skip_all, fields(listing_id = %listing.id))]
    pub async fn check_and_notify(&self, listing: &Listing) -> usize {
        let matched = match self.find_matches(listing).await {
            Ok(matched) => matched,
            Err(e) => {
                warn!(error = %e, "Wishlist matching aborted");
                return 0;
            }
        };

        let mut sent = 0;
        for item in &matched {
            let notification = wishlist_match(item, listing);
            match persist_notification(self.uow_provider.as_ref(), &notification).await {
                Ok(()) => sent += 1,
                Err(e) => warn!(
                    wishlist_item_id = %item.id,
                    user_id = %item.user_id,
                    error = %e,
                    "Failed to store wishlist notification"
                ),
            }
        }

        info!(matched = matched.len(), sent, "Wishlist matching done");
        sent
    }
}
