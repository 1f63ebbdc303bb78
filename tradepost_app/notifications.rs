//! Builders for the notifications the marketplace sends, and a best-effort
//! sink that stores them outside of the triggering transaction.

use uuid::Uuid;

use tradepost_market::models::{
    listing::Listing,
    notification::Notification,
    offer::{Offer, OfferSubject},
    service_run::ServiceRun,
    trade::Trade,
    wishlist::WishlistItem,
};
use tradepost_types::{
    errors::{AppError, ApplicationError},
    notifications::{NotificationType, ReferenceType},
};

use crate::uow::UnitOfWorkProvider;

/// Tells the owner of the listing or service that an offer came in.
pub fn new_offer(offer: &Offer, subject: &OfferSubject) -> Notification {
    Notification::new(
        subject.owner_id(),
        NotificationType::NewOffer,
        "New offer received".to_string(),
        format!("You received a new offer on {}.", subject.name()),
        ReferenceType::Offer,
        offer.id,
    )
}

pub fn offer_accepted(offer: &Offer, subject: &OfferSubject) -> Notification {
    Notification::new(
        offer.requester_id,
        NotificationType::OfferAccepted,
        "Offer accepted".to_string(),
        format!("Your offer on {} was accepted.", subject.name()),
        ReferenceType::Offer,
        offer.id,
    )
}

pub fn offer_rejected(offer: &Offer, subject: &OfferSubject, reason_label: &str) -> Notification {
    Notification::new(
        offer.requester_id,
        NotificationType::OfferRejected,
        "Offer declined".to_string(),
        format!(
            "Your offer on {} was declined: {}.",
            subject.name(),
            reason_label
        ),
        ReferenceType::Offer,
        offer.id,
    )
}

pub fn trade_completed(trade: &Trade, recipient_id: Uuid, item_name: &str) -> Notification {
    Notification::new(
        recipient_id,
        NotificationType::TradeCompleted,
        "Trade completed".to_string(),
        format!("The trade for {} was marked as completed.", item_name),
        ReferenceType::Trade,
        trade.id,
    )
}

pub fn trade_cancelled(trade: &Trade, recipient_id: Uuid) -> Notification {
    let body = match &trade.lifecycle.cancel_reason {
        Some(reason) => format!("The other party cancelled the trade: {}", reason),
        None => "The other party cancelled the trade.".to_string(),
    };
    Notification::new(
        recipient_id,
        NotificationType::TradeCancelled,
        "Trade cancelled".to_string(),
        body,
        ReferenceType::Trade,
        trade.id,
    )
}

pub fn service_run_completed(
    run: &ServiceRun,
    recipient_id: Uuid,
    service_name: &str,
) -> Notification {
    Notification::new(
        recipient_id,
        NotificationType::ServiceRunCompleted,
        "Service completed".to_string(),
        format!("The service {} was marked as completed.", service_name),
        ReferenceType::ServiceRun,
        run.id,
    )
}

pub fn service_run_cancelled(run: &ServiceRun, recipient_id: Uuid) -> Notification {
    let body = match &run.lifecycle.cancel_reason {
        Some(reason) => format!("The other party cancelled the service: {}", reason),
        None => "The other party cancelled the service.".to_string(),
    };
    Notification::new(
        recipient_id,
        NotificationType::ServiceRunCancelled,
        "Service cancelled".to_string(),
        body,
        ReferenceType::ServiceRun,
        run.id,
    )
}

/// Addressed to the wishlist owner, referencing the matching listing.
pub fn wishlist_match(item: &WishlistItem, listing: &Listing) -> Notification {
    Notification::new(
        item.user_id,
        NotificationType::WishlistMatch,
        "Wishlist match".to_string(),
        format!(
            "A new listing \"{}\" matches your wishlist entry \"{}\".",
            listing.name, item.name
        ),
        ReferenceType::Listing,
        listing.id,
    )
}

/// Stores a notification in its own unit of work.
pub async fn persist_notification(
    uow_provider: &dyn UnitOfWorkProvider,
    notification: &Notification,
) -> Result<(), ApplicationError> {
    let uow = uow_provider.tx().await?;
    match uow.notifications().create(notification).await {
        Ok(()) => uow.commit().await,
        Err(e) => {
            uow.rollback().await?;
            Err(ApplicationError::App(AppError::NotificationSink(
                e.to_string(),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradepost_market::{
        models::offer::OfferTarget,
        test_utils::{
            ListingFactoryOptions, OfferFactoryOptions, WishlistItemFactoryOptions,
            listing_factory, offer_factory, wishlist_item_factory,
        },
    };

    #[test]
    fn test_new_offer_goes_to_owner() {
        let listing = listing_factory(ListingFactoryOptions::default());
        let offer = offer_factory(OfferFactoryOptions {
            target: Some(OfferTarget::Listing(listing.id)),
            ..Default::default()
        });
        let subject = OfferSubject::Listing(listing.clone());

        let n = new_offer(&offer, &subject);
        assert_eq!(n.user_id, listing.seller_id);
        assert_eq!(n.kind, NotificationType::NewOffer);
        assert_eq!(n.reference_type, ReferenceType::Offer);
        assert_eq!(n.reference_id, offer.id);
        assert!(!n.is_read);
    }

    #[test]
    fn test_offer_rejected_mentions_reason() {
        let listing = listing_factory(ListingFactoryOptions::default());
        let offer = offer_factory(OfferFactoryOptions::default());
        let n = offer_rejected(&offer, &OfferSubject::Listing(listing), "Price too low");

        assert_eq!(n.user_id, offer.requester_id);
        assert!(n.body.contains("Price too low"));
    }

    #[test]
    fn test_trade_cancelled_includes_reason() {
        let mut trade = Trade::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        trade
            .cancel(trade.seller_id, Some("buyer went offline".to_string()))
            .unwrap();

        let n = trade_cancelled(&trade, trade.buyer_id);
        assert_eq!(n.user_id, trade.buyer_id);
        assert!(n.body.contains("buyer went offline"));
        assert_eq!(n.reference_type, ReferenceType::Trade);
    }

    #[test]
    fn test_wishlist_match_references_listing() {
        let listing = listing_factory(ListingFactoryOptions::default());
        let item = wishlist_item_factory(WishlistItemFactoryOptions::default());

        let n = wishlist_match(&item, &listing);
        assert_eq!(n.user_id, item.user_id);
        assert_eq!(n.reference_type, ReferenceType::Listing);
        assert_eq!(n.reference_id, listing.id);
    }
}
