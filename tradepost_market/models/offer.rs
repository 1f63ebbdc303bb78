use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradepost_types::{
    errors::MarketError,
    statuses::{OfferKind, OfferStatus},
};

use super::{listing::Listing, service::Service};

/// What an offer is made against. Serialized with the `item`/`service` type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "targetId", rename_all = "lowercase")]
pub enum OfferTarget {
    #[serde(rename = "item")]
    Listing(Uuid),
    Service(Uuid),
}

impl OfferTarget {
    /// Builds a target from the two optional ids used at the API boundary.
    /// Exactly one must be set; the nil uuid counts as unset.
    pub fn from_parts(
        listing_id: Option<Uuid>,
        service_id: Option<Uuid>,
    ) -> Result<Self, MarketError> {
        let listing_id = listing_id.filter(|id| !id.is_nil());
        let service_id = service_id.filter(|id| !id.is_nil());

        match (listing_id, service_id) {
            (Some(id), None) => Ok(OfferTarget::Listing(id)),
            (None, Some(id)) => Ok(OfferTarget::Service(id)),
            (Some(_), Some(_)) => Err(MarketError::AmbiguousOfferTarget),
            (None, None) => Err(MarketError::MissingOfferTarget),
        }
    }

    pub fn kind(&self) -> OfferKind {
        match self {
            OfferTarget::Listing(_) => OfferKind::Item,
            OfferTarget::Service(_) => OfferKind::Service,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            OfferTarget::Listing(id) | OfferTarget::Service(id) => *id,
        }
    }

    pub fn listing_id(&self) -> Option<Uuid> {
        match self {
            OfferTarget::Listing(id) => Some(*id),
            OfferTarget::Service(_) => None,
        }
    }

    pub fn service_id(&self) -> Option<Uuid> {
        match self {
            OfferTarget::Service(id) => Some(*id),
            OfferTarget::Listing(_) => None,
        }
    }
}

/// Something the requester puts on the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferedItem {
    pub name: String,
    pub quantity: u32,
    /// Raw stats JSON of the offered item, in the same shape as listing stats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub target: OfferTarget,
    pub offered_items: Vec<OfferedItem>,
    pub message: Option<String>,
    pub status: OfferStatus,
    pub decline_reason_id: Option<i32>,
    pub decline_note: Option<String>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Offer {
    pub fn new(
        requester_id: Uuid,
        target: OfferTarget,
        offered_items: Vec<OfferedItem>,
        message: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            requester_id,
            target,
            offered_items,
            message,
            status: OfferStatus::Pending,
            decline_reason_id: None,
            decline_note: None,
            accepted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn kind(&self) -> OfferKind {
        self.target.kind()
    }

    pub fn ensure_requester(&self, user_id: Uuid) -> Result<(), MarketError> {
        if self.requester_id != user_id {
            return Err(MarketError::NotOfferRequester);
        }
        Ok(())
    }

    pub fn ensure_pending(&self) -> Result<(), MarketError> {
        if self.status != OfferStatus::Pending {
            return Err(MarketError::OfferNotPending {
                offer_id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }

    pub fn accept(&mut self) -> Result<(), MarketError> {
        self.ensure_pending()?;
        let now = Utc::now();
        self.status = OfferStatus::Accepted;
        self.accepted_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    pub fn reject(&mut self, decline_reason_id: i32, note: Option<String>) -> Result<(), MarketError> {
        self.ensure_pending()?;
        self.status = OfferStatus::Rejected;
        self.decline_reason_id = Some(decline_reason_id);
        self.decline_note = note.filter(|n| !n.trim().is_empty());
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), MarketError> {
        self.ensure_pending()?;
        self.status = OfferStatus::Cancelled;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Mirrors the completion of the trade or service run spawned by this offer.
    pub fn sync_completed(&mut self) {
        self.status = OfferStatus::Completed;
        self.updated_at = Utc::now();
    }

    /// Mirrors the cancellation of the trade or service run spawned by this offer.
    pub fn sync_cancelled(&mut self) {
        self.status = OfferStatus::Cancelled;
        self.updated_at = Utc::now();
    }
}

/// The resolved listing or service an offer targets.
#[derive(Debug, Clone, PartialEq)]
pub enum OfferSubject {
    Listing(Listing),
    Service(Service),
}

impl OfferSubject {
    pub fn id(&self) -> Uuid {
        match self {
            OfferSubject::Listing(listing) => listing.id,
            OfferSubject::Service(service) => service.id,
        }
    }

    /// Seller of the listing or provider of the service.
    pub fn owner_id(&self) -> Uuid {
        match self {
            OfferSubject::Listing(listing) => listing.seller_id,
            OfferSubject::Service(service) => service.provider_id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            OfferSubject::Listing(listing) => &listing.name,
            OfferSubject::Service(service) => &service.name,
        }
    }

    pub fn ensure_active(&self) -> Result<(), MarketError> {
        match self {
            OfferSubject::Listing(listing) => listing.ensure_active(),
            OfferSubject::Service(service) => service.ensure_active(),
        }
    }
}

/// Who may act on an offer: the requester and the owner of its subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferParties {
    pub requester_id: Uuid,
    pub owner_id: Uuid,
}

impl OfferParties {
    pub fn new(offer: &Offer, subject: &OfferSubject) -> Self {
        Self {
            requester_id: offer.requester_id,
            owner_id: subject.owner_id(),
        }
    }

    pub fn is_owner(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.requester_id == user_id || self.owner_id == user_id
    }

    pub fn ensure_owner(&self, user_id: Uuid) -> Result<(), MarketError> {
        if !self.is_owner(user_id) {
            return Err(MarketError::NotOfferOwner);
        }
        Ok(())
    }

    pub fn ensure_participant(&self, user_id: Uuid) -> Result<(), MarketError> {
        if !self.is_participant(user_id) {
            return Err(MarketError::NotParticipant);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_offer() -> Offer {
        Offer::new(
            Uuid::new_v4(),
            OfferTarget::Listing(Uuid::new_v4()),
            vec![OfferedItem {
                name: "Ist Rune".to_string(),
                quantity: 2,
                stats: None,
            }],
            None,
        )
    }

    #[test]
    fn test_target_requires_exactly_one_id() {
        let id = Uuid::new_v4();
        assert_eq!(
            OfferTarget::from_parts(Some(id), None).unwrap(),
            OfferTarget::Listing(id)
        );
        assert_eq!(
            OfferTarget::from_parts(None, Some(id)).unwrap(),
            OfferTarget::Service(id)
        );
        assert!(matches!(
            OfferTarget::from_parts(Some(id), Some(Uuid::new_v4())),
            Err(MarketError::AmbiguousOfferTarget)
        ));
        assert!(matches!(
            OfferTarget::from_parts(None, None),
            Err(MarketError::MissingOfferTarget)
        ));
        assert!(matches!(
            OfferTarget::from_parts(Some(Uuid::nil()), None),
            Err(MarketError::MissingOfferTarget)
        ));
    }

    #[test]
    fn test_target_kind_and_tag() {
        let target = OfferTarget::Listing(Uuid::nil());
        assert_eq!(target.kind(), OfferKind::Item);
        assert_eq!(target.listing_id(), Some(Uuid::nil()));
        assert_eq!(target.service_id(), None);

        let json = serde_json::to_value(target).unwrap();
        assert_eq!(json["type"], "item");

        let json = serde_json::to_value(OfferTarget::Service(Uuid::nil())).unwrap();
        assert_eq!(json["type"], "service");
    }

    #[test]
    fn test_accept_only_from_pending() {
        let mut offer = pending_offer();
        offer.accept().unwrap();
        assert_eq!(offer.status, OfferStatus::Accepted);
        assert!(offer.accepted_at.is_some());

        assert!(matches!(
            offer.accept(),
            Err(MarketError::OfferNotPending {
                status: OfferStatus::Accepted,
                ..
            })
        ));
        assert!(offer.cancel().is_err());
    }

    #[test]
    fn test_reject_stores_reason() {
        let mut offer = pending_offer();
        offer.reject(3, Some("  ".to_string())).unwrap();
        assert_eq!(offer.status, OfferStatus::Rejected);
        assert_eq!(offer.decline_reason_id, Some(3));
        assert_eq!(offer.decline_note, None);
    }

    #[test]
    fn test_parties() {
        let offer = pending_offer();
        let owner_id = Uuid::new_v4();
        let parties = OfferParties {
            requester_id: offer.requester_id,
            owner_id,
        };

        assert!(parties.is_owner(owner_id));
        assert!(!parties.is_owner(offer.requester_id));
        assert!(parties.is_participant(offer.requester_id));
        assert!(offer.ensure_requester(owner_id).is_err());
        assert!(offer.ensure_requester(offer.requester_id).is_ok());
        assert!(matches!(
            parties.ensure_participant(Uuid::new_v4()),
            Err(MarketError::NotParticipant)
        ));
    }

    #[test]
    fn test_offered_item_stats_survive_in_transaction() {
        let legacy: OfferedItem =
            serde_json::from_str(r#"{"name": "Ist Rune", "quantity": 2}"#).unwrap();
        assert_eq!(legacy.stats, None);

        let listing = Listing::new(
            Uuid::new_v4(),
            "Harlequin Crest".to_string(),
            "helm".to_string(),
            "d2r".to_string(),
            "[]".to_string(),
        );
        let offer = Offer::new(
            Uuid::new_v4(),
            OfferTarget::Listing(listing.id),
            vec![OfferedItem {
                name: "Stone of Jordan".to_string(),
                quantity: 1,
                stats: Some(r#"[{"code": "mana%", "value": 25}]"#.to_string()),
            }],
            None,
        );
        let trade = crate::models::trade::Trade::new(
            offer.id,
            listing.id,
            listing.seller_id,
            offer.requester_id,
        );

        let transaction =
            crate::models::transaction::Transaction::for_trade(&trade, &listing, &offer);
        assert_eq!(
            transaction.offered_items[0].stats.as_deref(),
            Some(r#"[{"code": "mana%", "value": 25}]"#)
        );
    }
}
