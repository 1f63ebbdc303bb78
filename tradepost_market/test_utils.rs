use rand::Rng;
use uuid::Uuid;

use tradepost_types::{
    common::Profile,
    statuses::{ListingStatus, OfferStatus, ServiceStatus},
};

use crate::{
    models::{
        decline_reason::DeclineReason,
        listing::Listing,
        offer::{Offer, OfferTarget, OfferedItem},
        service::Service,
        wishlist::WishlistItem,
    },
    stats::StatCriterion,
};

#[derive(Default, Clone)]
pub struct ProfileFactoryOptions<'a> {
    pub id: Option<Uuid>,
    pub username: Option<&'a str>,
    pub is_premium: Option<bool>,
}

#[derive(Default, Clone)]
pub struct ListingFactoryOptions<'a> {
    pub seller_id: Option<Uuid>,
    pub name: Option<&'a str>,
    pub category: Option<&'a str>,
    pub game: Option<&'a str>,
    pub stats: Option<&'a str>,
    pub status: Option<ListingStatus>,
}

#[derive(Default, Clone)]
pub struct ServiceFactoryOptions<'a> {
    pub provider_id: Option<Uuid>,
    pub service_type: Option<&'a str>,
    pub game: Option<&'a str>,
    pub status: Option<ServiceStatus>,
}

#[derive(Default, Clone)]
pub struct OfferFactoryOptions {
    pub requester_id: Option<Uuid>,
    pub target: Option<OfferTarget>,
    pub status: Option<OfferStatus>,
}

#[derive(Default, Clone)]
pub struct WishlistItemFactoryOptions<'a> {
    pub user_id: Option<Uuid>,
    pub name: Option<&'a str>,
    pub game: Option<&'a str>,
    pub criteria: Option<Vec<StatCriterion>>,
}

pub fn profile_factory(options: ProfileFactoryOptions) -> Profile {
    let default_username: String = format!("trader_{}", rand::thread_rng().r#gen::<u32>());
    let mut profile = Profile::new(
        options.id.unwrap_or_else(Uuid::new_v4),
        options.username.map_or(default_username, |s| s.to_string()),
    );
    profile.set_premium(options.is_premium.unwrap_or(false));
    profile
}

pub fn listing_factory(options: ListingFactoryOptions) -> Listing {
    let mut listing = Listing::new(
        options.seller_id.unwrap_or_else(Uuid::new_v4),
        options.name.unwrap_or("Harlequin Crest").to_string(),
        options.category.unwrap_or("helm").to_string(),
        options.game.unwrap_or("d2r").to_string(),
        options
            .stats
            .unwrap_or(r#"[{"code": "allskills", "value": 2}, {"code": "ed%", "value": 141}]"#)
            .to_string(),
    );
    listing.status = options.status.unwrap_or(ListingStatus::Active);
    listing
}

pub fn service_factory(options: ServiceFactoryOptions) -> Service {
    let mut service = Service::new(
        options.provider_id.unwrap_or_else(Uuid::new_v4),
        options.service_type.unwrap_or("rush").to_string(),
        options.game.unwrap_or("d2r").to_string(),
        "Hell rush, any act".to_string(),
    );
    service.status = options.status.unwrap_or(ServiceStatus::Active);
    service
}

pub fn offer_factory(options: OfferFactoryOptions) -> Offer {
    let mut offer = Offer::new(
        options.requester_id.unwrap_or_else(Uuid::new_v4),
        options
            .target
            .unwrap_or_else(|| OfferTarget::Listing(Uuid::new_v4())),
        vec![OfferedItem {
            name: "Ist Rune".to_string(),
            quantity: 2,
            stats: None,
        }],
        Some("Quick trade?".to_string()),
    );
    offer.status = options.status.unwrap_or(OfferStatus::Pending);
    offer
}

pub fn wishlist_item_factory(options: WishlistItemFactoryOptions) -> WishlistItem {
    WishlistItem {
        id: Uuid::new_v4(),
        user_id: options.user_id.unwrap_or_else(Uuid::new_v4),
        name: options.name.unwrap_or("Harlequin Crest").to_string(),
        game: options.game.unwrap_or("d2r").to_string(),
        category: None,
        rarity: None,
        criteria: options.criteria.unwrap_or_default(),
        created_at: chrono::Utc::now(),
    }
}

pub fn decline_reason_factory(id: i32, is_active: bool) -> DeclineReason {
    DeclineReason {
        id,
        code: format!("reason_{id}"),
        label: "Price too low".to_string(),
        is_active,
    }
}
