use uuid::Uuid;

use tradepost_market::{
    models::{
        chat::{Chat, ChatMessage},
        listing::Listing,
        offer::{Offer, OfferedItem},
        rating::Rating,
        service::Service,
        service_run::ServiceRun,
        trade::Trade,
        transaction::Transaction,
        wishlist::WishlistItem,
    },
    stats::StatCriterion,
};
use tradepost_types::common::Profile;

use crate::cqrs::Command;

/// Puts an item on the market.
#[derive(Debug, Clone)]
pub struct CreateListing {
    pub seller_id: Uuid,
    pub name: String,
    pub category: String,
    pub rarity: Option<String>,
    pub game: String,
    /// JSON array of `{code, value, displayText?, isVariable}`.
    pub stats: String,
}

impl Command for CreateListing {
    type Output = Listing;
}

#[derive(Debug, Clone)]
pub struct CreateService {
    pub provider_id: Uuid,
    pub service_type: String,
    pub game: String,
    pub name: String,
    pub description: Option<String>,
}

impl Command for CreateService {
    type Output = Service;
}

/// Makes an offer against a listing or a service. Exactly one id must be set.
#[derive(Debug, Clone)]
pub struct CreateOffer {
    pub requester_id: Uuid,
    pub listing_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub offered_items: Vec<OfferedItem>,
    pub message: Option<String>,
}

impl Command for CreateOffer {
    type Output = Offer;
}

#[derive(Debug, Clone)]
pub struct AcceptOffer {
    pub actor_id: Uuid,
    pub offer_id: Uuid,
}

/// Result of accepting an offer: exactly one of `trade` and `service_run` is set.
#[derive(Debug, Clone)]
pub struct AcceptedOffer {
    pub offer: Offer,
    pub trade: Option<Trade>,
    pub service_run: Option<ServiceRun>,
    pub chat: Chat,
}

impl Command for AcceptOffer {
    type Output = AcceptedOffer;
}

#[derive(Debug, Clone)]
pub struct RejectOffer {
    pub actor_id: Uuid,
    pub offer_id: Uuid,
    pub decline_reason_id: i32,
    pub note: Option<String>,
}

impl Command for RejectOffer {
    type Output = Offer;
}

#[derive(Debug, Clone)]
pub struct CancelOffer {
    pub actor_id: Uuid,
    pub offer_id: Uuid,
}

impl Command for CancelOffer {
    type Output = Offer;
}

#[derive(Debug, Clone)]
pub struct CompleteTrade {
    pub actor_id: Uuid,
    pub trade_id: Uuid,
}

impl Command for CompleteTrade {
    type Output = Transaction;
}

#[derive(Debug, Clone)]
pub struct CancelTrade {
    pub actor_id: Uuid,
    pub trade_id: Uuid,
    pub reason: Option<String>,
}

impl Command for CancelTrade {
    type Output = Trade;
}

#[derive(Debug, Clone)]
pub struct CompleteServiceRun {
    pub actor_id: Uuid,
    pub service_run_id: Uuid,
}

impl Command for CompleteServiceRun {
    type Output = Transaction;
}

#[derive(Debug, Clone)]
pub struct CancelServiceRun {
    pub actor_id: Uuid,
    pub service_run_id: Uuid,
    pub reason: Option<String>,
}

impl Command for CancelServiceRun {
    type Output = ServiceRun;
}

#[derive(Debug, Clone)]
pub struct SendChatMessage {
    pub sender_id: Uuid,
    pub chat_id: Uuid,
    pub body: String,
}

impl Command for SendChatMessage {
    type Output = ChatMessage;
}

#[derive(Debug, Clone)]
pub struct RateTransaction {
    pub rater_id: Uuid,
    pub transaction_id: Uuid,
    pub score: u8,
    pub comment: Option<String>,
}

impl Command for RateTransaction {
    type Output = Rating;
}

/// Saves a wishlist entry. Premium only.
#[derive(Debug, Clone)]
pub struct CreateWishlistItem {
    pub user_id: Uuid,
    pub name: String,
    pub game: String,
    pub category: Option<String>,
    pub rarity: Option<String>,
    pub criteria: Vec<StatCriterion>,
}

impl Command for CreateWishlistItem {
    type Output = WishlistItem;
}

/// Outcome of a billing event: grants or revokes premium.
#[derive(Debug, Clone)]
pub struct SetPremiumStatus {
    pub user_id: Uuid,
    pub is_premium: bool,
}

impl Command for SetPremiumStatus {
    type Output = Profile;
}
