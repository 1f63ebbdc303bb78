use uuid::Uuid;

use tradepost_market::models::{
    notification::Notification, offer::Offer, service_run::ServiceRun, trade::Trade,
};

use crate::cqrs::Query;

/// Fetch an offer; only its requester and the listing/service owner may see it.
pub struct GetOfferDetails {
    pub viewer_id: Uuid,
    pub offer_id: Uuid,
}

impl Query for GetOfferDetails {
    type Output = Offer;
}

/// Fetch a trade as seen by one of its participants.
pub struct GetTradeDetails {
    pub viewer_id: Uuid,
    pub trade_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct TradeDetails {
    pub trade: Trade,
    pub chat_id: Uuid,
    pub transaction_id: Option<Uuid>,
    /// Whether the viewer can still rate the completed trade.
    pub can_rate: bool,
}

impl Query for GetTradeDetails {
    type Output = TradeDetails;
}

/// Fetch a service run as seen by one of its participants.
pub struct GetServiceRunDetails {
    pub viewer_id: Uuid,
    pub service_run_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct ServiceRunDetails {
    pub service_run: ServiceRun,
    pub chat_id: Uuid,
    pub transaction_id: Option<Uuid>,
    pub can_rate: bool,
}

impl Query for GetServiceRunDetails {
    type Output = ServiceRunDetails;
}

pub struct ListNotifications {
    pub user_id: Uuid,
}

impl Query for ListNotifications {
    type Output = Vec<Notification>;
}
