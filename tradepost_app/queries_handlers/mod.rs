mod get_offer_details;
mod get_service_run_details;
mod get_trade_details;
mod helpers;
mod list_notifications;

pub use get_offer_details::GetOfferDetailsHandler;
pub use get_service_run_details::GetServiceRunDetailsHandler;
pub use get_trade_details::GetTradeDetailsHandler;
pub use list_notifications::ListNotificationsHandler;
