mod accept_offer;
mod cancel_offer;
mod cancel_service_run;
mod cancel_trade;
mod complete_service_run;
mod complete_trade;
mod create_listing;
mod create_offer;
mod create_service;
mod create_wishlist_item;
pub(crate) mod helpers;
mod rate_transaction;
mod reject_offer;
mod send_chat_message;
mod set_premium_status;

pub use accept_offer::AcceptOfferCommandHandler;
pub use cancel_offer::CancelOfferCommandHandler;
pub use cancel_service_run::CancelServiceRunCommandHandler;
pub use cancel_trade::CancelTradeCommandHandler;
pub use complete_service_run::CompleteServiceRunCommandHandler;
pub use complete_trade::CompleteTradeCommandHandler;
pub use create_listing::CreateListingCommandHandler;
pub use create_offer::CreateOfferCommandHandler;
pub use create_service::CreateServiceCommandHandler;
pub use create_wishlist_item::CreateWishlistItemCommandHandler;
pub use rate_transaction::RateTransactionCommandHandler;
pub use reject_offer::RejectOfferCommandHandler;
pub use send_chat_message::SendChatMessageCommandHandler;
pub use set_premium_status::SetPremiumStatusCommandHandler;
