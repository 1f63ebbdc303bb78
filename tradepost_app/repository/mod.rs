mod chat_repository;
mod decline_reason_repository;
mod listing_repository;
mod notification_repository;
mod offer_repository;
mod profile_repository;
mod rating_repository;
mod service_repository;
mod service_run_repository;
mod trade_repository;
mod transaction_repository;
mod wishlist_repository;

pub use chat_repository::ChatRepository;
pub use decline_reason_repository::DeclineReasonRepository;
pub use listing_repository::ListingRepository;
pub use notification_repository::NotificationRepository;
pub use offer_repository::OfferRepository;
pub use profile_repository::ProfileRepository;
pub use rating_repository::RatingRepository;
pub use service_repository::ServiceRepository;
pub use service_run_repository::ServiceRunRepository;
pub use trade_repository::TradeRepository;
pub use transaction_repository::TransactionRepository;
pub use wishlist_repository::WishlistRepository;
