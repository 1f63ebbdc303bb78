#[cfg(any(test, feature = "test-utils"))]
#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use std::{
        collections::{HashMap, HashSet},
        sync::{
            Arc, Mutex,
            atomic::{AtomicBool, AtomicUsize, Ordering},
        },
        time::Duration,
    };
    use uuid::Uuid;

    use tradepost_market::models::{
        chat::{Chat, ChatMessage, ChatParent},
        decline_reason::DeclineReason,
        listing::Listing,
        notification::Notification,
        offer::Offer,
        rating::Rating,
        service::Service,
        service_run::ServiceRun,
        trade::Trade,
        transaction::{Transaction, TransactionSource},
        wishlist::WishlistItem,
    };
    use tradepost_types::{
        common::Profile,
        errors::{ApplicationError, DbError},
        statuses::{EngagementStatus, OfferStatus},
    };

    use crate::{
        cache::CacheStore,
        repository::*,
        uow::{UnitOfWork, UnitOfWorkProvider},
    };

    #[derive(Default, Clone)]
    pub struct MockListingRepository {
        listings: Arc<Mutex<HashMap<Uuid, Listing>>>,
    }

    #[async_trait]
    impl ListingRepository for MockListingRepository {
        async fn create(&self, listing: &Listing) -> Result<(), ApplicationError> {
            self.listings
                .lock()
                .unwrap()
                .insert(listing.id, listing.clone());
            Ok(())
        }

        async fn get_by_id(&self, listing_id: Uuid) -> Result<Listing, ApplicationError> {
            self.listings
                .lock()
                .unwrap()
                .get(&listing_id)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::ListingNotFound(listing_id)))
        }

        async fn save(&self, listing: &Listing) -> Result<(), ApplicationError> {
            let mut listings = self.listings.lock().unwrap();
            if !listings.contains_key(&listing.id) {
                return Err(ApplicationError::Db(DbError::ListingNotFound(listing.id)));
            }
            listings.insert(listing.id, listing.clone());
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    pub struct MockServiceRepository {
        services: Arc<Mutex<HashMap<Uuid, Service>>>,
    }

    #[async_trait]
    impl ServiceRepository for MockServiceRepository {
        async fn create(&self, service: &Service) -> Result<(), ApplicationError> {
            self.services
                .lock()
                .unwrap()
                .insert(service.id, service.clone());
            Ok(())
        }

        async fn get_by_id(&self, service_id: Uuid) -> Result<Service, ApplicationError> {
            self.services
                .lock()
                .unwrap()
                .get(&service_id)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::ServiceNotFound(service_id)))
        }

        async fn exists_by_provider_type_game(
            &self,
            provider_id: Uuid,
            service_type: &str,
            game: &str,
        ) -> Result<bool, ApplicationError> {
            Ok(self.services.lock().unwrap().values().any(|s| {
                s.provider_id == provider_id && s.service_type == service_type && s.game == game
            }))
        }
    }

    #[derive(Default, Clone)]
    pub struct MockOfferRepository {
        offers: Arc<Mutex<HashMap<Uuid, Offer>>>,
        racing: Arc<Mutex<Option<Offer>>>,
    }

    #[async_trait]
    impl OfferRepository for MockOfferRepository {
        async fn create(&self, offer: &Offer) -> Result<(), ApplicationError> {
            self.offers.lock().unwrap().insert(offer.id, offer.clone());
            Ok(())
        }

        async fn get_by_id(&self, offer_id: Uuid) -> Result<Offer, ApplicationError> {
            self.offers
                .lock()
                .unwrap()
                .get(&offer_id)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::OfferNotFound(offer_id)))
        }

        async fn save(&self, offer: &Offer) -> Result<(), ApplicationError> {
            self.offers.lock().unwrap().insert(offer.id, offer.clone());
            Ok(())
        }

        async fn transition(
            &self,
            offer: &Offer,
            expected: OfferStatus,
        ) -> Result<bool, ApplicationError> {
            let mut offers = self.offers.lock().unwrap();
            if let Some(row) = self.racing.lock().unwrap().take() {
                offers.insert(row.id, row);
            }
            let stored = offers
                .get_mut(&offer.id)
                .ok_or_else(|| ApplicationError::Db(DbError::OfferNotFound(offer.id)))?;
            if stored.status != expected {
                return Ok(false);
            }
            *stored = offer.clone();
            Ok(true)
        }
    }

    #[derive(Default, Clone)]
    pub struct MockTradeRepository {
        trades: Arc<Mutex<HashMap<Uuid, Trade>>>,
        racing: Arc<Mutex<Option<Trade>>>,
    }

    #[async_trait]
    impl TradeRepository for MockTradeRepository {
        async fn create(&self, trade: &Trade) -> Result<(), ApplicationError> {
            self.trades.lock().unwrap().insert(trade.id, trade.clone());
            Ok(())
        }

        async fn get_by_id(&self, trade_id: Uuid) -> Result<Trade, ApplicationError> {
            self.trades
                .lock()
                .unwrap()
                .get(&trade_id)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::TradeNotFound(trade_id)))
        }

        async fn transition(
            &self,
            trade: &Trade,
            expected: EngagementStatus,
        ) -> Result<bool, ApplicationError> {
            let mut trades = self.trades.lock().unwrap();
            if let Some(row) = self.racing.lock().unwrap().take() {
                trades.insert(row.id, row);
            }
            let stored = trades
                .get_mut(&trade.id)
                .ok_or_else(|| ApplicationError::Db(DbError::TradeNotFound(trade.id)))?;
            if stored.lifecycle.status != expected {
                return Ok(false);
            }
            *stored = trade.clone();
            Ok(true)
        }

        async fn has_active_for_listing(
            &self,
            listing_id: Uuid,
        ) -> Result<bool, ApplicationError> {
            Ok(self
                .trades
                .lock()
                .unwrap()
                .values()
                .any(|t| t.listing_id == listing_id && t.lifecycle.is_active()))
        }
    }

    #[derive(Default, Clone)]
    pub struct MockServiceRunRepository {
        runs: Arc<Mutex<HashMap<Uuid, ServiceRun>>>,
        racing: Arc<Mutex<Option<ServiceRun>>>,
    }

    #[async_trait]
    impl ServiceRunRepository for MockServiceRunRepository {
        async fn create(&self, run: &ServiceRun) -> Result<(), ApplicationError> {
            self.runs.lock().unwrap().insert(run.id, run.clone());
            Ok(())
        }

        async fn get_by_id(&self, service_run_id: Uuid) -> Result<ServiceRun, ApplicationError> {
            self.runs
                .lock()
                .unwrap()
                .get(&service_run_id)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::ServiceRunNotFound(
                    service_run_id,
                )))
        }

        async fn transition(
            &self,
            run: &ServiceRun,
            expected: EngagementStatus,
        ) -> Result<bool, ApplicationError> {
            let mut runs = self.runs.lock().unwrap();
            if let Some(row) = self.racing.lock().unwrap().take() {
                runs.insert(row.id, row);
            }
            let stored = runs
                .get_mut(&run.id)
                .ok_or_else(|| ApplicationError::Db(DbError::ServiceRunNotFound(run.id)))?;
            if stored.lifecycle.status != expected {
                return Ok(false);
            }
            *stored = run.clone();
            Ok(true)
        }
    }

    #[derive(Default, Clone)]
    pub struct MockChatRepository {
        chats: Arc<Mutex<HashMap<Uuid, Chat>>>,
        messages: Arc<Mutex<Vec<ChatMessage>>>,
    }

    #[async_trait]
    impl ChatRepository for MockChatRepository {
        async fn create(&self, chat: &Chat) -> Result<(), ApplicationError> {
            self.chats.lock().unwrap().insert(chat.id, chat.clone());
            Ok(())
        }

        async fn get_by_id(&self, chat_id: Uuid) -> Result<Chat, ApplicationError> {
            self.chats
                .lock()
                .unwrap()
                .get(&chat_id)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::ChatNotFound(chat_id)))
        }

        async fn get_by_parent(&self, parent: ChatParent) -> Result<Chat, ApplicationError> {
            self.chats
                .lock()
                .unwrap()
                .values()
                .find(|c| c.parent == parent)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::ChatByParentNotFound {
                    parent_kind: parent.kind(),
                    parent_id: parent.id(),
                }))
        }

        async fn add_message(&self, message: &ChatMessage) -> Result<(), ApplicationError> {
            self.messages.lock().unwrap().push(message.clone());
            Ok(())
        }

        async fn list_messages(&self, chat_id: Uuid) -> Result<Vec<ChatMessage>, ApplicationError> {
            Ok(self
                .messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.chat_id == chat_id)
                .cloned()
                .collect())
        }
    }

    #[derive(Default, Clone)]
    pub struct MockTransactionRepository {
        transactions: Arc<Mutex<Vec<Transaction>>>,
    }

    impl MockTransactionRepository {
        pub fn count(&self) -> usize {
            self.transactions.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TransactionRepository for MockTransactionRepository {
        async fn create(&self, transaction: &Transaction) -> Result<(), ApplicationError> {
            let mut transactions = self.transactions.lock().unwrap();
            if transactions.iter().any(|t| t.source == transaction.source) {
                return Err(ApplicationError::Db(DbError::DuplicateTransaction {
                    source_kind: transaction.source.kind(),
                    source_id: transaction.source.id(),
                }));
            }
            transactions.push(transaction.clone());
            Ok(())
        }

        async fn get_by_id(&self, transaction_id: Uuid) -> Result<Transaction, ApplicationError> {
            self.transactions
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.id == transaction_id)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::TransactionNotFound(
                    transaction_id,
                )))
        }

        async fn get_by_source(
            &self,
            source: TransactionSource,
        ) -> Result<Transaction, ApplicationError> {
            self.transactions
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.source == source)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::TransactionBySourceNotFound {
                    source_kind: source.kind(),
                    source_id: source.id(),
                }))
        }
    }

    #[derive(Default, Clone)]
    pub struct MockRatingRepository {
        ratings: Arc<Mutex<Vec<Rating>>>,
    }

    #[async_trait]
    impl RatingRepository for MockRatingRepository {
        async fn create(&self, rating: &Rating) -> Result<(), ApplicationError> {
            self.ratings.lock().unwrap().push(rating.clone());
            Ok(())
        }

        async fn exists_for_rater(
            &self,
            transaction_id: Uuid,
            rater_id: Uuid,
        ) -> Result<bool, ApplicationError> {
            Ok(self
                .ratings
                .lock()
                .unwrap()
                .iter()
                .any(|r| r.transaction_id == transaction_id && r.rater_id == rater_id))
        }
    }

    #[derive(Default, Clone)]
    pub struct MockProfileRepository {
        profiles: Arc<Mutex<HashMap<Uuid, Profile>>>,
    }

    #[async_trait]
    impl ProfileRepository for MockProfileRepository {
        async fn get_by_id(&self, user_id: Uuid) -> Result<Profile, ApplicationError> {
            self.profiles
                .lock()
                .unwrap()
                .get(&user_id)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::ProfileNotFound(user_id)))
        }

        async fn save(&self, profile: &Profile) -> Result<(), ApplicationError> {
            self.profiles
                .lock()
                .unwrap()
                .insert(profile.id, profile.clone());
            Ok(())
        }
    }

    /// Candidates are the items of premium users passing the attribute filters.
    #[derive(Default, Clone)]
    pub struct MockWishlistRepository {
        items: Arc<Mutex<Vec<WishlistItem>>>,
        profiles: MockProfileRepository,
    }

    #[async_trait]
    impl WishlistRepository for MockWishlistRepository {
        async fn create(&self, item: &WishlistItem) -> Result<(), ApplicationError> {
            self.items.lock().unwrap().push(item.clone());
            Ok(())
        }

        async fn count_by_user(&self, user_id: Uuid) -> Result<usize, ApplicationError> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|i| i.user_id == user_id)
                .count())
        }

        async fn find_candidates_for_listing(
            &self,
            listing: &Listing,
        ) -> Result<Vec<WishlistItem>, ApplicationError> {
            let premium: HashSet<Uuid> = self
                .profiles
                .profiles
                .lock()
                .unwrap()
                .values()
                .filter(|p| p.is_premium)
                .map(|p| p.id)
                .collect();

            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|i| premium.contains(&i.user_id) && i.is_candidate_for(listing))
                .cloned()
                .collect())
        }
    }

    #[derive(Default, Clone)]
    pub struct MockNotificationRepository {
        notifications: Arc<Mutex<Vec<Notification>>>,
        failing_users: Arc<Mutex<HashSet<Uuid>>>,
    }

    #[async_trait]
    impl NotificationRepository for MockNotificationRepository {
        async fn create(&self, notification: &Notification) -> Result<(), ApplicationError> {
            if self
                .failing_users
                .lock()
                .unwrap()
                .contains(&notification.user_id)
            {
                return Err(ApplicationError::Infrastructure(
                    "notification store unavailable".to_string(),
                ));
            }
            self.notifications
                .lock()
                .unwrap()
                .push(notification.clone());
            Ok(())
        }

        async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Notification>, ApplicationError> {
            let mut found: Vec<Notification> = self
                .notifications
                .lock()
                .unwrap()
                .iter()
                .filter(|n| n.user_id == user_id)
                .cloned()
                .collect();
            found.reverse();
            Ok(found)
        }
    }

    #[derive(Default, Clone)]
    pub struct MockDeclineReasonRepository {
        reasons: Arc<Mutex<HashMap<i32, DeclineReason>>>,
    }

    #[async_trait]
    impl DeclineReasonRepository for MockDeclineReasonRepository {
        async fn get_by_id(&self, reason_id: i32) -> Result<DeclineReason, ApplicationError> {
            self.reasons
                .lock()
                .unwrap()
                .get(&reason_id)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::DeclineReasonNotFound(
                    reason_id,
                )))
        }
    }

    /// In-memory unit of work. Clones share the same storage, writes are visible
    /// immediately and rollback doesn't undo them.
    #[derive(Clone)]
    pub struct MockUnitOfWork {
        listings: Arc<MockListingRepository>,
        services: Arc<MockServiceRepository>,
        offers: Arc<MockOfferRepository>,
        trades: Arc<MockTradeRepository>,
        service_runs: Arc<MockServiceRunRepository>,
        chats: Arc<MockChatRepository>,
        transactions: Arc<MockTransactionRepository>,
        ratings: Arc<MockRatingRepository>,
        wishlist: Arc<MockWishlistRepository>,
        notifications: Arc<MockNotificationRepository>,
        decline_reasons: Arc<MockDeclineReasonRepository>,
        profiles: Arc<MockProfileRepository>,

        // Counters to check commit/rollback calls
        commits: Arc<AtomicUsize>,
        rollbacks: Arc<AtomicUsize>,
    }

    impl Default for MockUnitOfWork {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockUnitOfWork {
        pub fn new() -> Self {
            // wishlist candidates depend on the premium flag of profiles
            let profiles = MockProfileRepository::default();
            Self {
                listings: Default::default(),
                services: Default::default(),
                offers: Default::default(),
                trades: Default::default(),
                service_runs: Default::default(),
                chats: Default::default(),
                transactions: Default::default(),
                ratings: Default::default(),
                wishlist: Arc::new(MockWishlistRepository {
                    items: Default::default(),
                    profiles: profiles.clone(),
                }),
                notifications: Default::default(),
                decline_reasons: Default::default(),
                profiles: Arc::new(profiles),
                commits: Default::default(),
                rollbacks: Default::default(),
            }
        }

        pub fn add_listing(&self, listing: Listing) {
            self.listings
                .listings
                .lock()
                .unwrap()
                .insert(listing.id, listing);
        }

        pub fn add_service(&self, service: Service) {
            self.services
                .services
                .lock()
                .unwrap()
                .insert(service.id, service);
        }

        pub fn add_offer(&self, offer: Offer) {
            self.offers.offers.lock().unwrap().insert(offer.id, offer);
        }

        pub fn add_trade(&self, trade: Trade) {
            self.trades.trades.lock().unwrap().insert(trade.id, trade);
        }

        pub fn add_profile(&self, profile: Profile) {
            self.profiles
                .profiles
                .lock()
                .unwrap()
                .insert(profile.id, profile);
        }

        pub fn add_decline_reason(&self, reason: DeclineReason) {
            self.decline_reasons
                .reasons
                .lock()
                .unwrap()
                .insert(reason.id, reason);
        }

        pub fn add_wishlist_item(&self, item: WishlistItem) {
            self.wishlist.items.lock().unwrap().push(item);
        }

        pub fn add_transaction(&self, transaction: Transaction) {
            self.transactions
                .transactions
                .lock()
                .unwrap()
                .push(transaction);
        }

        /// Stores `offer` right before the next offer transition, as a
        /// concurrent writer committing in between would.
        pub fn race_offer(&self, offer: Offer) {
            *self.offers.racing.lock().unwrap() = Some(offer);
        }

        /// Stores `trade` right before the next trade transition.
        pub fn race_trade(&self, trade: Trade) {
            *self.trades.racing.lock().unwrap() = Some(trade);
        }

        /// Stores `run` right before the next service run transition.
        pub fn race_service_run(&self, run: ServiceRun) {
            *self.service_runs.racing.lock().unwrap() = Some(run);
        }

        /// Makes every notification addressed to `user_id` fail to store.
        pub fn fail_notifications_for(&self, user_id: Uuid) {
            self.notifications
                .failing_users
                .lock()
                .unwrap()
                .insert(user_id);
        }

        pub fn notifications_for(&self, user_id: Uuid) -> Vec<Notification> {
            self.notifications
                .notifications
                .lock()
                .unwrap()
                .iter()
                .filter(|n| n.user_id == user_id)
                .cloned()
                .collect()
        }

        pub fn transaction_count(&self) -> usize {
            self.transactions.count()
        }

        pub fn commits(&self) -> usize {
            self.commits.load(Ordering::SeqCst)
        }

        pub fn rollbacks(&self) -> usize {
            self.rollbacks.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl<'a> UnitOfWork<'a> for MockUnitOfWork {
        fn listings(&self) -> Arc<dyn ListingRepository + 'a> {
            self.listings.clone()
        }
        fn services(&self) -> Arc<dyn ServiceRepository + 'a> {
            self.services.clone()
        }
        fn offers(&self) -> Arc<dyn OfferRepository + 'a> {
            self.offers.clone()
        }
        fn trades(&self) -> Arc<dyn TradeRepository + 'a> {
            self.trades.clone()
        }
        fn service_runs(&self) -> Arc<dyn ServiceRunRepository + 'a> {
            self.service_runs.clone()
        }
        fn chats(&self) -> Arc<dyn ChatRepository + 'a> {
            self.chats.clone()
        }
        fn transactions(&self) -> Arc<dyn TransactionRepository + 'a> {
            self.transactions.clone()
        }
        fn ratings(&self) -> Arc<dyn RatingRepository + 'a> {
            self.ratings.clone()
        }
        fn wishlist(&self) -> Arc<dyn WishlistRepository + 'a> {
            self.wishlist.clone()
        }
        fn notifications(&self) -> Arc<dyn NotificationRepository + 'a> {
            self.notifications.clone()
        }
        fn decline_reasons(&self) -> Arc<dyn DeclineReasonRepository + 'a> {
            self.decline_reasons.clone()
        }
        fn profiles(&self) -> Arc<dyn ProfileRepository + 'a> {
            self.profiles.clone()
        }

        async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
            self.commits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
            self.rollbacks.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Hands out units of work over one shared in-memory store.
    #[derive(Default)]
    pub struct MockUnitOfWorkProvider {
        uow: MockUnitOfWork,
    }

    impl MockUnitOfWorkProvider {
        pub fn new() -> Self {
            Self {
                uow: MockUnitOfWork::new(),
            }
        }

        /// The shared store, for seeding and inspecting state.
        pub fn uow(&self) -> &MockUnitOfWork {
            &self.uow
        }
    }

    #[async_trait]
    impl UnitOfWorkProvider for MockUnitOfWorkProvider {
        async fn tx<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
            let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(self.uow.clone());
            Ok(uow)
        }
    }

    /// Records deleted keys; can be switched to fail every delete.
    #[derive(Default)]
    pub struct MockCache {
        deleted: Mutex<Vec<String>>,
        failing: AtomicBool,
    }

    impl MockCache {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_deletes(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub fn deleted_keys(&self) -> Vec<String> {
            self.deleted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CacheStore for MockCache {
        async fn get(&self, _key: &str) -> Result<Option<String>, ApplicationError> {
            Ok(None)
        }

        async fn set(
            &self,
            _key: &str,
            _value: String,
            _ttl: Duration,
        ) -> Result<(), ApplicationError> {
            Ok(())
        }

        async fn delete(&self, key: &str) -> Result<(), ApplicationError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(ApplicationError::Infrastructure(
                    "cache unavailable".to_string(),
                ));
            }
            self.deleted.lock().unwrap().push(key.to_string());
            Ok(())
        }
    }
}
