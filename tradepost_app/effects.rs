use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use tradepost_market::models::{listing::Listing, notification::Notification};

use crate::{
    cache::{CacheEntity, CacheStore},
    notifications::persist_notification,
    tasks::BackgroundTasks,
    uow::UnitOfWorkProvider,
    wishlist::WishlistMatcher,
};

/// Work to run once a command's transaction has committed.
///
/// Effects are best-effort and independent of each other: a failing effect is
/// logged and never undoes the state change that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Notify(Notification),
    InvalidateCache { kind: CacheEntity, id: Uuid },
    /// Match a new listing against saved wishlists, in the background.
    MatchWishlists(Listing),
}

/// Value returned by a command handler together with its pending effects.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub value: T,
    pub effects: Vec<Effect>,
}

impl<T> Outcome<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn invalidate(self, kind: CacheEntity, id: Uuid) -> Self {
        self.with_effect(Effect::InvalidateCache { kind, id })
    }

    pub fn notify(self, notification: Notification) -> Self {
        self.with_effect(Effect::Notify(notification))
    }
}

pub struct EffectDispatcher {
    uow_provider: Arc<dyn UnitOfWorkProvider>,
    cache: Arc<dyn CacheStore>,
    wishlist: Arc<WishlistMatcher>,
    tasks: BackgroundTasks,
}

impl EffectDispatcher {
    pub fn new(
        uow_provider: Arc<dyn UnitOfWorkProvider>,
        cache: Arc<dyn CacheStore>,
        wishlist: Arc<WishlistMatcher>,
        tasks: BackgroundTasks,
    ) -> Self {
        Self {
            uow_provider,
            cache,
            wishlist,
            tasks,
        }
    }

    pub fn tasks(&self) -> &BackgroundTasks {
        &self.tasks
    }

    pub async fn dispatch(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Notify(notification) => {
                    if let Err(e) =
                        persist_notification(self.uow_provider.as_ref(), &notification).await
                    {
                        warn!(
                            user_id = %notification.user_id,
                            kind = ?notification.kind,
                            error = %e,
                            "Failed to store notification"
                        );
                    }
                }
                Effect::InvalidateCache { kind, id } => {
                    if let Err(e) = self.cache.invalidate(kind, id).await {
                        warn!(%kind, %id, error = %e, "Failed to invalidate cache entry");
                    }
                }
                Effect::MatchWishlists(listing) => {
                    let matcher = self.wishlist.clone();
                    self.tasks.spawn("wishlist_matching", async move {
                        matcher.check_and_notify(&listing).await;
                    });
                }
            }
        }
    }
}
