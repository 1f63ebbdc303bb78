use std::sync::Arc;

use tradepost_market::models::notification::Notification;
use tradepost_types::Result;

use crate::{
    config::Config,
    cqrs::{QueryHandler, queries::ListNotifications},
    uow::UnitOfWork,
};

/// Notifications for a user, newest first.
pub struct ListNotificationsHandler;

impl ListNotificationsHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ListNotificationsHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl QueryHandler<ListNotifications> for ListNotificationsHandler {
    async fn handle(
        &self,
        query: ListNotifications,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<Vec<Notification>> {
        uow.notifications().list_by_user(query.user_id).await
    }
}
