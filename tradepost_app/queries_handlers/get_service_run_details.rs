use std::sync::Arc;

use tradepost_market::models::{
    chat::ChatParent, engagement::Engagement, transaction::TransactionSource,
};
use tradepost_types::Result;

use crate::{
    config::Config,
    cqrs::{
        QueryHandler,
        queries::{GetServiceRunDetails, ServiceRunDetails},
    },
    queries_handlers::helpers::{can_rate, find_transaction},
    uow::UnitOfWork,
};

pub struct GetServiceRunDetailsHandler;

impl GetServiceRunDetailsHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GetServiceRunDetailsHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl QueryHandler<GetServiceRunDetails> for GetServiceRunDetailsHandler {
    async fn handle(
        &self,
        query: GetServiceRunDetails,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<ServiceRunDetails> {
        let run = uow.service_runs().get_by_id(query.service_run_id).await?;
        run.ensure_participant(query.viewer_id)?;

        let chat = uow
            .chats()
            .get_by_parent(ChatParent::ServiceRun(run.id))
            .await?;

        let transaction = if run.lifecycle.is_completed() {
            find_transaction(uow, TransactionSource::ServiceRun(run.id)).await?
        } else {
            None
        };
        let can_rate = can_rate(uow, transaction.as_ref(), query.viewer_id).await?;

        Ok(ServiceRunDetails {
            service_run: run,
            chat_id: chat.id,
            transaction_id: transaction.map(|t| t.id),
            can_rate,
        })
    }
}
