use std::sync::Arc;

use tracing::info;

use tradepost_market::models::service::Service;
use tradepost_types::{
    Result,
    errors::{ApplicationError, MarketError},
};

use crate::{
    cache::CacheEntity,
    config::Config,
    cqrs::{CommandHandler, commands::CreateService},
    effects::Outcome,
    uow::UnitOfWork,
};

pub struct CreateServiceCommandHandler {}

impl Default for CreateServiceCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateServiceCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<CreateService> for CreateServiceCommandHandler {
    async fn handle(
        &self,
        command: CreateService,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<Outcome<Service>, ApplicationError> {
        let service_repo = uow.services();

        if service_repo
            .exists_by_provider_type_game(command.provider_id, &command.service_type, &command.game)
            .await?
        {
            return Err(ApplicationError::Market(MarketError::DuplicateService {
                service_type: command.service_type,
                game: command.game,
            }));
        }

        let mut service = Service::new(
            command.provider_id,
            command.service_type,
            command.game,
            command.name,
        );
        if let Some(description) = command.description.as_deref() {
            service = service.with_description(description);
        }

        service_repo.create(&service).await?;
        info!(service_id = %service.id, provider_id = %service.provider_id, "Service created");

        Ok(Outcome::new(service.clone()).invalidate(CacheEntity::Service, service.id))
    }
}
