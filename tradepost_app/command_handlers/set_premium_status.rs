use std::sync::Arc;

use tracing::info;

use tradepost_types::{Result, common::Profile, errors::ApplicationError};

use crate::{
    cache::CacheEntity,
    config::Config,
    cqrs::{CommandHandler, commands::SetPremiumStatus},
    effects::Outcome,
    uow::UnitOfWork,
};

/// Applies the result of a billing event to a user's profile.
pub struct SetPremiumStatusCommandHandler {}

impl Default for SetPremiumStatusCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SetPremiumStatusCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<SetPremiumStatus> for SetPremiumStatusCommandHandler {
    async fn handle(
        &self,
        command: SetPremiumStatus,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<Outcome<Profile>, ApplicationError> {
        let profile_repo = uow.profiles();
        let mut profile = profile_repo.get_by_id(command.user_id).await?;

        if profile.is_premium == command.is_premium {
            return Ok(Outcome::new(profile));
        }

        profile.set_premium(command.is_premium);
        profile_repo.save(&profile).await?;
        info!(user_id = %profile.id, is_premium = profile.is_premium, "Premium status changed");

        let user_id = profile.id;
        Ok(Outcome::new(profile).invalidate(CacheEntity::Profile, user_id))
    }
}
