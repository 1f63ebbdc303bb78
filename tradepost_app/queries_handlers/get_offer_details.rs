use std::sync::Arc;

use tradepost_market::models::offer::{Offer, OfferParties};
use tradepost_types::Result;

use crate::{
    command_handlers::helpers::load_subject,
    config::Config,
    cqrs::{QueryHandler, queries::GetOfferDetails},
    uow::UnitOfWork,
};

pub struct GetOfferDetailsHandler;

impl GetOfferDetailsHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GetOfferDetailsHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl QueryHandler<GetOfferDetails> for GetOfferDetailsHandler {
    async fn handle(
        &self,
        query: GetOfferDetails,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<Offer> {
        let offer = uow.offers().get_by_id(query.offer_id).await?;
        let subject = load_subject(uow, &offer.target).await?;
        OfferParties::new(&offer, &subject).ensure_participant(query.viewer_id)?;
        Ok(offer)
    }
}
