use std::sync::Arc;

use tracing::debug;

use tradepost_market::models::chat::{ChatMessage, ChatParent};
use tradepost_types::{
    Result,
    errors::{ApplicationError, MarketError},
};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::SendChatMessage},
    effects::Outcome,
    uow::UnitOfWork,
};

pub struct SendChatMessageCommandHandler {}

impl Default for SendChatMessageCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SendChatMessageCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<SendChatMessage> for SendChatMessageCommandHandler {
    async fn handle(
        &self,
        command: SendChatMessage,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<Outcome<ChatMessage>, ApplicationError> {
        let chat_repo = uow.chats();
        let chat = chat_repo.get_by_id(command.chat_id).await?;

        if !chat.is_participant(command.sender_id) {
            return Err(ApplicationError::Market(MarketError::NotParticipant));
        }

        let body = command.body.trim();
        if body.is_empty() {
            return Err(ApplicationError::Market(MarketError::EmptyChatMessage));
        }
        if body.chars().count() > config.max_chat_message_len {
            return Err(ApplicationError::Market(MarketError::ChatMessageTooLong {
                limit: config.max_chat_message_len,
            }));
        }

        let parent_active = match chat.parent {
            ChatParent::Trade(id) => uow.trades().get_by_id(id).await?.lifecycle.is_active(),
            ChatParent::ServiceRun(id) => {
                uow.service_runs().get_by_id(id).await?.lifecycle.is_active()
            }
        };
        if !parent_active {
            return Err(ApplicationError::Market(MarketError::ChatClosed(chat.id)));
        }

        let message = ChatMessage::new(chat.id, command.sender_id, body.to_string());
        chat_repo.add_message(&message).await?;
        debug!(chat_id = %chat.id, message_id = %message.id, "Chat message stored");

        Ok(Outcome::new(message))
    }
}
