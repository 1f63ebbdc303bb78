use uuid::Uuid;

use tradepost_market::models::chat::{Chat, ChatMessage, ChatParent};
use tradepost_types::{Result, errors::ApplicationError};

#[async_trait::async_trait]
pub trait ChatRepository: Send + Sync {
    async fn create(&self, chat: &Chat) -> Result<(), ApplicationError>;

    async fn get_by_id(&self, chat_id: Uuid) -> Result<Chat, ApplicationError>;

    /// Returns the chat opened for a trade or service run.
    async fn get_by_parent(&self, parent: ChatParent) -> Result<Chat, ApplicationError>;

    async fn add_message(&self, message: &ChatMessage) -> Result<(), ApplicationError>;

    /// Lists messages of a chat, oldest first.
    async fn list_messages(&self, chat_id: Uuid) -> Result<Vec<ChatMessage>, ApplicationError>;
}
