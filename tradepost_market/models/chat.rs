use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{engagement::Engagement, service_run::ServiceRun, trade::Trade};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ChatParent {
    Trade(Uuid),
    ServiceRun(Uuid),
}

impl ChatParent {
    pub fn kind(&self) -> &'static str {
        match self {
            ChatParent::Trade(_) => "trade",
            ChatParent::ServiceRun(_) => "service run",
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            ChatParent::Trade(id) | ChatParent::ServiceRun(id) => *id,
        }
    }
}

/// Conversation between the two participants of a trade or service run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: Uuid,
    pub parent: ChatParent,
    pub participants: [Uuid; 2],
    pub created_at: DateTime<Utc>,
}

impl Chat {
    fn new(parent: ChatParent, participants: [Uuid; 2]) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent,
            participants,
            created_at: Utc::now(),
        }
    }

    pub fn for_trade(trade: &Trade) -> Self {
        Self::new(
            ChatParent::Trade(trade.id),
            [trade.owner_id(), trade.counterparty_id()],
        )
    }

    pub fn for_service_run(run: &ServiceRun) -> Self {
        Self::new(
            ChatParent::ServiceRun(run.id),
            [run.owner_id(), run.counterparty_id()],
        )
    }

    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.participants.contains(&user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(chat_id: Uuid, sender_id: Uuid, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            chat_id,
            sender_id,
            body,
            created_at: Utc::now(),
        }
    }
}
