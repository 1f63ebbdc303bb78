use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradepost_types::notifications::{NotificationType, ReferenceType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationType,
    pub title: String,
    pub body: String,
    pub reference_type: ReferenceType,
    pub reference_id: Uuid,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_id: Uuid,
        kind: NotificationType,
        title: String,
        body: String,
        reference_type: ReferenceType,
        reference_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            title,
            body,
            reference_type,
            reference_id,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}
