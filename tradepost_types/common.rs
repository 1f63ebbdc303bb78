use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public profile of a marketplace user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub username: String,
    pub is_premium: bool,
    pub timezone: Option<String>,
}

impl Profile {
    pub fn new(id: Uuid, username: String) -> Self {
        Self {
            id,
            username,
            is_premium: false,
            timezone: None,
        }
    }

    pub fn set_premium(&mut self, is_premium: bool) {
        self.is_premium = is_premium;
    }
}
