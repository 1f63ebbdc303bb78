use dotenvy::dotenv;
use std::env;

pub struct Config {
    /// Run wishlist matching in the background when a listing is created.
    pub wishlist_matching_enabled: bool,
    pub max_wishlist_items: usize,
    pub max_offered_items: usize,
    pub max_chat_message_len: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let wishlist_matching_enabled = match env::var("TRADEPOST_WISHLIST_MATCHING") {
            Ok(val) => !matches!(val.to_lowercase().as_str(), "0" | "false" | "off"),
            Err(_) => true,
        };

        let max_wishlist_items = match env::var("TRADEPOST_MAX_WISHLIST_ITEMS") {
            Ok(val) => val.parse::<usize>().unwrap_or(25),
            Err(_) => 25,
        };

        let max_offered_items = match env::var("TRADEPOST_MAX_OFFERED_ITEMS") {
            Ok(val) => val.parse::<usize>().unwrap_or(10).max(1),
            Err(_) => 10,
        };

        let max_chat_message_len = match env::var("TRADEPOST_MAX_CHAT_MESSAGE_LEN") {
            Ok(val) => val.parse::<usize>().unwrap_or(2000),
            Err(_) => 2000,
        };

        Self {
            wishlist_matching_enabled,
            max_wishlist_items,
            max_offered_items,
            max_chat_message_len,
        }
    }
}
