pub mod chat;
pub mod decline_reason;
pub mod engagement;
pub mod listing;
pub mod notification;
pub mod offer;
pub mod rating;
pub mod service;
pub mod service_run;
pub mod trade;
pub mod transaction;
pub mod wishlist;
