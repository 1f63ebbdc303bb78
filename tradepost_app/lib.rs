pub mod app;
pub mod cache;
pub mod command_handlers;
pub mod config;
pub mod cqrs;
pub mod effects;
pub mod logs;
pub mod notifications;
pub mod queries_handlers;
pub mod repository;
pub mod tasks;
pub mod uow;
pub mod wishlist;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
