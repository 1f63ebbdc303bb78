pub mod common;
pub mod errors;
pub mod notifications;
pub mod statuses;

pub use errors::Result;
