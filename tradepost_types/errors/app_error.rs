use thiserror::Error;

/// Errors for app plumbing (collaborators the domain does not own).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Notification sink unavailable: {0}")]
    NotificationSink(String),
}
