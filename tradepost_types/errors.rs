use thiserror::Error;

pub mod app_error;
pub mod db_error;
pub mod market_error;

pub use app_error::AppError;
pub use db_error::DbError;
pub use market_error::MarketError;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Market(#[from] MarketError),

    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("An unknown error occurred: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for ApplicationError {
    fn from(err: anyhow::Error) -> Self {
        ApplicationError::Unknown(err.to_string())
    }
}

/// Stable classification of an error, meant to be mapped 1:1 at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    InvalidState,
    SelfAction,
    AlreadyExists,
    Validation,
    Internal,
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::Forbidden => 403,
            ErrorKind::InvalidState => 409,
            ErrorKind::AlreadyExists => 422,
            ErrorKind::SelfAction | ErrorKind::Validation => 400,
            ErrorKind::Internal => 500,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::SelfAction => "self_action",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::Validation => "validation",
            ErrorKind::Internal => "internal",
        }
    }
}

impl ApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::Market(e) => e.kind(),
            ApplicationError::Db(e) => e.kind(),
            ApplicationError::Json(_) => ErrorKind::Validation,
            ApplicationError::App(_)
            | ApplicationError::Infrastructure(_)
            | ApplicationError::Unknown(_) => ErrorKind::Internal,
        }
    }
}
