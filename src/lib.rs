mod client;
pub mod types;

pub use crate::{
    client::Client,
    types::{
        ApiError,
        ApiResponse,
        FindResult,
        GameModeStats,
        LifetimeStats,
        Platform,
        PlayerNotFound,
        Profile,
        RateLimit,
    },
};
pub use reqwest::StatusCode;

/// Result type
pub type FortniteResult<T> = Result<T, Error>;

/// Error Type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No api key was passed
    #[error("no api key passed")]
    MissingApiKey,

    /// The username was empty
    #[error("username is empty")]
    EmptyUsername,

    /// The api rejected the key
    #[error("{0}")]
    InvalidApiKey(ApiError),

    /// Reqwest HTTP error
    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid HTTP Status
    #[error("invalid http status {0}")]
    InvalidStatus(reqwest::StatusCode),

    /// Json Error
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Url Parse Error
    #[error("{0}")]
    Url(#[from] url::ParseError),
}
