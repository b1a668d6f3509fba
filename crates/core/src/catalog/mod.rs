//! Movie catalog integration.
//!
//! The catalog answers paginated free-text searches with releases and their
//! torrent variants. `YtsClient` talks to the YTS list_movies API.

mod types;
mod yts;

pub use types::*;
pub use yts::YtsClient;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog did not answer within the request timeout.
    #[error("Request timed out")]
    Timeout,

    /// Could not reach the catalog.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Any other transport-level failure.
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// HTTP error status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// The response parsed but reported a non-"ok" status.
    #[error("{message}")]
    Rejected { status: String, message: String },

    /// The response body did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl CatalogError {
    /// True for failures to get any answer at all (timeouts, transport).
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            CatalogError::Timeout | CatalogError::ConnectionFailed(_) | CatalogError::Transport(_)
        )
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CatalogError::Timeout
        } else if e.is_connect() {
            CatalogError::ConnectionFailed(e.to_string())
        } else if e.is_decode() {
            CatalogError::ParseError(e.to_string())
        } else {
            CatalogError::Transport(e.to_string())
        }
    }
}

/// A source of movie listings.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Fetch one page of releases matching `query`. Pages are 1-based.
    async fn list_movies(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<CatalogPage, CatalogError>;
}
