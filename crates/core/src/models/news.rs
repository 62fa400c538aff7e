use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A news article summary shown in the news feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
}

/// Why the news feed could not be fetched.
///
/// Kept to a closed set so the frontend can show a specific message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum NewsFailure {
    /// Connection, timeout, or a non-auth HTTP error status
    #[error("Network error: {0}")]
    Network(String),

    /// Missing, invalid or rate-limited API key
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The response body was not the expected JSON shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl NewsFailure {
    /// Warning text shown to the user in place of the feed.
    pub fn user_message(&self) -> String {
        match self {
            NewsFailure::Network(detail) => {
                format!("Could not fetch news: check your internet connection ({detail}).")
            }
            NewsFailure::Auth(detail) => {
                format!("Could not fetch news: check your NEWSAPI_KEY ({detail}).")
            }
            NewsFailure::MalformedResponse(detail) => {
                format!("Could not fetch news: the news service sent an unexpected response ({detail}).")
            }
        }
    }
}
