//! Feed-fetch error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Feed returned status {status}")]
    Status { status: u16 },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

impl FeedError {
    /// User-friendly message; feed failures are non-fatal and only logged.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { status } => format!("Calendar feed error (HTTP {}).", status),
            Self::NetworkError(_) => "Calendar feed unreachable.".to_string(),
        }
    }
}
