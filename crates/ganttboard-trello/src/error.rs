//! Trello-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrelloError {
    #[error("Trello credentials missing or not configured")]
    MissingCredentials,

    #[error("Invalid Trello credentials")]
    InvalidCredentials,

    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

impl TrelloError {
    /// User-friendly error message for status-line display.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCredentials => {
                "Configure api_key, api_token and board_id in config.toml.".to_string()
            }
            Self::InvalidCredentials => {
                "Trello rejected the credentials. Check your key and token.".to_string()
            }
            Self::BoardNotFound(_) => "Board not found. Check the board id.".to_string(),
            Self::RateLimited(secs) => {
                format!("Too many requests. Please wait {} seconds.", secs)
            }
            Self::ApiError(msg) => format!("Trello error: {}", msg),
            Self::NetworkError(_) => "Network error. Check your connection.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = TrelloError::MissingCredentials;
        assert!(err.user_message().contains("config.toml"));

        let err = TrelloError::RateLimited(30);
        assert!(err.user_message().contains("30"));

        let err = TrelloError::BoardNotFound("abc".into());
        assert!(err.user_message().contains("board id"));
    }
}
