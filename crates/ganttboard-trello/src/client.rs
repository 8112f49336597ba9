//! Trello REST API client.

use tracing::instrument;

use crate::error::TrelloError;
use crate::types::{ApiCard, Card};

const TRELLO_API_BASE: &str = "https://api.trello.com/1";

/// Card fields requested from the API; everything else is dead weight for
/// the timeline.
const CARD_FIELDS: &str = "name,due,start,labels,shortUrl";

pub struct TrelloClient {
    client: reqwest::Client,
    api_key: String,
    api_token: String,
    base_url: String,
}

impl TrelloClient {
    pub fn new(api_key: &str, api_token: &str) -> Result<Self, TrelloError> {
        if api_key.is_empty() || api_token.is_empty() {
            return Err(TrelloError::MissingCredentials);
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            api_token: api_token.to_string(),
            base_url: TRELLO_API_BASE.to_string(),
        })
    }

    /// Client against a non-default endpoint; used by tests.
    pub fn new_with_base_url(api_key: &str, api_token: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            api_token: api_token.to_string(),
            base_url: base_url.to_string(),
        }
    }

    /// List all cards on a board, parsed into local `Card` records.
    #[instrument(skip(self), level = "info")]
    pub async fn list_cards(&self, board_id: &str) -> Result<Vec<Card>, TrelloError> {
        let url = format!("{}/boards/{}/cards", self.base_url, board_id);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("token", self.api_token.as_str()),
                ("fields", CARD_FIELDS),
            ])
            .send()
            .await?;

        let cards: Vec<ApiCard> = self.handle_response(response, board_id).await?;

        tracing::info!("Fetched {} cards from board {}", cards.len(), board_id);
        Ok(cards.into_iter().map(Card::from_api).collect())
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        board_id: &str,
    ) -> Result<T, TrelloError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| TrelloError::ApiError(format!("JSON parse error: {}", e)))
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err(TrelloError::InvalidCredentials)
        } else if status.as_u16() == 404 {
            Err(TrelloError::BoardNotFound(board_id.to_string()))
        } else if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(10);
            Err(TrelloError::RateLimited(retry_after))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(TrelloError::ApiError(format!("{}: {}", status, text)))
        }
    }
}
