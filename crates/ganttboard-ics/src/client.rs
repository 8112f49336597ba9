//! HTTP fetcher for ICS endpoints.

use tracing::instrument;

use crate::error::FeedError;

pub struct FeedClient {
    client: reqwest::Client,
}

impl FeedClient {
    pub fn new() -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self { client })
    }

    /// Fetch the raw ICS text from a feed URL.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_text(&self, url: &str) -> Result<String, FeedError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
