use anyhow::Result;

use ganttboard_core::Config;
use ganttboard_ics::FeedClient;
use ganttboard_timeline::{load_timeline, TimelineBar};
use ganttboard_trello::TrelloClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    ganttboard_core::init()?;

    let (config, _validation) = Config::load_validated()?;

    if !config.trello.is_configured() {
        anyhow::bail!("Configure api_key, api_token and board_id in config.toml.");
    }

    let trello = TrelloClient::new(&config.trello.api_key, &config.trello.api_token)?;
    let feeds = FeedClient::new()?;

    match load_timeline(&trello, &feeds, &config).await {
        Ok(data) => {
            // The charting widget consumes the bar list from stdout.
            let bars: Vec<TimelineBar> = data.entries.iter().map(|e| e.to_bar()).collect();
            println!("{}", serde_json::to_string_pretty(&bars)?);
            tracing::info!("{}", data.status);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Load failed: {}", e);
            anyhow::bail!("{}", e.user_message())
        }
    }
}
