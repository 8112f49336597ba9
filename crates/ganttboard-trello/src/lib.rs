//! Trello integration for Ganttboard.
//!
//! Provides the board/card REST client and local card types.

pub mod client;
pub mod error;
pub mod types;

pub use client::TrelloClient;
pub use error::TrelloError;
pub use types::{ApiCard, ApiLabel, Card, CardLabel};
