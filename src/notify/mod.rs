pub mod announcer;
pub mod discord;

pub use announcer::Announcer;
pub use discord::{DiscordChannel, DiscordClient};

use anyhow::Result;
use async_trait::async_trait;

/// A destination that accepts text messages
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, content: &str) -> Result<()>;

    /// Human-readable name of the destination, for logs
    fn destination(&self) -> String;
}
