mod config;
mod error;
mod filter;
mod models;
mod notify;
mod scrapers;

use anyhow::Context;
use config::{AppConfig, DiscordConfig};
use filter::Shortlist;
use models::FloorplanRecord;
use notify::{Announcer, DiscordChannel, DiscordClient};
use scrapers::{CachedSource, FloorplanParser, ScrapeParams, ScrapflyFetcher, SourceProvider};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("apt_scout=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🏠 Apt Scout - floorplan watcher");

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Fetch and filter once; the announcer re-sends this same list.
    let fetcher = ScrapflyFetcher::new(
        config.scrapfly_api_key.clone(),
        ScrapeParams::for_url(&config.url),
    )?;
    let source = CachedSource::new(config.cache_path.clone(), fetcher);
    let html = source.load().await?;

    let plans = FloorplanParser::new()?.parse(&html)?;
    let shortlist = Shortlist::build(&plans, config.max_price);

    info!("found {} total plans", shortlist.total);
    info!("found {} available plans", shortlist.available.len());
    debug!("available plans: {:?}", shortlist.available);
    info!(
        "found {} plans under ${}",
        shortlist.in_budget.len(),
        config.max_price
    );
    debug!("price acceptable plans: {:?}", shortlist.in_budget);

    match config.discord {
        Some(discord) => {
            info!("Discord enabled");
            announce(discord, shortlist.in_budget, config.announce_interval).await
        }
        None => {
            info!("Discord disabled, listing plans instead");
            for (i, plan) in shortlist.in_budget.iter().enumerate() {
                println!("{}. {}", i + 1, plan);
            }
            Ok(())
        }
    }
}

async fn announce(
    discord: DiscordConfig,
    plans: Vec<FloorplanRecord>,
    interval: Duration,
) -> anyhow::Result<()> {
    let client = DiscordClient::new(&discord.token)?;

    let me = client.current_user().await?;
    info!("Logged on as {} ({})", me.username, me.id);

    let channel = client.fetch_channel(&discord.channel_id).await?;
    info!(
        "channel: {}",
        channel.name.as_deref().unwrap_or(channel.id.as_str())
    );

    let announcer = Announcer::new(DiscordChannel::new(client, channel.id), plans, interval);
    let task = tokio::spawn(announcer.run());

    tokio::select! {
        joined = task => joined.context("Announcement task panicked")?,
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
    }

    Ok(())
}
