use crate::scrapers::traits::PageFetcher;
use crate::scrapers::types::{ScrapeParams, ScrapeResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

const SCRAPE_ENDPOINT: &str = "https://api.scrapfly.io/scrape";

/// Fetches JS-rendered pages through the Scrapfly scrape API
pub struct ScrapflyFetcher {
    client: Client,
    api_key: String,
    params: ScrapeParams,
}

impl ScrapflyFetcher {
    pub fn new(api_key: impl Into<String>, params: ScrapeParams) -> Result<Self> {
        // Rendering with ASP enabled can take well over a minute.
        let client = Client::builder()
            .timeout(Duration::from_secs(180))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            params,
        })
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("key", self.api_key.clone()),
            ("url", self.params.url.clone()),
            ("asp", self.params.asp.to_string()),
            ("render_js", self.params.render_js.to_string()),
            ("tags", self.params.tags.join(",")),
        ]
    }
}

/// Pull the page markup out of a scrape API response body
fn parse_response(body: &str) -> Result<String> {
    let response: ScrapeResponse =
        serde_json::from_str(body).context("Unexpected scrape API response")?;

    let status = response.result.status_code;
    if status >= 400 {
        anyhow::bail!("Target page answered with status {}", status);
    }

    Ok(response.result.content)
}

#[async_trait]
impl PageFetcher for ScrapflyFetcher {
    async fn fetch(&self) -> Result<String> {
        info!("Fetching {} via {}", self.params.url, self.source_name());

        let response = self
            .client
            .get(SCRAPE_ENDPOINT)
            .query(&self.query_pairs())
            .send()
            .await
            .context("Failed to reach scrape API")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            warn!("Scrape API returned status: {}", status);
            anyhow::bail!("Scrape API request failed: {}: {}", status, body);
        }

        let html = parse_response(&body)?;
        debug!("Downloaded {} bytes of HTML", html.len());
        Ok(html)
    }

    fn source_name(&self) -> &'static str {
        "Scrapfly"
    }
}
