use serde::{Deserialize, Serialize};

/// Request options passed to the rendering scrape API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeParams {
    /// Page to render
    pub url: String,
    /// Anti-scraping-protection bypass
    pub asp: bool,
    /// Execute page JavaScript before capturing markup
    pub render_js: bool,
    /// Dashboard tags for the request
    pub tags: Vec<String>,
}

impl ScrapeParams {
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

impl Default for ScrapeParams {
    fn default() -> Self {
        Self {
            url: String::new(),
            asp: true,
            render_js: true,
            tags: vec!["player".to_string(), "project:default".to_string()],
        }
    }
}

/// Envelope returned by the scrape API
#[derive(Debug, Deserialize)]
pub struct ScrapeResponse {
    pub result: ScrapeResult,
}

#[derive(Debug, Deserialize)]
pub struct ScrapeResult {
    pub content: String,
    /// Status the target site answered with
    pub status_code: u16,
}
