use anyhow::Result;
use async_trait::async_trait;

/// Anything that can hand over the raw listing page markup
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// Return the page markup, from cache or network
    async fn load(&self) -> Result<String>;
}

/// Network backend that renders and fetches a page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self) -> Result<String>;

    /// Get the name of the backend
    fn source_name(&self) -> &'static str;
}
