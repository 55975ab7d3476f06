use crate::scrapers::traits::{PageFetcher, SourceProvider};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::info;

/// Serves page markup from a local file, fetching and saving it on a miss
pub struct CachedSource<F> {
    path: PathBuf,
    fetcher: F,
}

impl<F: PageFetcher> CachedSource<F> {
    pub fn new(path: impl Into<PathBuf>, fetcher: F) -> Self {
        Self {
            path: path.into(),
            fetcher,
        }
    }

    async fn save(&self, html: &str) -> Result<()> {
        tokio::fs::write(&self.path, html)
            .await
            .with_context(|| format!("Failed to write cache {}", self.path.display()))
    }
}

#[async_trait]
impl<F: PageFetcher> SourceProvider for CachedSource<F> {
    async fn load(&self) -> Result<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(html) => {
                info!("Using cached page {} ({} bytes)", self.path.display(), html.len());
                Ok(html)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "No cache at {}, fetching from {}",
                    self.path.display(),
                    self.fetcher.source_name()
                );
                let html = self.fetcher.fetch().await?;
                self.save(&html).await?;
                info!("💾 Saved page to {}", self.path.display());
                Ok(html)
            }
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read cache {}", self.path.display())),
        }
    }
}
