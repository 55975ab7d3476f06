pub mod cache;
pub mod floorplans;
pub mod scrapfly;
pub mod traits;
pub mod types;

pub use cache::CachedSource;
pub use floorplans::FloorplanParser;
pub use scrapfly::ScrapflyFetcher;
pub use traits::SourceProvider;
pub use types::ScrapeParams;
