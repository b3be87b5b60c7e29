pub mod fetcher;
pub mod scrapers;

pub use fetcher::HttpPageFetcher;
pub use scrapers::{ProductExtractor, SiteProfile};

pub mod prelude {
    pub use super::fetcher::HttpPageFetcher;
    pub use super::scrapers::{ProductExtractor, SiteProfile};
    pub use sg_core::{Error, PageFetcher, ProductRecord, Result};
}
