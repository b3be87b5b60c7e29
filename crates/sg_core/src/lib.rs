pub mod error;
pub mod fetch;
pub mod models;
pub mod types;

pub use error::Error;
pub use fetch::PageFetcher;
pub use models::{ContentGenerator, ImageGenerator};
pub use types::{
    AffiliateLinkMap, ArticleMetadata, ArticleRequest, ArticleType, Country, GeneratedArticle,
    Platform, ProductRecord, SeoReport,
};

pub type Result<T> = std::result::Result<T, Error>;
