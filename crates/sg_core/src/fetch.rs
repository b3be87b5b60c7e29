use async_trait::async_trait;
use crate::Result;

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Download the raw markup of a product page
    async fn fetch(&self, url: &str) -> Result<String>;
}
