use async_trait::async_trait;
use std::fmt;
use crate::Result;

#[async_trait]
pub trait ContentGenerator: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Draft an HTML article from a system and a user prompt
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait ImageGenerator: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Resolve an image description to a publicly reachable image URL
    async fn generate_image(&self, description: &str) -> Result<String>;
}
