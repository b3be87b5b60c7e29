use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sg_core::{Error, ImageGenerator, Result};
use std::fmt;
use std::time::Duration;

use crate::DEFAULT_IMAGE_BASE_URL;

const TIMEOUT: Duration = Duration::from_secs(30);
const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;
const QUALITY: &str = "high";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    width: u32,
    height: u32,
    quality: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    image_url: Option<String>,
    url: Option<String>,
}

pub struct NanoBananaImageGenerator {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NanoBananaImageGenerator {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

impl fmt::Debug for NanoBananaImageGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NanoBananaImageGenerator")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl ImageGenerator for NanoBananaImageGenerator {
    fn name(&self) -> &str {
        "NanoBanana"
    }

    async fn generate_image(&self, description: &str) -> Result<String> {
        let request = GenerateRequest {
            prompt: description,
            width: WIDTH,
            height: HEIGHT,
            quality: QUALITY,
        };

        let response = self
            .client
            .post(format!("{}/generate", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Illustration(format!(
                "image request failed with {}",
                status
            )));
        }

        let body = response.json::<GenerateResponse>().await?;
        body.image_url
            .or(body.url)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::Illustration("response carried no image URL".to_string()))
    }
}
