use async_trait::async_trait;
use sg_core::{ImageGenerator, Result};
use url::form_urlencoded;

const PLACEHOLDER_BASE: &str = "https://via.placeholder.com/800x600/4F46E5/ffffff";

#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderImageGenerator;

pub fn placeholder_url(description: &str) -> String {
    let text: String = form_urlencoded::byte_serialize(description.as_bytes()).collect();
    format!("{}?text={}", PLACEHOLDER_BASE, text)
}

#[async_trait]
impl ImageGenerator for PlaceholderImageGenerator {
    fn name(&self) -> &str {
        "Placeholder"
    }

    async fn generate_image(&self, description: &str) -> Result<String> {
        Ok(placeholder_url(description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_placeholder_url_encodes_description() {
        let url = PlaceholderImageGenerator
            .generate_image("earbuds & case")
            .await
            .unwrap();
        assert_eq!(
            url,
            "https://via.placeholder.com/800x600/4F46E5/ffffff?text=earbuds+%26+case"
        );
    }
}
